/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of payload-planner.
 *
 * payload-planner is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * payload-planner is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with payload-planner. If not, see <https://www.gnu.org/licenses/>.
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigBuilder, ConfigError};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use aircraft_load::MassSearchStrategy;
use micro_class::{SampleRange, ScoreParameter, SecondaryAxisPolicy};

/// Sweep range for one secondary axis of the score surface, keyed by parameter in
/// `[secondary_ranges]`. `points` falls back to the default sample count.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RangeSetting {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlobalSettings {
    output_path: String,
    chart_width: u32,
    chart_height: u32,
    mass_search: MassSearchStrategy,
    secondary_preference: Vec<String>,
    #[serde(default)]
    secondary_ranges: BTreeMap<String, RangeSetting>
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            output_path: GlobalSettings::default_output_path(),
            chart_width: GlobalSettings::DEFAULT_CHART_WIDTH,
            chart_height: GlobalSettings::DEFAULT_CHART_HEIGHT,
            mass_search: MassSearchStrategy::default(),
            secondary_preference: GlobalSettings::default_secondary_preference(),
            secondary_ranges: BTreeMap::new()
        }
    }
}

impl GlobalSettings {
    const OUTPUT_PATH: &'static str = "output_path";
    const CHART_WIDTH: &'static str = "chart_width";
    const CHART_HEIGHT: &'static str = "chart_height";
    const MASS_SEARCH: &'static str = "mass_search";
    const SECONDARY_PREFERENCE: &'static str = "secondary_preference";
    const CONFIG_FILENAME: &'static str = "payload-planner-conf.toml";
    const ENV_PREFIX: &'static str = "APP";

    const DEFAULT_CHART_WIDTH: u32 = 1024;
    const DEFAULT_CHART_HEIGHT: u32 = 768;

    fn default_output_path() -> String {
        String::from(".")
    }

    fn default_secondary_preference() -> Vec<String> {
        ScoreParameter::ALL.iter().map(|p| p.key().to_string()).collect()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default(GlobalSettings::OUTPUT_PATH, GlobalSettings::default_output_path())?
            .set_default(GlobalSettings::CHART_WIDTH, GlobalSettings::DEFAULT_CHART_WIDTH as i64)?
            .set_default(GlobalSettings::CHART_HEIGHT, GlobalSettings::DEFAULT_CHART_HEIGHT as i64)?
            .set_default(GlobalSettings::MASS_SEARCH, MassSearchStrategy::default().as_str())?
            .set_default(GlobalSettings::SECONDARY_PREFERENCE, GlobalSettings::default_secondary_preference())
    }

    /// Load settings from `path`, or from payload-planner-conf.toml in the current directory,
    /// layered over the defaults with `APP_` environment variables taking precedence.
    ///
    /// When the default file doesn't exist yet the defaults are written out to it.
    /// An explicitly requested file must exist, and a file that exists but can't be
    /// parsed is reported and left untouched.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => GlobalSettings::load_from(p, false),
            None => GlobalSettings::load_from(Path::new(GlobalSettings::CONFIG_FILENAME), true)
        }
    }

    fn load_from(file: &Path, write_if_missing: bool) -> Result<Self, ConfigError> {
        match GlobalSettings::builder_with_defaults()?
            .add_source(config::File::from(file))
            .add_source(config::Environment::with_prefix(GlobalSettings::ENV_PREFIX))
            .build() {
            Ok(settings) => {
                settings.try_deserialize()
            }
            Err(e) => {
                if !write_if_missing || file.exists() {
                    return Err(e);
                }
                warn!("Failed to load settings. {}", e.to_string());
                let settings = GlobalSettings::builder_with_defaults()?
                    .add_source(config::Environment::with_prefix(GlobalSettings::ENV_PREFIX))
                    .build()?;
                let ret: GlobalSettings = settings.try_deserialize()?;
                match ret.write_to(file) {
                    Ok(_) => info!("Wrote default settings to {}", file.display()),
                    Err(e) => error!("Failed to write settings. {}", e.to_string())
                }
                Ok(ret)
            }
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }

    pub fn set_output_path(&mut self, new_path: &Path) {
        self.output_path = new_path.to_string_lossy().into_owned();
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (self.chart_width, self.chart_height)
    }

    pub fn mass_search(&self) -> MassSearchStrategy {
        self.mass_search
    }

    /// Secondary axis selection for the score surface from `secondary_preference`
    /// and any `[secondary_ranges]` overrides
    pub fn secondary_axis_policy(&self) -> micro_class::Result<SecondaryAxisPolicy> {
        let mut policy = SecondaryAxisPolicy::from_keys(&self.secondary_preference)?;
        for (key, setting) in &self.secondary_ranges {
            let parameter: ScoreParameter = key.parse()?;
            let range = SampleRange::new(setting.min,
                                         setting.max,
                                         setting.points.unwrap_or(SampleRange::DEFAULT_POINTS))?;
            policy = policy.with_range(parameter, range);
        }
        Ok(policy)
    }

    fn write_to(&self, file: &Path) -> std::io::Result<()> {
        fs::write(file, self.to_toml()?)
    }

    fn to_toml(&self) -> std::io::Result<String> {
        toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })
    }
}
