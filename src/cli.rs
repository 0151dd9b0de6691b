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


use std::path::PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use aircraft_load::{MassSearchStrategy, ParameterAssignment, RangeSelection};
use aircraft_load::params::DEFAULT_MAX_WING_AREA;
use micro_class::{ScoreAssignment, VariedParameter};

/// Takeoff payload and micro-class flight score planning for RC aircraft
#[derive(Parser, Debug)]
#[command(name = "payload-planner", version, about)]
pub struct Cli {
    /// Settings file to use instead of payload-planner-conf.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Directory for generated charts; overrides the settings file
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the wing area giving the largest payload for a takeoff distance limit
    Load(LoadArgs),
    /// Evaluate and sweep the micro-class flight score
    Score(ScoreArgs),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// TOML file of aircraft parameters
    #[arg(long, value_name = "TOML")]
    pub params: Option<PathBuf>,

    /// Override a single parameter, e.g. --set cl=1.4
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<ParameterAssignment>,

    /// Sweep a parameter against wing area, e.g. --range fn=5:40
    #[arg(long, value_name = "KEY[=MIN:MAX]")]
    pub range: Option<RangeSelection>,

    /// Largest wing area considered (m²)
    #[arg(long, default_value_t = DEFAULT_MAX_WING_AREA, value_name = "M2")]
    pub max_area: f64,

    /// Max mass search strategy; overrides the settings file
    #[arg(long, value_parser = parse_mass_search, value_name = "STRATEGY")]
    pub mass_search: Option<MassSearchStrategy>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// Where to write the chart; defaults to a new file in the output directory
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,

    /// Don't render a chart
    #[arg(long, conflicts_with = "chart")]
    pub no_chart: bool,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// TOML file of score inputs
    #[arg(long, value_name = "TOML")]
    pub params: Option<PathBuf>,

    /// Override a single input, e.g. --set wingspan=8
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<ScoreAssignment>,

    /// Parameter to sweep, e.g. --vary w_empty=8:20:50
    #[arg(long, value_name = "KEY[=MIN:MAX[:POINTS]]")]
    pub vary: Option<VariedParameter>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,

    /// Where to write the score curve chart
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,

    /// Also render the score surface over a second parameter to this file
    #[arg(long, value_name = "SVG")]
    pub surface_chart: Option<PathBuf>,

    /// Don't render the score curve chart
    #[arg(long, conflicts_with = "chart")]
    pub no_chart: bool,
}

fn parse_mass_search(s: &str) -> Result<MassSearchStrategy, String> {
    s.parse::<MassSearchStrategy>().map_err(|e| e.to_string())
}
