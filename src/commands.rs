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


use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use aircraft_load::{run_analysis, AircraftConfig, Analysis, AnalysisRequest};
use micro_class::{flight_score, score_surface, sweep_score, ScoreInputs, ScoreRequest};
use utils::filesystem::create_safe_filename_in_path;
use crate::cli::{LoadArgs, ScoreArgs};
use crate::error::{PlannerError, Result};
use crate::settings::GlobalSettings;
use crate::{plot, report};

pub fn run_load(args: &LoadArgs, settings: &GlobalSettings) -> Result<()> {
    let request = load_request(args, settings)?;
    match request.selection() {
        None => status("Computing optimal payload..."),
        Some(selection) => status(&format!(
            "Computing payload surface over wing area and {}. This may take a few seconds...",
            selection.parameter
        ))
    }
    let analysis = run_analysis(&request);
    report::write_analysis(&mut io::stdout().lock(), &analysis, args.format)?;

    if args.no_chart {
        return Ok(());
    }
    match &analysis {
        Analysis::Curve(curve) => {
            if curve.best().is_none() {
                info!("Nothing feasible to chart");
                return Ok(());
            }
            let path = chart_path(args.chart.as_deref(), settings, "payload_vs_wing_area")?;
            plot::draw_payload_curve(&path, settings.chart_size(), curve)?;
            chart_written(&path);
        }
        Analysis::Surface(surface) => {
            let name = format!("payload_vs_wing_area_and_{}", surface.parameter().key());
            let path = chart_path(args.chart.as_deref(), settings, &name)?;
            plot::draw_payload_surface(&path, settings.chart_size(), surface)?;
            chart_written(&path);
        }
    }
    Ok(())
}

pub fn run_score(args: &ScoreArgs, settings: &GlobalSettings) -> Result<()> {
    let request = score_request(args)?;
    let current = flight_score(&request.inputs);
    info!("FS = {:.2} for {:?}", current.score, request.inputs);
    let curve = sweep_score(&request);
    report::write_score(&mut io::stdout().lock(), &request.inputs, &current, &curve, args.format)?;

    if !args.no_chart {
        let name = format!("flight_score_vs_{}", curve.parameter().key());
        let path = chart_path(args.chart.as_deref(), settings, &name)?;
        plot::draw_score_curve(&path, settings.chart_size(), &curve)?;
        chart_written(&path);
    }
    if let Some(path) = &args.surface_chart {
        let policy = settings.secondary_axis_policy()?;
        let surface = score_surface(&request, &policy)?;
        plot::draw_score_surface(path, settings.chart_size(), &surface)?;
        chart_written(path);
    }
    Ok(())
}

fn load_request(args: &LoadArgs, settings: &GlobalSettings) -> Result<AnalysisRequest> {
    let mut config: AircraftConfig = read_parameter_file(args.params.as_deref())?;
    for assignment in &args.set {
        config.set(assignment.parameter, assignment.value);
    }
    let mut request = AnalysisRequest::new(config, args.max_area)?
        .with_strategy(args.mass_search.unwrap_or(settings.mass_search()));
    if let Some(selection) = args.range {
        request = request.with_range(selection);
    }
    debug!("Load request {:?}", request);
    Ok(request)
}

fn score_request(args: &ScoreArgs) -> Result<ScoreRequest> {
    let mut inputs: ScoreInputs = read_parameter_file(args.params.as_deref())?;
    for assignment in &args.set {
        inputs.set(assignment.parameter, assignment.value);
    }
    Ok(ScoreRequest::new(inputs, args.vary))
}

/// Parameters from a TOML table, or the defaults when no file is given.
/// Keys that are left out keep their default value; unknown keys are rejected.
fn read_parameter_file<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let contents = fs::read_to_string(path).map_err(|e| {
        PlannerError::ParameterFile(path.to_path_buf(), e.to_string())
    })?;
    toml::from_str(&contents).map_err(|e| {
        PlannerError::ParameterFile(path.to_path_buf(), e.to_string())
    })
}

fn chart_path(requested: Option<&Path>, settings: &GlobalSettings, name: &str) -> Result<PathBuf> {
    if let Some(path) = requested {
        return Ok(path.to_path_buf());
    }
    let output_dir = settings.output_path();
    fs::create_dir_all(&output_dir)?;
    Ok(create_safe_filename_in_path(&output_dir, name, "svg"))
}

fn status(message: &str) {
    info!("{}", message);
    eprintln!("{}", message);
}

fn chart_written(path: &Path) {
    eprintln!("Chart written to {}", path.display());
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use aircraft_load::{AircraftParameter, MassSearchStrategy};
    use micro_class::ScoreParameter;
    use crate::cli::{Cli, Command};
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("payload-planner-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn load_args(argv: &[&str]) -> LoadArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Load(args) => args,
            _ => panic!("expected load command")
        }
    }

    fn score_args(argv: &[&str]) -> ScoreArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Score(args) => args,
            _ => panic!("expected score command")
        }
    }

    #[test]
    fn partial_parameter_file_keeps_defaults() {
        let path = temp_file("partial", "cl = 1.6\nmax_distance = 40.0\n");
        let config: AircraftConfig = read_parameter_file(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.lift_coefficient, 1.6);
        assert_eq!(config.max_takeoff_distance, 40.0);
        assert_eq!(config.fixed_mass, AircraftConfig::default().fixed_mass);
    }

    #[test]
    fn unknown_key_in_parameter_file_is_rejected() {
        let path = temp_file("unknown", "cl = 1.6\nthrust = 3\n");
        let result: Result<AircraftConfig> = read_parameter_file(Some(&path));
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(PlannerError::ParameterFile(_, _))));
    }

    #[test]
    fn missing_parameter_file_is_an_error() {
        let path = std::env::temp_dir().join("payload-planner-missing-params.toml");
        let result: Result<ScoreInputs> = read_parameter_file(Some(&path));
        assert!(result.is_err());
    }

    #[test]
    fn set_overrides_parameter_file() {
        let path = temp_file("load-set", "fn = 40.0\nwind = 2.0\n");
        let path_str = path.to_string_lossy().into_owned();
        let args = load_args(&["payload-planner", "load", "--params", path_str.as_str(), "--set", "wind=4"]);
        let request = load_request(&args, &GlobalSettings::default()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(request.config().get(AircraftParameter::NominalThrust), 40.0);
        assert_eq!(request.config().get(AircraftParameter::WindSpeed), 4.0);
        assert_eq!(request.strategy(), MassSearchStrategy::Bisection);
        assert!(request.selection().is_none());
    }

    #[test]
    fn mass_search_flag_beats_settings() {
        let args = load_args(&["payload-planner", "load", "--mass-search", "verified", "--range", "cd"]);
        let request = load_request(&args, &GlobalSettings::default()).unwrap();
        assert_eq!(request.strategy(), MassSearchStrategy::Verified);
        assert_eq!(request.selection().unwrap().parameter, AircraftParameter::DragCoefficient);
    }

    #[test]
    fn small_max_area_is_rejected() {
        let args = load_args(&["payload-planner", "load", "--max-area", "0.1"]);
        assert!(matches!(load_request(&args, &GlobalSettings::default()), Err(PlannerError::AircraftLoad(_))));
    }

    #[test]
    fn score_request_defaults_to_varying_payload() {
        let args = score_args(&["payload-planner", "score", "--set", "w_empty=9"]);
        let request = score_request(&args).unwrap();
        assert_eq!(request.inputs.w_empty, 9.0);
        assert_eq!(request.varied.parameter, ScoreParameter::PayloadWeight);
        assert_eq!(request.varied.range.points(), 30);
    }

    #[test]
    fn requested_chart_path_is_used_verbatim() {
        let path = chart_path(Some(Path::new("out/mine.svg")), &GlobalSettings::default(), "ignored").unwrap();
        assert_eq!(path, PathBuf::from("out/mine.svg"));
    }

    #[test]
    fn generated_chart_path_lands_in_output_dir() {
        let dir = std::env::temp_dir().join(format!("payload-planner-charts-{}", std::process::id()));
        let mut settings = GlobalSettings::default();
        settings.set_output_path(&dir);
        let path = chart_path(None, &settings, "payload vs wing area").unwrap();
        assert!(dir.is_dir());
        assert_eq!(path.parent().unwrap(), dir.as_path());
        assert_eq!(path.file_name().unwrap(), "payload_vs_wing_area.svg");
        fs::remove_dir_all(&dir).unwrap();
    }
}
