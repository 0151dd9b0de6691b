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


//! Text, JSON and CSV renderings of analysis results

use std::io::Write;
use serde::Serialize;
use aircraft_load::{AircraftConfig, AircraftParameter, Analysis, BestConfiguration, PayloadCurve, PayloadPoint, PayloadSurface};
use micro_class::{FlightScore, ScoreCurve, ScoreInputs, ScoreParameter, ScoreSample};
use utils::numeric::first_max_index;
use utils::units::{feet_to_metres, lbs_to_kg};
use crate::cli::ReportFormat;
use crate::error::Result;

pub const NO_FEASIBLE_CONFIGURATION: &str = "No feasible configuration found";

pub fn write_analysis<W: Write>(out: &mut W, analysis: &Analysis, format: ReportFormat) -> Result<()> {
    match (analysis, format) {
        (Analysis::Curve(curve), ReportFormat::Table) => write_curve_table(out, curve),
        (Analysis::Surface(surface), ReportFormat::Table) => write_surface_table(out, surface),
        (Analysis::Curve(curve), ReportFormat::Json) => {
            serde_json::to_writer_pretty(&mut *out, &CurveReport::from(curve))?;
            writeln!(out)?;
            Ok(())
        }
        (Analysis::Surface(surface), ReportFormat::Json) => {
            serde_json::to_writer_pretty(&mut *out, &SurfaceReport::from(surface))?;
            writeln!(out)?;
            Ok(())
        }
        (Analysis::Curve(curve), ReportFormat::Csv) => {
            let mut writer = csv::Writer::from_writer(out);
            for point in curve.points() {
                writer.serialize(point)?;
            }
            writer.flush()?;
            Ok(())
        }
        (Analysis::Surface(surface), ReportFormat::Csv) => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(&[surface.parameter().key(), "area", "payload"])?;
            for (row, value) in surface.parameter_values().iter().enumerate() {
                for (col, area) in surface.areas().iter().enumerate() {
                    let payload = surface.payload_at(row, col).unwrap_or(0.0);
                    writer.write_record(&[value.to_string(), area.to_string(), payload.to_string()])?;
                }
            }
            writer.flush()?;
            Ok(())
        }
    }
}

pub fn write_score<W: Write>(out: &mut W,
                             inputs: &ScoreInputs,
                             current: &FlightScore,
                             curve: &ScoreCurve,
                             format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Table => write_score_table(out, inputs, current, curve),
        ReportFormat::Json => {
            let report = ScoreReport {
                inputs: *inputs,
                current: *current,
                varied: curve.parameter(),
                optimum: curve.optimum(),
                samples: curve.samples()
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for sample in curve.samples() {
                writer.serialize(ScoreRow::from(sample))?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_config_table<W: Write>(out: &mut W, config: &AircraftConfig) -> Result<()> {
    writeln!(out, "Aircraft parameters")?;
    for parameter in AircraftParameter::ALL {
        writeln!(out, "  {:<32} {:>10.3}", parameter.label(), config.get(parameter))?;
    }
    Ok(())
}

fn write_best<W: Write>(out: &mut W, best: &BestConfiguration, config: &AircraftConfig) -> Result<()> {
    writeln!(out, "Best configuration")?;
    writeln!(out, "  Max payload:      {:.2} kg", best.payload)?;
    writeln!(out, "  Wing area:        {:.3} m²", best.area)?;
    writeln!(out, "  Takeoff mass:     {:.2} kg (limit {} kg)", best.total_mass, config.max_takeoff_mass)?;
    writeln!(out, "  Takeoff distance: {:.2} m (limit {} m)", best.takeoff_distance, config.max_takeoff_distance)?;
    Ok(())
}

fn write_curve_table<W: Write>(out: &mut W, curve: &PayloadCurve) -> Result<()> {
    write_config_table(out, curve.config())?;
    writeln!(out)?;
    match curve.best() {
        Some(best) => write_best(out, best, curve.config())?,
        None => writeln!(out, "{}", NO_FEASIBLE_CONFIGURATION)?
    }
    Ok(())
}

fn write_surface_table<W: Write>(out: &mut W, surface: &PayloadSurface) -> Result<()> {
    write_config_table(out, surface.config())?;
    writeln!(out)?;
    writeln!(out, "Payload surface over wing area and {}", surface.parameter().label())?;
    writeln!(out, "  {} x {} grid, wing area {:.2} to {:.2} m²",
             surface.parameter_values().len(), surface.areas().len(),
             surface.areas().first().copied().unwrap_or(0.0),
             surface.areas().last().copied().unwrap_or(0.0))?;

    let cells: Vec<f64> = surface.payload().iter().copied().collect();
    let columns = surface.areas().len();
    match first_max_index(&cells) {
        Some((idx, payload)) if payload > 0.0 && columns > 0 => {
            let value = surface.parameter_values()[idx / columns];
            let area = surface.areas()[idx % columns];
            writeln!(out, "  Largest payload {:.2} kg at wing area {:.3} m² and {} = {:.3}",
                     payload, area, surface.parameter().key(), value)?;
        }
        _ => writeln!(out, "  {}", NO_FEASIBLE_CONFIGURATION)?
    }
    Ok(())
}

fn write_score_table<W: Write>(out: &mut W,
                               inputs: &ScoreInputs,
                               current: &FlightScore,
                               curve: &ScoreCurve) -> Result<()> {
    writeln!(out, "Score inputs")?;
    for parameter in ScoreParameter::ALL {
        let value = inputs.get(parameter);
        writeln!(out, "  {:<26} {:>8.2}  ({})", parameter.label(), value, metric_equivalent(parameter, value))?;
    }
    writeln!(out)?;
    writeln!(out, "FS = {:.2}", current.score)?;
    writeln!(out, "  M = {:.4}", current.m)?;
    writeln!(out, "  Z = {:.2}", current.z)?;
    writeln!(out, "  Takeoff bonus = {}", current.takeoff_bonus)?;
    writeln!(out)?;

    let Some(optimum) = curve.optimum() else {
        writeln!(out, "No score samples")?;
        return Ok(());
    };
    writeln!(out, "Max FS = {:.2} varying {}", optimum.result.score, curve.parameter().label())?;
    writeln!(out, "  {}: {:.2}", curve.parameter().label(), optimum.value)?;
    for parameter in ScoreParameter::ALL {
        if parameter != curve.parameter() {
            writeln!(out, "  {}: {:.2}", parameter.label(), optimum.inputs.get(parameter))?;
        }
    }
    writeln!(out, "  M: {:.4}", optimum.result.m)?;
    writeln!(out, "  Z: {:.2}", optimum.result.z)?;
    Ok(())
}

fn metric_equivalent(parameter: ScoreParameter, value: f64) -> String {
    match parameter {
        ScoreParameter::PayloadWeight | ScoreParameter::EmptyWeight => format!("{:.2} kg", lbs_to_kg(value)),
        ScoreParameter::Wingspan | ScoreParameter::TakeoffDistance => format!("{:.2} m", feet_to_metres(value))
    }
}

#[derive(Serialize)]
struct CurveReport<'a> {
    config: &'a AircraftConfig,
    best: Option<&'a BestConfiguration>,
    points: &'a [PayloadPoint]
}

impl<'a> From<&'a PayloadCurve> for CurveReport<'a> {
    fn from(curve: &'a PayloadCurve) -> Self {
        CurveReport { config: curve.config(), best: curve.best(), points: curve.points() }
    }
}

#[derive(Serialize)]
struct SurfaceReport<'a> {
    config: &'a AircraftConfig,
    parameter: AircraftParameter,
    areas: &'a [f64],
    parameter_values: &'a [f64],
    /// One row per parameter value, one column per area
    payload: Vec<Vec<f64>>
}

impl<'a> From<&'a PayloadSurface> for SurfaceReport<'a> {
    fn from(surface: &'a PayloadSurface) -> Self {
        SurfaceReport {
            config: surface.config(),
            parameter: surface.parameter(),
            areas: surface.areas(),
            parameter_values: surface.parameter_values(),
            payload: surface.rows()
        }
    }
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    inputs: ScoreInputs,
    current: FlightScore,
    varied: ScoreParameter,
    optimum: Option<&'a ScoreSample>,
    samples: &'a [ScoreSample]
}

#[derive(Serialize)]
struct ScoreRow {
    w_payload: f64,
    w_empty: f64,
    wingspan: f64,
    takeoff_distance: f64,
    score: f64,
    m: f64,
    z: f64,
    takeoff_bonus: f64
}

impl From<&ScoreSample> for ScoreRow {
    fn from(sample: &ScoreSample) -> Self {
        ScoreRow {
            w_payload: sample.inputs.w_payload,
            w_empty: sample.inputs.w_empty,
            wingspan: sample.inputs.wingspan,
            takeoff_distance: sample.inputs.takeoff_distance,
            score: sample.result.score,
            m: sample.result.m,
            z: sample.result.z,
            takeoff_bonus: sample.result.takeoff_bonus
        }
    }
}

#[cfg(test)]
mod tests {
    use aircraft_load::{run_analysis, AnalysisRequest, RangeSelection};
    use micro_class::{flight_score, sweep_score, ScoreRequest, VariedParameter};
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn default_curve() -> Analysis {
        let request = AnalysisRequest::new(AircraftConfig::default(), 3.0).unwrap();
        run_analysis(&request)
    }

    #[test]
    fn curve_table_reports_best_configuration() {
        let analysis = default_curve();
        let text = render(|out| write_analysis(out, &analysis, ReportFormat::Table));
        assert!(text.contains("Aircraft parameters"));
        assert!(text.contains("Best configuration"));
        assert!(text.contains("Wing area:"));
        assert!(!text.contains(NO_FEASIBLE_CONFIGURATION));
    }

    #[test]
    fn curve_table_without_feasible_area() {
        let config = AircraftConfig::default().with(AircraftParameter::NominalThrust, 0.0);
        let analysis = run_analysis(&AnalysisRequest::new(config, 3.0).unwrap());
        let text = render(|out| write_analysis(out, &analysis, ReportFormat::Table));
        assert!(text.contains(NO_FEASIBLE_CONFIGURATION));
    }

    #[test]
    fn curve_csv_has_a_row_per_area() {
        let analysis = default_curve();
        let text = render(|out| write_analysis(out, &analysis, ReportFormat::Csv));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("area,empty_mass,max_mass,payload"));
        assert_eq!(lines.count(), 101);
    }

    #[test]
    fn curve_json_is_parseable() {
        let analysis = default_curve();
        let text = render(|out| write_analysis(out, &analysis, ReportFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["points"].as_array().unwrap().len(), 101);
        assert!(value["best"]["area"].as_f64().unwrap() > 0.1);
        assert_eq!(value["config"]["cl"].as_f64(), Some(AircraftConfig::default().lift_coefficient));
    }

    #[test]
    fn surface_csv_is_long_format() {
        let selection: RangeSelection = "wind=0:5".parse().unwrap();
        let request = AnalysisRequest::new(AircraftConfig::default(), 2.0).unwrap().with_range(selection);
        let analysis = run_analysis(&request);
        let text = render(|out| write_analysis(out, &analysis, ReportFormat::Csv));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("wind,area,payload"));
        assert_eq!(lines.count(), 26 * 26);
    }

    #[test]
    fn score_table_and_csv() {
        let request = ScoreRequest::new(ScoreInputs::default(),
                                        Some(VariedParameter::with_default_range(ScoreParameter::EmptyWeight)));
        let current = flight_score(&request.inputs);
        let curve = sweep_score(&request);

        let text = render(|out| write_score(out, &request.inputs, &current, &curve, ReportFormat::Table));
        assert!(text.contains(&format!("FS = {:.2}", current.score)));
        assert!(text.contains("Max FS = "));
        assert!(text.contains("(4.54 kg)"));
        assert!(text.contains("(3.05 m)"));

        let csv_text = render(|out| write_score(out, &request.inputs, &current, &curve, ReportFormat::Csv));
        let mut lines = csv_text.lines();
        assert_eq!(lines.next(), Some("w_payload,w_empty,wingspan,takeoff_distance,score,m,z,takeoff_bonus"));
        assert_eq!(lines.count(), 30);
    }

    #[test]
    fn score_json_names_varied_parameter() {
        let request = ScoreRequest::default();
        let current = flight_score(&request.inputs);
        let curve = sweep_score(&request);
        let text = render(|out| write_score(out, &request.inputs, &current, &curve, ReportFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["varied"], "w_payload");
        assert_eq!(value["samples"].as_array().unwrap().len(), 30);
    }
}
