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


use std::error::Error;
use std::path::{Path, PathBuf};
use itertools::{Itertools, MinMaxResult};
use plotters::chart::{ChartBuilder, LabelAreaPosition, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::{Circle, PathElement, Polygon};
use plotters::prelude::{BLACK, FontDesc, FontFamily, FontStyle, LineSeries, SVGBackend, WHITE};
use plotters::style::{Color, HSLColor, RED, TextStyle, YELLOW};
use tracing::info;
use aircraft_load::{PayloadCurve, PayloadSurface};
use micro_class::{ScoreCurve, ScoreSurface};
use crate::error::{PlannerError, Result};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

pub struct LineChart<'a> {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub series_label: String,
    pub data: &'a [(f64, f64)],
    pub highlight: Option<((f64, f64), String)>
}

/// A surface drawn as one quad per grid cell. X and Z are the horizontal axes;
/// height is looked up by `(x_idx, z_idx)`.
pub struct SurfaceChart<'a> {
    pub title: String,
    pub x_desc: String,
    pub z_desc: String,
    pub height_desc: String,
    pub xs: &'a [f64],
    pub zs: &'a [f64]
}

pub fn draw_payload_curve(path: &Path, size: (u32, u32), curve: &PayloadCurve) -> Result<()> {
    let data = curve.chart_data();
    let chart = LineChart {
        title: String::from("Payload vs wing area"),
        x_desc: String::from("Wing area (m²)"),
        y_desc: String::from("Payload (kg)"),
        series_label: String::from("Max payload"),
        data: &data,
        highlight: curve.best().map(|best| {
            ((best.area, best.payload), format!("Best {:.2} kg @ {:.3} m²", best.payload, best.area))
        })
    };
    draw_line_chart(path, size, &chart)
}

pub fn draw_payload_surface(path: &Path, size: (u32, u32), surface: &PayloadSurface) -> Result<()> {
    let chart = SurfaceChart {
        title: format!("Payload vs wing area and {}", surface.parameter().key()),
        x_desc: String::from("Wing area (m²)"),
        z_desc: surface.parameter().label().to_string(),
        height_desc: String::from("Payload (kg)"),
        xs: surface.areas(),
        zs: surface.parameter_values()
    };
    draw_surface_chart(path, size, &chart, |area_idx, param_idx| {
        surface.payload_at(param_idx, area_idx).unwrap_or(f64::NAN)
    })
}

pub fn draw_score_curve(path: &Path, size: (u32, u32), curve: &ScoreCurve) -> Result<()> {
    let data = curve.chart_data();
    let chart = LineChart {
        title: format!("Flight score vs {}", curve.parameter().key()),
        x_desc: curve.parameter().label().to_string(),
        y_desc: String::from("Flight score"),
        series_label: String::from("FS"),
        data: &data,
        highlight: curve.optimum().map(|s| {
            ((s.value, s.result.score), format!("Max FS {:.2} @ {:.2}", s.result.score, s.value))
        })
    };
    draw_line_chart(path, size, &chart)
}

pub fn draw_score_surface(path: &Path, size: (u32, u32), surface: &ScoreSurface) -> Result<()> {
    let chart = SurfaceChart {
        title: format!("Flight score vs {} and {}", surface.primary().key(), surface.secondary().key()),
        x_desc: surface.primary().label().to_string(),
        z_desc: surface.secondary().label().to_string(),
        height_desc: String::from("Flight score"),
        xs: surface.primary_values(),
        zs: surface.secondary_values()
    };
    draw_surface_chart(path, size, &chart, |x_idx, z_idx| {
        surface.scores().get((x_idx, z_idx)).copied().unwrap_or(f64::NAN)
    })
}

pub fn draw_line_chart(path: &Path, size: (u32, u32), chart: &LineChart) -> Result<()> {
    render_line_chart(path, size, chart).map_err(|e| chart_error(path, e))?;
    info!("Wrote chart {}", path.display());
    Ok(())
}

pub fn draw_surface_chart<F>(path: &Path, size: (u32, u32), chart: &SurfaceChart, height: F) -> Result<()>
    where F: Fn(usize, usize) -> f64
{
    render_surface_chart(path, size, chart, height).map_err(|e| chart_error(path, e))?;
    info!("Wrote chart {}", path.display());
    Ok(())
}

fn chart_error(path: &Path, e: Box<dyn Error>) -> PlannerError {
    PlannerError::Chart(PathBuf::from(path), e.to_string())
}

fn render_line_chart(path: &Path, size: (u32, u32), chart: &LineChart) -> DrawResult {
    let finite: Vec<(f64, f64)> = chart.data.iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let (x_min, x_max) = axis_bounds(finite.iter().map(|(x, _)| *x), false);
    let (y_min, y_max) = axis_bounds(finite.iter().map(|(_, y)| *y), true);
    let font_desc = FontDesc::new(FontFamily::Name("sans-serif"), 20.0, FontStyle::Normal);

    let background_colour = BLACK.mix(0.9);
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&background_colour)?;
    let mut context = ChartBuilder::on(&root)
        .margin(15)
        .caption(&chart.title, font_desc.color(&WHITE))
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    context
        .configure_mesh()
        .x_label_formatter(&two_decimals)
        .x_desc(chart.x_desc.as_str())
        .y_label_formatter(&two_decimals)
        .y_desc(chart.y_desc.as_str())
        .label_style(&WHITE)
        .axis_desc_style(TextStyle::from(("sans-serif", 14)).color(&WHITE))
        .bold_line_style(&WHITE.mix(0.2))
        .light_line_style(&WHITE.mix(0.1))
        .draw()?;

    context.draw_series(LineSeries::new(finite, &YELLOW))?
        .label(chart.series_label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &YELLOW));

    if let Some((point, label)) = &chart.highlight {
        context.draw_series(std::iter::once(Circle::new(*point, 5, RED.filled())))?
            .label(label.as_str())
            .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));
    }

    context
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&BLACK.mix(0.8))
        .border_style(&WHITE)
        .label_font(TextStyle::from(("sans-serif", 14)).color(&WHITE))
        .draw()?;
    root.present()?;
    Ok(())
}

fn render_surface_chart<F>(path: &Path, size: (u32, u32), chart: &SurfaceChart, height: F) -> DrawResult
    where F: Fn(usize, usize) -> f64
{
    let (x_min, x_max) = axis_bounds(chart.xs.iter().copied(), false);
    let (z_min, z_max) = axis_bounds(chart.zs.iter().copied(), false);
    let heights = (0..chart.xs.len())
        .flat_map(|x_idx| (0..chart.zs.len()).map(move |z_idx| (x_idx, z_idx)))
        .map(|(x_idx, z_idx)| height(x_idx, z_idx))
        .filter(|h| h.is_finite());
    let (y_min, y_max) = axis_bounds(heights, true);
    let font_desc = FontDesc::new(FontFamily::Name("sans-serif"), 20.0, FontStyle::Normal);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&BLACK.mix(0.9))?;
    let mut context = ChartBuilder::on(&root)
        .margin(20)
        .caption(&chart.title, font_desc.color(&WHITE))
        .build_cartesian_3d(x_min..x_max, y_min..y_max, z_min..z_max)?;
    context.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    context
        .configure_axes()
        .label_style(TextStyle::from(("sans-serif", 14)).color(&WHITE))
        .bold_grid_style(&WHITE.mix(0.2))
        .light_grid_style(&WHITE.mix(0.1))
        .max_light_lines(3)
        .draw()?;

    let mut cells = Vec::new();
    for x_idx in 0..chart.xs.len().saturating_sub(1) {
        for z_idx in 0..chart.zs.len().saturating_sub(1) {
            let corners = [(x_idx, z_idx), (x_idx + 1, z_idx), (x_idx + 1, z_idx + 1), (x_idx, z_idx + 1)];
            let corner_heights = corners.map(|(x, z)| height(x, z));
            if corner_heights.iter().any(|h| !h.is_finite()) {
                continue;
            }
            let mean = corner_heights.iter().sum::<f64>() / 4.0;
            let points: Vec<(f64, f64, f64)> = corners.iter()
                .zip(corner_heights)
                .map(|((x, z), h)| (chart.xs[*x], h, chart.zs[*z]))
                .collect();
            let colour = heat_colour((mean - y_min) / (y_max - y_min));
            cells.push(Polygon::new(points, colour.mix(0.85).filled()));
        }
    }
    context.draw_series(cells)?;

    let text_style = TextStyle::from(("sans-serif", 14)).color(&WHITE);
    let axes = format!("x: {}   z: {}   height: {}", chart.x_desc, chart.z_desc, chart.height_desc);
    root.draw_text(&axes, &text_style, (20, size.1 as i32 - 30))?;
    root.present()?;
    Ok(())
}

/// Blue for the lowest values through to red for the highest
fn heat_colour(fraction: f64) -> HSLColor {
    let clamped = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    HSLColor((1.0 - clamped) * (240.0 / 360.0), 0.8, 0.5)
}

/// Range covering all `values`, widened when degenerate so plotters always gets a
/// non-empty axis. `include_zero` keeps the origin in view for value axes.
fn axis_bounds<I: Iterator<Item = f64>>(values: I, include_zero: bool) -> (f64, f64) {
    let (mut min, mut max) = match values.filter(|v| v.is_finite()).minmax() {
        MinMaxResult::NoElements => return (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(lo, hi) => (lo, hi)
    };
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
        let padding = (max - min) * 0.05;
        min -= padding;
        max += padding;
    }
    if max - min < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }
    (min, max)
}

fn two_decimals(x: &f64) -> String {
    format!("{:.2}", x)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use aircraft_load::{run_analysis, AircraftConfig, Analysis, AnalysisRequest};
    use micro_class::{score_surface, sweep_score, ScoreRequest, SecondaryAxisPolicy};
    use super::*;

    fn temp_svg(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("payload-planner-{}-{}.svg", name, std::process::id()))
    }

    #[test]
    fn axis_bounds_degenerate_and_empty() {
        assert_eq!(axis_bounds(std::iter::empty(), true), (0.0, 1.0));
        assert_eq!(axis_bounds([2.0, 2.0].into_iter(), false), (1.0, 3.0));
        let (lo, hi) = axis_bounds([1.0, 5.0].into_iter(), true);
        assert!(lo < 0.0 && hi > 5.0);
        assert_eq!(axis_bounds([0.1, 3.0].into_iter(), false), (0.1, 3.0));
    }

    #[test]
    fn heat_colour_runs_blue_to_red() {
        assert_eq!(heat_colour(0.0).0, 240.0 / 360.0);
        assert_eq!(heat_colour(1.0).0, 0.0);
        assert_eq!(heat_colour(f64::NAN).0, 240.0 / 360.0);
    }

    #[test]
    fn payload_curve_chart_is_written() {
        let request = AnalysisRequest::new(AircraftConfig::default(), 3.0).unwrap();
        let Analysis::Curve(curve) = run_analysis(&request) else { panic!("expected a curve") };
        let path = temp_svg("curve");
        draw_payload_curve(&path, (640, 480), &curve).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Payload vs wing area"));
    }

    #[test]
    fn payload_surface_chart_is_written() {
        let selection = "wind=0:5".parse().unwrap();
        let request = AnalysisRequest::new(AircraftConfig::default(), 2.0).unwrap().with_range(selection);
        let Analysis::Surface(surface) = run_analysis(&request) else { panic!("expected a surface") };
        let path = temp_svg("payload-surface");
        draw_payload_surface(&path, (640, 480), &surface).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("Payload vs wing area and wind"));
    }

    #[test]
    fn score_charts_are_written() {
        let request = ScoreRequest::default();
        let curve = sweep_score(&request);
        let surface = score_surface(&request, &SecondaryAxisPolicy::default()).unwrap();

        let curve_path = temp_svg("score-curve");
        let surface_path = temp_svg("score-surface");
        draw_score_curve(&curve_path, (640, 480), &curve).unwrap();
        draw_score_surface(&surface_path, (640, 480), &surface).unwrap();
        for path in [curve_path, surface_path] {
            let svg = fs::read_to_string(&path).unwrap();
            fs::remove_file(&path).unwrap();
            assert!(svg.contains("<polygon") || svg.contains("<polyline"));
        }
    }
}
