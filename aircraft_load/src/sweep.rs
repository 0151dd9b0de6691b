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

use itertools::iproduct;
use ndarray::Array2;
use serde::Serialize;
use tracing::{debug, info};
use utils::numeric::{first_max_index, linspace};
use crate::model::{MassSearch, MassSearchStrategy};
use crate::params::{AircraftConfig, AircraftParameter, AnalysisRequest, RangeSelection, MIN_WING_AREA};

/// Wing areas evaluated for the payload curve
pub const CURVE_AREA_POINTS: usize = 101;
/// Samples per axis of the payload surface
pub const SURFACE_GRID_POINTS: usize = 26;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PayloadPoint {
    pub area: f64,
    pub empty_mass: f64,
    /// Zero when nothing is feasible at this area
    pub max_mass: f64,
    pub payload: f64
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BestConfiguration {
    pub area: f64,
    pub total_mass: f64,
    pub payload: f64,
    pub takeoff_distance: f64
}

#[derive(Clone, Debug, PartialEq)]
pub struct PayloadCurve {
    config: AircraftConfig,
    points: Vec<PayloadPoint>,
    best: Option<BestConfiguration>
}

impl PayloadCurve {
    pub fn config(&self) -> &AircraftConfig {
        &self.config
    }

    pub fn points(&self) -> &[PayloadPoint] {
        &self.points
    }

    /// The area giving the largest positive payload, if there is one
    pub fn best(&self) -> Option<&BestConfiguration> {
        self.best.as_ref()
    }

    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.area, p.payload)).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PayloadSurface {
    config: AircraftConfig,
    parameter: AircraftParameter,
    areas: Vec<f64>,
    parameter_values: Vec<f64>,
    /// Indexed `[parameter_idx, area_idx]`
    payload: Array2<f64>
}

impl PayloadSurface {
    pub fn config(&self) -> &AircraftConfig {
        &self.config
    }

    pub fn parameter(&self) -> AircraftParameter {
        self.parameter
    }

    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    pub fn parameter_values(&self) -> &[f64] {
        &self.parameter_values
    }

    pub fn payload(&self) -> &Array2<f64> {
        &self.payload
    }

    pub fn payload_at(&self, parameter_idx: usize, area_idx: usize) -> Option<f64> {
        self.payload.get((parameter_idx, area_idx)).copied()
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.payload.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Analysis {
    Curve(PayloadCurve),
    Surface(PayloadSurface)
}

/// Max mass and payload for one wing area
pub fn evaluate_area(config: &AircraftConfig, area: f64, strategy: MassSearchStrategy) -> PayloadPoint {
    let search = MassSearch::new(config, area).with_strategy(strategy);
    let empty_mass = search.empty_mass();
    let max_mass = search.max_mass();
    let payload = if max_mass > 0.0 { max_mass - empty_mass } else { 0.0 };
    PayloadPoint { area, empty_mass, max_mass, payload }
}

pub fn sweep_payload_curve(config: &AircraftConfig, max_area: f64, strategy: MassSearchStrategy) -> PayloadCurve {
    info!("Sweeping payload over {} wing areas in [{}, {}] m²", CURVE_AREA_POINTS, MIN_WING_AREA, max_area);
    let points: Vec<PayloadPoint> = linspace(MIN_WING_AREA, max_area, CURVE_AREA_POINTS).into_iter()
        .map(|area| evaluate_area(config, area, strategy))
        .collect();

    let payloads: Vec<f64> = points.iter().map(|p| p.payload).collect();
    let best = match first_max_index(&payloads) {
        Some((idx, payload)) if payload > 0.0 => {
            let point = &points[idx];
            let search = MassSearch::new(config, point.area);
            let best = BestConfiguration {
                area: point.area,
                total_mass: point.max_mass,
                payload,
                takeoff_distance: search.takeoff_distance(point.max_mass)
            };
            info!("Best payload {:.2}kg at wing area {:.3}m²", best.payload, best.area);
            Some(best)
        }
        _ => {
            info!("No wing area gives a positive payload");
            None
        }
    };
    PayloadCurve { config: *config, points, best }
}

pub fn sweep_payload_surface(config: &AircraftConfig,
                             selection: RangeSelection,
                             max_area: f64,
                             strategy: MassSearchStrategy) -> PayloadSurface {
    let areas = linspace(MIN_WING_AREA, max_area, SURFACE_GRID_POINTS);
    let parameter_values = selection.range.samples(SURFACE_GRID_POINTS);
    info!("Sweeping payload surface of {}x{} over wing area and {} in [{}, {}]",
          parameter_values.len(), areas.len(), selection.parameter,
          selection.range.min(), selection.range.max());

    let mut payload = Array2::<f64>::zeros((parameter_values.len(), areas.len()));
    for ((row, value), (col, area)) in iproduct!(parameter_values.iter().enumerate(), areas.iter().enumerate()) {
        let cell_config = config.with(selection.parameter, *value);
        payload[[row, col]] = evaluate_area(&cell_config, *area, strategy).payload;
    }
    debug!("Payload surface complete");

    PayloadSurface {
        config: *config,
        parameter: selection.parameter,
        areas,
        parameter_values,
        payload
    }
}

/// Run whichever sweep the request calls for: a payload curve when nothing is ranged,
/// otherwise a payload surface over wing area and the ranged parameter.
pub fn run_analysis(request: &AnalysisRequest) -> Analysis {
    match request.selection() {
        None => Analysis::Curve(
            sweep_payload_curve(request.config(), request.max_area(), request.strategy())
        ),
        Some(selection) => Analysis::Surface(
            sweep_payload_surface(request.config(), selection, request.max_area(), request.strategy())
        )
    }
}
