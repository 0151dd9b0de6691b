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
use itertools::iproduct;
use ndarray::Array2;
use serde::Serialize;
use tracing::{debug, info};
use utils::numeric::first_max_index;
use crate::error::{Error, ErrorKind, Result};
use crate::params::{SampleRange, ScoreInputs, ScoreParameter, ScoreRequest, VariedParameter};
use crate::score::{flight_score, FlightScore};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoreSample {
    /// Value of the varied parameter
    pub value: f64,
    pub inputs: ScoreInputs,
    pub result: FlightScore
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreCurve {
    parameter: ScoreParameter,
    samples: Vec<ScoreSample>,
    optimum_idx: Option<usize>
}

impl ScoreCurve {
    pub fn parameter(&self) -> ScoreParameter {
        self.parameter
    }

    pub fn samples(&self) -> &[ScoreSample] {
        &self.samples
    }

    /// Best sample of the sweep. Only as precise as the sample grid.
    pub fn optimum(&self) -> Option<&ScoreSample> {
        self.optimum_idx.and_then(|idx| self.samples.get(idx))
    }

    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.value, s.result.score)).collect()
    }
}

/// Sweep the varied parameter with everything else held at its fixed value and
/// pick the highest scoring sample.
pub fn sweep_score(request: &ScoreRequest) -> ScoreCurve {
    let VariedParameter { parameter, range } = request.varied;
    info!("Sweeping flight score over {} {} values in [{}, {}]",
          range.points(), parameter, range.min(), range.max());
    let samples: Vec<ScoreSample> = range.values().into_iter().map(|value| {
        let inputs = request.inputs.with(parameter, value);
        ScoreSample { value, inputs, result: flight_score(&inputs) }
    }).collect();

    let scores: Vec<f64> = samples.iter().map(|s| s.result.score).collect();
    let optimum_idx = first_max_index(&scores).map(|(idx, _)| idx);
    if let Some(idx) = optimum_idx {
        debug!("Best flight score {:.2} at {}={:.2}", scores[idx], parameter, samples[idx].value);
    }
    ScoreCurve { parameter, samples, optimum_idx }
}

/// Chooses the second axis of the score surface: the first parameter in the preference
/// order that isn't already being varied, swept over its configured range.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondaryAxisPolicy {
    preference: Vec<ScoreParameter>,
    ranges: BTreeMap<ScoreParameter, SampleRange>
}

impl Default for SecondaryAxisPolicy {
    fn default() -> Self {
        SecondaryAxisPolicy::new(ScoreParameter::ALL.to_vec())
    }
}

impl SecondaryAxisPolicy {
    pub fn new(preference: Vec<ScoreParameter>) -> SecondaryAxisPolicy {
        let ranges = ScoreParameter::ALL.iter().map(|p| (*p, p.default_range())).collect();
        SecondaryAxisPolicy { preference, ranges }
    }

    /// Build from parameter keys, e.g. as read from settings
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Result<SecondaryAxisPolicy> {
        let preference = keys.iter()
            .map(|key| key.as_ref().parse::<ScoreParameter>())
            .collect::<Result<Vec<_>>>()?;
        Ok(SecondaryAxisPolicy::new(preference))
    }

    pub fn with_range(mut self, parameter: ScoreParameter, range: SampleRange) -> SecondaryAxisPolicy {
        self.ranges.insert(parameter, range);
        self
    }

    pub fn preference(&self) -> &[ScoreParameter] {
        &self.preference
    }

    pub fn secondary_for(&self, primary: ScoreParameter) -> Option<VariedParameter> {
        self.preference.iter()
            .find(|p| **p != primary)
            .map(|p| VariedParameter {
                parameter: *p,
                range: self.ranges.get(p).copied().unwrap_or_else(|| p.default_range())
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    primary: ScoreParameter,
    secondary: ScoreParameter,
    primary_values: Vec<f64>,
    secondary_values: Vec<f64>,
    /// Indexed `[primary_idx, secondary_idx]`
    scores: Array2<f64>
}

impl ScoreSurface {
    pub fn primary(&self) -> ScoreParameter {
        self.primary
    }

    pub fn secondary(&self) -> ScoreParameter {
        self.secondary
    }

    pub fn primary_values(&self) -> &[f64] {
        &self.primary_values
    }

    pub fn secondary_values(&self) -> &[f64] {
        &self.secondary_values
    }

    pub fn scores(&self) -> &Array2<f64> {
        &self.scores
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.scores.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

/// Score grid over the varied parameter and the policy's secondary parameter.
/// Rendering only; no optimum is searched for.
pub fn score_surface(request: &ScoreRequest, policy: &SecondaryAxisPolicy) -> Result<ScoreSurface> {
    let primary = request.varied;
    let secondary = policy.secondary_for(primary.parameter).ok_or_else(|| {
        Error::new(ErrorKind::NoSecondaryAxis,
                   format!("preference order {:?} has nothing besides {}",
                           policy.preference().iter().map(|p| p.key()).collect::<Vec<_>>(),
                           primary.parameter))
    })?;
    let primary_values = primary.range.values();
    let secondary_values = secondary.range.values();
    info!("Building {}x{} flight score surface over {} and {}",
          primary_values.len(), secondary_values.len(), primary.parameter, secondary.parameter);

    let mut scores = Array2::<f64>::zeros((primary_values.len(), secondary_values.len()));
    for ((i, x), (j, y)) in iproduct!(primary_values.iter().enumerate(), secondary_values.iter().enumerate()) {
        let inputs = request.inputs
            .with(primary.parameter, *x)
            .with(secondary.parameter, *y);
        scores[[i, j]] = flight_score(&inputs).score;
    }

    Ok(ScoreSurface {
        primary: primary.parameter,
        secondary: secondary.parameter,
        primary_values,
        secondary_values,
        scores
    })
}
