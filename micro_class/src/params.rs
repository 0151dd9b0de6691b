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

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::{Error, ErrorKind, Result};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum ScoreParameter {
    #[serde(rename = "w_payload")]
    PayloadWeight,
    #[serde(rename = "w_empty")]
    EmptyWeight,
    #[serde(rename = "wingspan")]
    Wingspan,
    #[serde(rename = "takeoff_distance")]
    TakeoffDistance
}

impl ScoreParameter {
    pub const ALL: [ScoreParameter; 4] = [
        ScoreParameter::PayloadWeight,
        ScoreParameter::EmptyWeight,
        ScoreParameter::Wingspan,
        ScoreParameter::TakeoffDistance
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScoreParameter::PayloadWeight => "w_payload",
            ScoreParameter::EmptyWeight => "w_empty",
            ScoreParameter::Wingspan => "wingspan",
            ScoreParameter::TakeoffDistance => "takeoff_distance"
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreParameter::PayloadWeight => "W_Payload (lbs)",
            ScoreParameter::EmptyWeight => "W_Empty (lbs)",
            ScoreParameter::Wingspan => "Wingspan (ft)",
            ScoreParameter::TakeoffDistance => "Takeoff Distance (ft)"
        }
    }

    pub fn default_value(&self) -> f64 {
        ScoreInputs::default().get(*self)
    }

    pub fn default_range(&self) -> SampleRange {
        let (min, max) = match self {
            ScoreParameter::PayloadWeight => (5.0, 20.0),
            ScoreParameter::EmptyWeight => (10.0, 25.0),
            ScoreParameter::Wingspan => (5.0, 15.0),
            ScoreParameter::TakeoffDistance => (0.0, 50.0)
        };
        SampleRange { min, max, points: SampleRange::DEFAULT_POINTS }
    }
}

impl Display for ScoreParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ScoreParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().replace('-', "_");
        ScoreParameter::ALL.iter()
            .find(|p| p.key().eq_ignore_ascii_case(&key))
            .copied()
            .ok_or_else(|| {
                Error::new(ErrorKind::UnknownParameter,
                           format!("'{}'. Expected one of {}",
                                   s.trim(),
                                   ScoreParameter::ALL.map(|p| p.key()).join(", ")))
            })
    }
}

/// Fixed values of the four scoring inputs
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreInputs {
    pub w_payload: f64,
    pub w_empty: f64,
    pub wingspan: f64,
    pub takeoff_distance: f64
}

impl Default for ScoreInputs {
    fn default() -> Self {
        ScoreInputs {
            w_payload: 10.0,
            w_empty: 12.0,
            wingspan: 10.0,
            takeoff_distance: 20.0
        }
    }
}

impl ScoreInputs {
    pub fn get(&self, parameter: ScoreParameter) -> f64 {
        match parameter {
            ScoreParameter::PayloadWeight => self.w_payload,
            ScoreParameter::EmptyWeight => self.w_empty,
            ScoreParameter::Wingspan => self.wingspan,
            ScoreParameter::TakeoffDistance => self.takeoff_distance
        }
    }

    pub fn set(&mut self, parameter: ScoreParameter, value: f64) {
        match parameter {
            ScoreParameter::PayloadWeight => self.w_payload = value,
            ScoreParameter::EmptyWeight => self.w_empty = value,
            ScoreParameter::Wingspan => self.wingspan = value,
            ScoreParameter::TakeoffDistance => self.takeoff_distance = value
        }
    }

    pub fn with(mut self, parameter: ScoreParameter, value: f64) -> ScoreInputs {
        self.set(parameter, value);
        self
    }
}

/// A `key=value` pair as given on the command line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreAssignment {
    pub parameter: ScoreParameter,
    pub value: f64
}

impl FromStr for ScoreAssignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s.split_once('=').ok_or_else(|| {
            Error::new(ErrorKind::ArgumentError, format!("expected key=value, got '{}'", s))
        })?;
        Ok(ScoreAssignment {
            parameter: key.parse()?,
            value: value.trim().parse::<f64>()?
        })
    }
}

/// `[min, max]` sampled at `points` evenly spaced values
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SampleRange {
    min: f64,
    max: f64,
    points: usize
}

impl SampleRange {
    pub const DEFAULT_POINTS: usize = 30;

    pub fn new(min: f64, max: f64, points: usize) -> Result<SampleRange> {
        if !(min < max) {
            return Err(Error::new(ErrorKind::InvalidRange,
                                  format!("min ({}) must be less than max ({})", min, max)));
        }
        if points < 2 {
            return Err(Error::new(ErrorKind::InvalidRange,
                                  format!("at least 2 points are needed, got {}", points)));
        }
        Ok(SampleRange { min, max, points })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn values(&self) -> Vec<f64> {
        utils::numeric::linspace(self.min, self.max, self.points)
    }
}

/// The one parameter being swept, parsed from `key`, `key=min:max` or `key=min:max:points`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariedParameter {
    pub parameter: ScoreParameter,
    pub range: SampleRange
}

impl VariedParameter {
    pub fn with_default_range(parameter: ScoreParameter) -> VariedParameter {
        VariedParameter { parameter, range: parameter.default_range() }
    }
}

impl Default for VariedParameter {
    fn default() -> Self {
        VariedParameter::with_default_range(ScoreParameter::PayloadWeight)
    }
}

impl FromStr for VariedParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, bounds) = match s.split_once('=') {
            Some((key, bounds)) => (key, Some(bounds)),
            None => (s, None)
        };
        let parameter: ScoreParameter = key.parse()?;
        let bounds = match bounds {
            None => return Ok(VariedParameter::with_default_range(parameter)),
            Some(bounds) => bounds
        };
        let parts: Vec<&str> = bounds.split(':').map(str::trim).collect();
        let range = match parts.as_slice() {
            [min, max] => SampleRange::new(min.parse()?, max.parse()?, SampleRange::DEFAULT_POINTS)?,
            [min, max, points] => SampleRange::new(min.parse()?, max.parse()?, points.parse()?)?,
            _ => return Err(Error::new(ErrorKind::ArgumentError,
                                       format!("expected {}=min:max[:points], got '{}'", parameter.key(), s)))
        };
        Ok(VariedParameter { parameter, range })
    }
}

/// Fixed inputs plus the parameter being swept. Falls back to varying the payload weight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreRequest {
    pub inputs: ScoreInputs,
    pub varied: VariedParameter
}

impl ScoreRequest {
    pub fn new(inputs: ScoreInputs, varied: Option<VariedParameter>) -> ScoreRequest {
        ScoreRequest { inputs, varied: varied.unwrap_or_default() }
    }
}
