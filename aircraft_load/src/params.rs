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
use crate::model::MassSearchStrategy;

/// Lower bound of every wing area sweep (m²)
pub const MIN_WING_AREA: f64 = 0.1;
pub const DEFAULT_MAX_WING_AREA: f64 = 3.0;

/// The eight scalar inputs of the load calculator that can be swept alongside wing area
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum AircraftParameter {
    #[serde(rename = "cl")]
    LiftCoefficient,
    #[serde(rename = "cd")]
    DragCoefficient,
    #[serde(rename = "fn")]
    NominalThrust,
    #[serde(rename = "wind")]
    WindSpeed,
    #[serde(rename = "wing_mass_coeff")]
    WingMassCoefficient,
    #[serde(rename = "fixed_mass")]
    FixedMass,
    #[serde(rename = "max_distance")]
    MaxTakeoffDistance,
    #[serde(rename = "max_takeoff_mass")]
    MaxTakeoffMass
}

impl AircraftParameter {
    pub const ALL: [AircraftParameter; 8] = [
        AircraftParameter::LiftCoefficient,
        AircraftParameter::DragCoefficient,
        AircraftParameter::NominalThrust,
        AircraftParameter::WindSpeed,
        AircraftParameter::WingMassCoefficient,
        AircraftParameter::FixedMass,
        AircraftParameter::MaxTakeoffDistance,
        AircraftParameter::MaxTakeoffMass
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AircraftParameter::LiftCoefficient => "cl",
            AircraftParameter::DragCoefficient => "cd",
            AircraftParameter::NominalThrust => "fn",
            AircraftParameter::WindSpeed => "wind",
            AircraftParameter::WingMassCoefficient => "wing_mass_coeff",
            AircraftParameter::FixedMass => "fixed_mass",
            AircraftParameter::MaxTakeoffDistance => "max_distance",
            AircraftParameter::MaxTakeoffMass => "max_takeoff_mass"
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AircraftParameter::LiftCoefficient => "Lift coefficient (Cl)",
            AircraftParameter::DragCoefficient => "Drag coefficient (Cd)",
            AircraftParameter::NominalThrust => "Nominal thrust (Fn)",
            AircraftParameter::WindSpeed => "Wind speed (m/s)",
            AircraftParameter::WingMassCoefficient => "Wing mass (kg/m²)",
            AircraftParameter::FixedMass => "Fixed mass (kg)",
            AircraftParameter::MaxTakeoffDistance => "Max takeoff distance (m)",
            AircraftParameter::MaxTakeoffMass => "Max takeoff mass (kg)"
        }
    }

    pub fn default_value(&self) -> f64 {
        AircraftConfig::default().get(*self)
    }

    /// The range offered when this parameter is selected for a surface sweep
    pub fn default_range(&self) -> ParameterRange {
        let (min, max) = match self {
            AircraftParameter::LiftCoefficient => (1.2, 1.8),
            AircraftParameter::DragCoefficient => (0.02, 0.05),
            AircraftParameter::NominalThrust => (45.0, 65.0),
            AircraftParameter::WindSpeed => (-5.0, 10.0),
            AircraftParameter::WingMassCoefficient => (1.0, 2.0),
            AircraftParameter::FixedMass => (1.5, 3.0),
            AircraftParameter::MaxTakeoffDistance => (20.0, 50.0),
            AircraftParameter::MaxTakeoffMass => (18.0, 30.0)
        };
        ParameterRange { min, max }
    }
}

impl Display for AircraftParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AircraftParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        AircraftParameter::ALL.iter()
            .find(|p| p.key().eq_ignore_ascii_case(key))
            .copied()
            .ok_or_else(|| {
                Error::new(ErrorKind::UnknownParameter,
                           format!("'{}'. Expected one of {}",
                                   key,
                                   AircraftParameter::ALL.map(|p| p.key()).join(", ")))
            })
    }
}

/// Immutable snapshot of the physical inputs for one evaluation.
///
/// Wing area is deliberately absent; it is always supplied by the caller as the
/// independent variable of a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AircraftConfig {
    #[serde(rename = "cl")]
    pub lift_coefficient: f64,
    #[serde(rename = "cd")]
    pub drag_coefficient: f64,
    #[serde(rename = "fn")]
    pub nominal_thrust: f64,
    /// Headwind positive
    #[serde(rename = "wind")]
    pub wind_speed: f64,
    #[serde(rename = "wing_mass_coeff")]
    pub wing_mass_coefficient: f64,
    pub fixed_mass: f64,
    #[serde(rename = "max_distance")]
    pub max_takeoff_distance: f64,
    pub max_takeoff_mass: f64
}

impl Default for AircraftConfig {
    fn default() -> Self {
        AircraftConfig {
            lift_coefficient: 1.4,
            drag_coefficient: 0.03,
            nominal_thrust: 52.86,
            wind_speed: 0.0,
            wing_mass_coefficient: 1.4,
            fixed_mass: 2.0,
            max_takeoff_distance: 30.0,
            max_takeoff_mass: 24.0
        }
    }
}

impl AircraftConfig {
    pub fn get(&self, parameter: AircraftParameter) -> f64 {
        match parameter {
            AircraftParameter::LiftCoefficient => self.lift_coefficient,
            AircraftParameter::DragCoefficient => self.drag_coefficient,
            AircraftParameter::NominalThrust => self.nominal_thrust,
            AircraftParameter::WindSpeed => self.wind_speed,
            AircraftParameter::WingMassCoefficient => self.wing_mass_coefficient,
            AircraftParameter::FixedMass => self.fixed_mass,
            AircraftParameter::MaxTakeoffDistance => self.max_takeoff_distance,
            AircraftParameter::MaxTakeoffMass => self.max_takeoff_mass
        }
    }

    pub fn set(&mut self, parameter: AircraftParameter, value: f64) {
        let field = match parameter {
            AircraftParameter::LiftCoefficient => &mut self.lift_coefficient,
            AircraftParameter::DragCoefficient => &mut self.drag_coefficient,
            AircraftParameter::NominalThrust => &mut self.nominal_thrust,
            AircraftParameter::WindSpeed => &mut self.wind_speed,
            AircraftParameter::WingMassCoefficient => &mut self.wing_mass_coefficient,
            AircraftParameter::FixedMass => &mut self.fixed_mass,
            AircraftParameter::MaxTakeoffDistance => &mut self.max_takeoff_distance,
            AircraftParameter::MaxTakeoffMass => &mut self.max_takeoff_mass
        };
        *field = value;
    }

    /// Copy of this configuration with one parameter substituted
    pub fn with(mut self, parameter: AircraftParameter, value: f64) -> AircraftConfig {
        self.set(parameter, value);
        self
    }

    /// Mass of the airframe alone: wing mass for the given area plus the fixed mass
    pub fn empty_mass(&self, area: f64) -> f64 {
        (area * self.wing_mass_coefficient) + self.fixed_mass
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ParameterRange {
    min: f64,
    max: f64
}

impl ParameterRange {
    pub fn new(min: f64, max: f64) -> Result<ParameterRange> {
        if !(min < max) {
            return Err(Error::new(ErrorKind::InvalidRange,
                                  format!("min ({}) must be less than max ({})", min, max)));
        }
        Ok(ParameterRange { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn samples(&self, points: usize) -> Vec<f64> {
        utils::numeric::linspace(self.min, self.max, points)
    }
}

/// A `key=value` pair as given on the command line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterAssignment {
    pub parameter: AircraftParameter,
    pub value: f64
}

impl FromStr for ParameterAssignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s.split_once('=').ok_or_else(|| {
            Error::new(ErrorKind::ArgumentError, format!("expected key=value, got '{}'", s))
        })?;
        Ok(ParameterAssignment {
            parameter: key.parse()?,
            value: value.trim().parse::<f64>()?
        })
    }
}

/// A `key=min:max` selection of the parameter to sweep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeSelection {
    pub parameter: AircraftParameter,
    pub range: ParameterRange
}

impl FromStr for RangeSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, bounds) = match s.split_once('=') {
            Some((key, bounds)) => (key, Some(bounds)),
            None => (s, None)
        };
        let parameter: AircraftParameter = key.parse()?;
        let range = match bounds {
            None => parameter.default_range(),
            Some(bounds) => {
                let (min, max) = bounds.split_once(':').ok_or_else(|| {
                    Error::new(ErrorKind::ArgumentError,
                               format!("expected {}=min:max, got '{}'", parameter.key(), s))
                })?;
                ParameterRange::new(min.trim().parse()?, max.trim().parse()?)?
            }
        };
        Ok(RangeSelection { parameter, range })
    }
}

/// Everything a single run of the load calculator needs.
///
/// At most one parameter may be ranged; selecting another replaces the previous selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisRequest {
    config: AircraftConfig,
    max_area: f64,
    selection: Option<RangeSelection>,
    strategy: MassSearchStrategy
}

impl AnalysisRequest {
    pub fn new(config: AircraftConfig, max_area: f64) -> Result<AnalysisRequest> {
        if !(max_area > MIN_WING_AREA) {
            return Err(Error::new(ErrorKind::InvalidArea,
                                  format!("max wing area ({}) must exceed {}", max_area, MIN_WING_AREA)));
        }
        Ok(AnalysisRequest { config, max_area, selection: None, strategy: MassSearchStrategy::default() })
    }

    pub fn with_range(mut self, selection: RangeSelection) -> AnalysisRequest {
        self.selection = Some(selection);
        self
    }

    pub fn with_strategy(mut self, strategy: MassSearchStrategy) -> AnalysisRequest {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &AircraftConfig {
        &self.config
    }

    pub fn max_area(&self) -> f64 {
        self.max_area
    }

    pub fn selection(&self) -> Option<RangeSelection> {
        self.selection
    }

    pub fn strategy(&self) -> MassSearchStrategy {
        self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_keys_round_trip() {
        for parameter in AircraftParameter::ALL {
            assert_eq!(parameter.key().parse::<AircraftParameter>().unwrap(), parameter);
        }
        assert_eq!("CL".parse::<AircraftParameter>().unwrap(), AircraftParameter::LiftCoefficient);
        let err = "area".parse::<AircraftParameter>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownParameter);
    }

    #[test]
    fn default_ranges_contain_defaults() {
        for parameter in AircraftParameter::ALL {
            let range = parameter.default_range();
            assert!(range.min() < range.max());
            let value = parameter.default_value();
            assert!(value >= range.min() && value <= range.max(), "{} default outside range", parameter);
        }
    }

    #[test]
    fn substitution_touches_one_field() {
        let base = AircraftConfig::default();
        let varied = base.with(AircraftParameter::NominalThrust, 60.0);
        assert_eq!(varied.nominal_thrust, 60.0);
        for parameter in AircraftParameter::ALL {
            if parameter != AircraftParameter::NominalThrust {
                assert_eq!(varied.get(parameter), base.get(parameter));
            }
        }
        assert_eq!(base.nominal_thrust, 52.86);
    }

    #[test]
    fn empty_mass_is_wing_plus_fixed() {
        let config = AircraftConfig::default();
        assert!((config.empty_mass(1.0) - 3.4).abs() < 1e-12);
        assert!((config.empty_mass(0.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn range_requires_min_below_max() {
        assert!(ParameterRange::new(1.0, 2.0).is_ok());
        assert_eq!(ParameterRange::new(2.0, 2.0).unwrap_err().kind(), ErrorKind::InvalidRange);
        assert_eq!(ParameterRange::new(3.0, 2.0).unwrap_err().kind(), ErrorKind::InvalidRange);
        assert!(ParameterRange::new(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn parse_assignments() {
        let assignment: ParameterAssignment = "fn=60.5".parse().unwrap();
        assert_eq!(assignment.parameter, AircraftParameter::NominalThrust);
        assert_eq!(assignment.value, 60.5);

        let negative: ParameterAssignment = "wind = -3".parse().unwrap();
        assert_eq!(negative.parameter, AircraftParameter::WindSpeed);
        assert_eq!(negative.value, -3.0);

        assert_eq!("cl".parse::<ParameterAssignment>().unwrap_err().kind(), ErrorKind::ArgumentError);
        assert_eq!("cl=abc".parse::<ParameterAssignment>().unwrap_err().kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn parse_range_selection() {
        let selection: RangeSelection = "wind=-5:10".parse().unwrap();
        assert_eq!(selection.parameter, AircraftParameter::WindSpeed);
        assert_eq!(selection.range.min(), -5.0);
        assert_eq!(selection.range.max(), 10.0);

        let defaulted: RangeSelection = "cd".parse().unwrap();
        assert_eq!(defaulted.range, AircraftParameter::DragCoefficient.default_range());

        assert_eq!("cd=0.05:0.02".parse::<RangeSelection>().unwrap_err().kind(), ErrorKind::InvalidRange);
        assert_eq!("cd=0.05".parse::<RangeSelection>().unwrap_err().kind(), ErrorKind::ArgumentError);
    }

    #[test]
    fn request_validates_max_area() {
        assert!(AnalysisRequest::new(AircraftConfig::default(), 3.0).is_ok());
        let err = AnalysisRequest::new(AircraftConfig::default(), 0.1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArea);
    }

    #[test]
    fn only_latest_range_selection_is_kept() {
        let request = AnalysisRequest::new(AircraftConfig::default(), 2.0).unwrap()
            .with_range("cl".parse().unwrap())
            .with_range("fn=45:65".parse().unwrap());
        assert_eq!(request.selection().unwrap().parameter, AircraftParameter::NominalThrust);
    }

}
