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
use tracing::{debug, warn};
use crate::error::{Error, ErrorKind};
use crate::model::{AIR_DENSITY, GRAVITY};
use crate::model::takeoff::TakeoffSimulator;
use crate::params::AircraftConfig;

/// The search never looks further than this above the empty mass (kg)
const MASS_SEARCH_HEADROOM: f64 = 200.0;
const MAX_BISECTION_ITERATIONS: usize = 50;
/// Bisection stops once the bracket is narrower than this (kg)
const MASS_TOLERANCE: f64 = 0.01;
const MONOTONICITY_SAMPLES: usize = 32;
const LINEAR_SCAN_SAMPLES: usize = 400;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassSearchStrategy {
    /// Plain bisection, trusting that feasibility falls off monotonically with mass
    #[default]
    Bisection,
    /// Sample the feasibility predicate first and fall back to a linear scan
    /// if it isn't monotone over the search interval
    Verified
}

impl MassSearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassSearchStrategy::Bisection => "bisection",
            MassSearchStrategy::Verified => "verified"
        }
    }
}

impl Display for MassSearchStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MassSearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bisection" => Ok(MassSearchStrategy::Bisection),
            "verified" => Ok(MassSearchStrategy::Verified),
            other => Err(Error::new(ErrorKind::InvalidValue,
                                    format!("unknown mass search strategy '{}'", other)))
        }
    }
}

/// Airspeed (m/s) at which the wing lifts `mass`
pub fn required_liftoff_airspeed(config: &AircraftConfig, wing_area: f64, mass: f64) -> f64 {
    ((2.0 * mass * GRAVITY) / (config.lift_coefficient * AIR_DENSITY * wing_area)).sqrt()
}

pub struct MassSearch {
    config: AircraftConfig,
    wing_area: f64,
    strategy: MassSearchStrategy,
    simulator: TakeoffSimulator
}

impl MassSearch {
    pub fn new(config: &AircraftConfig, wing_area: f64) -> MassSearch {
        MassSearch {
            config: *config,
            wing_area,
            strategy: MassSearchStrategy::default(),
            simulator: TakeoffSimulator::new(config, wing_area)
        }
    }

    pub fn with_strategy(mut self, strategy: MassSearchStrategy) -> MassSearch {
        self.strategy = strategy;
        self
    }

    pub fn wing_area(&self) -> f64 {
        self.wing_area
    }

    pub fn empty_mass(&self) -> f64 {
        self.config.empty_mass(self.wing_area)
    }

    /// The `[empty, upper]` mass bracket, or `None` if the airframe alone is over the limit
    pub fn search_interval(&self) -> Option<(f64, f64)> {
        let empty_mass = self.empty_mass();
        if empty_mass > self.config.max_takeoff_mass {
            return None;
        }
        Some((empty_mass, (empty_mass + MASS_SEARCH_HEADROOM).min(self.config.max_takeoff_mass)))
    }

    /// Ground speed needed for liftoff once the headwind is taken off the airspeed
    pub fn required_ground_speed(&self, mass: f64) -> f64 {
        required_liftoff_airspeed(&self.config, self.wing_area, mass) - self.config.wind_speed
    }

    /// Roll distance (m) to liftoff at `mass`. Zero if the wind alone provides enough lift
    pub fn takeoff_distance(&self, mass: f64) -> f64 {
        let ground_speed = self.required_ground_speed(mass);
        if ground_speed <= 0.0 {
            return 0.0;
        }
        self.simulator.takeoff_distance(mass, ground_speed)
    }

    pub fn is_feasible(&self, mass: f64) -> bool {
        let ground_speed = self.required_ground_speed(mass);
        if ground_speed <= 0.0 {
            // Already lifting while standing still
            return true;
        }
        self.simulator.takeoff_distance(mass, ground_speed) <= self.config.max_takeoff_distance
    }

    /// Heaviest total mass (kg) that still takes off within the distance limit.
    /// Zero if no mass above the empty mass is feasible.
    pub fn max_mass(&self) -> f64 {
        let (lower, upper) = match self.search_interval() {
            Some(interval) => interval,
            None => return 0.0
        };
        match self.strategy {
            MassSearchStrategy::Bisection => self.bisect(lower, upper),
            MassSearchStrategy::Verified => {
                if self.feasibility_is_monotonic(MONOTONICITY_SAMPLES) {
                    self.bisect(lower, upper)
                } else {
                    self.linear_scan(lower, upper)
                }
            }
        }
    }

    fn bisect(&self, lower: f64, upper: f64) -> f64 {
        let empty_mass = lower;
        let mut min_mass = lower;
        let mut max_mass = upper;
        let mut max_possible_mass = 0.0;
        for _ in 0..MAX_BISECTION_ITERATIONS {
            let test_mass = (min_mass + max_mass) / 2.0;
            if test_mass <= empty_mass || (max_mass - min_mass) < MASS_TOLERANCE {
                break;
            }
            if self.is_feasible(test_mass) {
                max_possible_mass = test_mass;
                min_mass = test_mass;
            } else {
                max_mass = test_mass;
            }
        }
        max_possible_mass
    }

    fn linear_scan(&self, lower: f64, upper: f64) -> f64 {
        utils::numeric::linspace(lower, upper, LINEAR_SCAN_SAMPLES).into_iter()
            .rev()
            .filter(|mass| *mass > lower)
            .find(|mass| self.is_feasible(*mass))
            .unwrap_or(0.0)
    }

    /// Sample feasibility on `samples` masses across the search interval and check
    /// that it never turns feasible again after the first infeasible mass.
    pub fn feasibility_is_monotonic(&self, samples: usize) -> bool {
        let (lower, upper) = match self.search_interval() {
            Some(interval) => interval,
            None => return true
        };
        let mut seen_infeasible: Option<f64> = None;
        for mass in utils::numeric::linspace(lower, upper, samples) {
            let feasible = self.is_feasible(mass);
            match (feasible, seen_infeasible) {
                (true, Some(infeasible_mass)) => {
                    warn!("Takeoff feasibility is not monotone in mass for wing area {:.3}: \
                           {:.2}kg is feasible but {:.2}kg is not",
                          self.wing_area, mass, infeasible_mass);
                    return false;
                }
                (false, None) => seen_infeasible = Some(mass),
                _ => {}
            }
        }
        debug!("Feasibility monotone over [{:.2}, {:.2}]kg for wing area {:.3}", lower, upper, self.wing_area);
        true
    }
}

pub fn find_max_mass(config: &AircraftConfig, wing_area: f64) -> f64 {
    MassSearch::new(config, wing_area).max_mass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AircraftParameter, MIN_WING_AREA};

    #[test]
    fn liftoff_airspeed_follows_lift_equation() {
        let config = AircraftConfig::default();
        let v = required_liftoff_airspeed(&config, 1.0, 10.0);
        let lift = 0.5 * config.lift_coefficient * AIR_DENSITY * 1.0 * v * v;
        assert!((lift - 10.0 * GRAVITY).abs() < 1e-9);

        assert!(required_liftoff_airspeed(&config, 1.0, 12.0) > v);
        assert!(required_liftoff_airspeed(&config, 1.5, 10.0) < v);
    }

    #[test]
    fn default_parameters_unit_area() {
        let config = AircraftConfig::default();
        let search = MassSearch::new(&config, 1.0);
        let mass = search.max_mass();

        assert!(mass > search.empty_mass());
        assert!(mass <= 24.0);

        let ground_speed = search.required_ground_speed(mass);
        let distance = crate::model::takeoff_distance(&config, 1.0, ground_speed, mass);
        assert!(distance <= 30.0, "distance {} exceeds limit", distance);

        // Just above the result must already be out of reach
        assert!(!search.is_feasible(mass + 0.05));
    }

    #[test]
    fn airframe_over_limit_returns_zero() {
        let config = AircraftConfig::default()
            .with(AircraftParameter::WingMassCoefficient, 10.0)
            .with(AircraftParameter::MaxTakeoffMass, 20.0)
            .with(AircraftParameter::NominalThrust, 1000.0)
            .with(AircraftParameter::WindSpeed, 50.0);
        // 2.0 * 10 + 2 = 22 > 20
        let search = MassSearch::new(&config, 2.0);
        assert!(search.search_interval().is_none());
        assert_eq!(search.max_mass(), 0.0);
        assert_eq!(search.with_strategy(MassSearchStrategy::Verified).max_mass(), 0.0);
        assert_eq!(find_max_mass(&config, 2.0), 0.0);
    }

    #[test]
    fn airframe_at_limit_has_no_room() {
        let config = AircraftConfig::default().with(AircraftParameter::MaxTakeoffMass, 3.4);
        assert_eq!(find_max_mass(&config, 1.0), 0.0);
    }

    #[test]
    fn search_interval_is_capped_by_headroom() {
        let config = AircraftConfig::default().with(AircraftParameter::MaxTakeoffMass, 1000.0);
        let search = MassSearch::new(&config, 1.0);
        let (lower, upper) = search.search_interval().unwrap();
        assert!((lower - 3.4).abs() < 1e-12);
        assert!((upper - 203.4).abs() < 1e-9);
    }

    #[test]
    fn strong_headwind_lifts_at_standstill() {
        let config = AircraftConfig::default().with(AircraftParameter::WindSpeed, 40.0);
        let search = MassSearch::new(&config, 1.0);
        assert!(search.required_ground_speed(24.0) <= 0.0);
        assert!(search.is_feasible(24.0));
        assert_eq!(search.takeoff_distance(24.0), 0.0);
        // Every candidate is feasible so the result approaches the cap
        let mass = search.max_mass();
        assert!(mass > 23.9 && mass < 24.0);
    }

    #[test]
    fn no_thrust_means_no_mass() {
        let config = AircraftConfig::default().with(AircraftParameter::NominalThrust, 0.0);
        assert_eq!(find_max_mass(&config, 1.0), 0.0);
    }

    #[test]
    fn feasibility_is_monotone_over_supported_ranges() {
        let areas = [MIN_WING_AREA, 0.5, 1.0, 2.0, 3.0];
        let mut violations = Vec::new();
        for parameter in AircraftParameter::ALL {
            let range = parameter.default_range();
            for value in [range.min(), range.max()] {
                let config = AircraftConfig::default().with(parameter, value);
                for area in areas {
                    if !MassSearch::new(&config, area).feasibility_is_monotonic(24) {
                        violations.push(format!("{}={} area={}", parameter, value, area));
                    }
                }
            }
        }
        assert!(violations.is_empty(), "non-monotone feasibility: {:?}", violations);
    }

    #[test]
    fn verified_search_agrees_with_bisection_when_monotone() {
        let config = AircraftConfig::default();
        let plain = MassSearch::new(&config, 1.2).max_mass();
        let verified = MassSearch::new(&config, 1.2)
            .with_strategy(MassSearchStrategy::Verified)
            .max_mass();
        assert_eq!(plain, verified);
    }

    #[test]
    fn linear_scan_finds_highest_feasible_sample() {
        let config = AircraftConfig::default();
        let search = MassSearch::new(&config, 1.0);
        let (lower, upper) = search.search_interval().unwrap();
        let scanned = search.linear_scan(lower, upper);
        let bisected = search.bisect(lower, upper);
        assert!(search.is_feasible(scanned));
        let step = (upper - lower) / (LINEAR_SCAN_SAMPLES - 1) as f64;
        assert!((scanned - bisected).abs() <= step + MASS_TOLERANCE);
    }

    #[test]
    fn strategy_parsing() {
        assert_eq!("bisection".parse::<MassSearchStrategy>().unwrap(), MassSearchStrategy::Bisection);
        assert_eq!("Verified".parse::<MassSearchStrategy>().unwrap(), MassSearchStrategy::Verified);
        assert!("newton".parse::<MassSearchStrategy>().is_err());
        assert_eq!(MassSearchStrategy::default().to_string(), "bisection");
    }
}
