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

use serde::Serialize;
use crate::model::{AIR_DENSITY, MAX_SIMULATION_STEPS, TIME_STEP};
use crate::params::AircraftConfig;

/// Empirical static-thrust-vs-airspeed curve: `F = a·v² + b·v + Fn`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThrustCurve {
    quadratic: f64,
    linear: f64,
    static_thrust: f64
}

impl ThrustCurve {
    pub const QUADRATIC_COEFFICIENT: f64 = -0.0691;
    pub const LINEAR_COEFFICIENT: f64 = -0.7383;

    pub fn from_nominal_thrust(static_thrust: f64) -> ThrustCurve {
        ThrustCurve {
            quadratic: ThrustCurve::QUADRATIC_COEFFICIENT,
            linear: ThrustCurve::LINEAR_COEFFICIENT,
            static_thrust
        }
    }

    pub fn thrust_at(&self, airspeed: f64) -> f64 {
        self.quadratic * airspeed * airspeed + self.linear * airspeed + self.static_thrust
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum RollOutcome {
    /// Liftoff ground speed was reached
    Airborne,
    /// Drag matched or exceeded thrust before liftoff speed
    InsufficientThrust,
    /// Still accelerating when the step cap was hit
    StepLimit
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TakeoffRoll {
    pub outcome: RollOutcome,
    /// Ground distance covered (m). Only meaningful when airborne
    pub distance: f64,
    /// Elapsed time (s)
    pub time: f64,
    pub steps: usize,
    /// Ground speed at the end of the roll (m/s)
    pub ground_speed: f64
}

impl TakeoffRoll {
    pub fn is_airborne(&self) -> bool {
        self.outcome == RollOutcome::Airborne
    }

    /// Roll distance, or infinity if liftoff was never reached
    pub fn distance_or_infinity(&self) -> f64 {
        match self.outcome {
            RollOutcome::Airborne => self.distance,
            RollOutcome::InsufficientThrust | RollOutcome::StepLimit => f64::INFINITY
        }
    }
}

pub struct TakeoffSimulator {
    drag_coefficient: f64,
    wind_speed: f64,
    wing_area: f64,
    thrust: ThrustCurve
}

impl TakeoffSimulator {
    pub fn new(config: &AircraftConfig, wing_area: f64) -> TakeoffSimulator {
        TakeoffSimulator {
            drag_coefficient: config.drag_coefficient,
            wind_speed: config.wind_speed,
            wing_area,
            thrust: ThrustCurve::from_nominal_thrust(config.nominal_thrust)
        }
    }

    pub fn airspeed_at(&self, ground_speed: f64) -> f64 {
        ground_speed + self.wind_speed
    }

    pub fn thrust_at(&self, airspeed: f64) -> f64 {
        self.thrust.thrust_at(airspeed)
    }

    pub fn drag_force_at(&self, airspeed: f64) -> f64 {
        0.5 * self.drag_coefficient * AIR_DENSITY * self.wing_area * airspeed.powi(2)
    }

    /// Thrust minus drag at the given ground speed
    pub fn net_force_at(&self, ground_speed: f64) -> f64 {
        let airspeed = self.airspeed_at(ground_speed);
        self.thrust_at(airspeed) - self.drag_force_at(airspeed)
    }

    /// Integrate the ground roll from rest until `liftoff_ground_speed` is reached.
    ///
    /// Position is advanced with the velocity from the start of the step before the velocity
    /// itself is updated. A non-positive net force at any step ends the roll immediately.
    pub fn simulate(&self, mass: f64, liftoff_ground_speed: f64) -> TakeoffRoll {
        let mut velocity = 0.0;
        let mut distance = 0.0;
        let mut steps: usize = 0;
        let mut outcome = RollOutcome::Airborne;

        while velocity < liftoff_ground_speed {
            if steps >= MAX_SIMULATION_STEPS {
                outcome = RollOutcome::StepLimit;
                break;
            }
            let net_force = self.net_force_at(velocity);
            if net_force <= 0.0 {
                outcome = RollOutcome::InsufficientThrust;
                break;
            }
            let acceleration = net_force / mass;
            distance += velocity * TIME_STEP + (acceleration * TIME_STEP * TIME_STEP) / 2.0;
            velocity += acceleration * TIME_STEP;
            steps += 1;
        }

        TakeoffRoll {
            outcome,
            distance,
            time: steps as f64 * TIME_STEP,
            steps,
            ground_speed: velocity
        }
    }

    pub fn takeoff_distance(&self, mass: f64, liftoff_ground_speed: f64) -> f64 {
        self.simulate(mass, liftoff_ground_speed).distance_or_infinity()
    }
}

/// Ground roll (m) needed to reach `liftoff_ground_speed`, or infinity if it can't be reached
pub fn takeoff_distance(config: &AircraftConfig, wing_area: f64, liftoff_ground_speed: f64, mass: f64) -> f64 {
    TakeoffSimulator::new(config, wing_area).takeoff_distance(mass, liftoff_ground_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AircraftParameter;

    #[test]
    fn thrust_curve_matches_polynomial() {
        let curve = ThrustCurve::from_nominal_thrust(52.86);
        assert_eq!(curve.thrust_at(0.0), 52.86);
        let expected = -0.0691 * 100.0 - 0.7383 * 10.0 + 52.86;
        assert!((curve.thrust_at(10.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn drag_uses_airspeed_including_wind() {
        let config = AircraftConfig::default().with(AircraftParameter::WindSpeed, 4.0);
        let sim = TakeoffSimulator::new(&config, 2.0);
        assert_eq!(sim.airspeed_at(6.0), 10.0);
        let expected_drag = 0.5 * 0.03 * 1.225 * 2.0 * 100.0;
        assert!((sim.drag_force_at(10.0) - expected_drag).abs() < 1e-12);
        let expected_net = ThrustCurve::from_nominal_thrust(52.86).thrust_at(10.0) - expected_drag;
        assert!((sim.net_force_at(6.0) - expected_net).abs() < 1e-12);
    }

    #[test]
    fn first_step_uses_pre_step_velocity() {
        let config = AircraftConfig::default();
        let sim = TakeoffSimulator::new(&config, 1.0);
        let mass = 10.0;
        let acceleration = 52.86 / mass;
        // Any positive target below the first step's velocity finishes after one step
        let roll = sim.simulate(mass, acceleration * TIME_STEP * 0.5);
        assert_eq!(roll.outcome, RollOutcome::Airborne);
        assert_eq!(roll.steps, 1);
        let expected = acceleration * TIME_STEP * TIME_STEP / 2.0;
        assert!((roll.distance - expected).abs() < 1e-15);
        assert!((roll.ground_speed - acceleration * TIME_STEP).abs() < 1e-15);
    }

    #[test]
    fn zero_target_speed_needs_no_roll() {
        let sim = TakeoffSimulator::new(&AircraftConfig::default(), 1.0);
        let roll = sim.simulate(10.0, 0.0);
        assert!(roll.is_airborne());
        assert_eq!(roll.distance, 0.0);
        assert_eq!(roll.steps, 0);
        assert_eq!(sim.takeoff_distance(10.0, -2.0), 0.0);
    }

    #[test]
    fn reachable_roll_is_finite_and_reasonable() {
        let config = AircraftConfig::default();
        let distance = takeoff_distance(&config, 1.0, 12.0, 8.0);
        assert!(distance.is_finite());
        // Must be at least the distance covered at the peak (static) acceleration
        let max_acceleration = 52.86 / 8.0;
        assert!(distance >= 12.0 * 12.0 / (2.0 * max_acceleration));
        assert!(distance < 100.0);
    }

    #[test]
    fn heavier_aircraft_rolls_further() {
        let sim = TakeoffSimulator::new(&AircraftConfig::default(), 1.0);
        let light = sim.takeoff_distance(6.0, 12.0);
        let heavy = sim.takeoff_distance(12.0, 12.0);
        assert!(heavy > light);
    }

    #[test]
    fn insufficient_thrust_is_unreachable_immediately() {
        let config = AircraftConfig::default()
            .with(AircraftParameter::NominalThrust, 1.0)
            .with(AircraftParameter::WindSpeed, 10.0);
        let sim = TakeoffSimulator::new(&config, 1.0);
        assert!(sim.net_force_at(0.0) <= 0.0);
        let roll = sim.simulate(5.0, 15.0);
        assert_eq!(roll.outcome, RollOutcome::InsufficientThrust);
        assert_eq!(roll.steps, 0);
        assert!(roll.distance_or_infinity().is_infinite());
        assert!(takeoff_distance(&config, 1.0, 15.0, 5.0).is_infinite());
    }

    #[test]
    fn target_above_terminal_speed_is_unreachable_within_step_cap() {
        let config = AircraftConfig::default();
        let sim = TakeoffSimulator::new(&config, 1.0);
        // Thrust alone vanishes just below 23 m/s so 40 m/s can never be reached
        let roll = sim.simulate(10.0, 40.0);
        assert_eq!(roll.outcome, RollOutcome::StepLimit);
        assert_eq!(roll.steps, MAX_SIMULATION_STEPS);
        assert!(roll.ground_speed < 40.0);
        assert!(roll.distance_or_infinity().is_infinite());
    }
}
