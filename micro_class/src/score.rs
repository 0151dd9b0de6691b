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
use crate::params::ScoreInputs;

/// Takeoff bonus for the banded takeoff distance. Each band includes its upper bound.
pub fn takeoff_bonus(takeoff_distance: f64) -> f64 {
    if takeoff_distance >= 0.0 && takeoff_distance <= 10.0 {
        20.0
    } else if takeoff_distance > 10.0 && takeoff_distance <= 25.0 {
        15.0
    } else if takeoff_distance > 25.0 && takeoff_distance <= 50.0 {
        9.0
    } else {
        0.0
    }
}

/// `M = 11 / ((W_empty - 1)^4 + 8.9)`
pub fn empty_weight_factor(w_empty: f64) -> f64 {
    11.0 / ((w_empty - 1.0).powi(4) + 8.9)
}

/// `Z = B_takeoff - b^1.5`
pub fn wingspan_factor(takeoff_bonus: f64, wingspan: f64) -> f64 {
    takeoff_bonus - wingspan.powf(1.5)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlightScore {
    pub score: f64,
    pub m: f64,
    pub z: f64,
    pub takeoff_bonus: f64
}

/// `FS = 3 · W_payload · M + Z`
pub fn flight_score(inputs: &ScoreInputs) -> FlightScore {
    let bonus = takeoff_bonus(inputs.takeoff_distance);
    let m = empty_weight_factor(inputs.w_empty);
    let z = wingspan_factor(bonus, inputs.wingspan);
    FlightScore {
        score: 3.0 * inputs.w_payload * m + z,
        m,
        z,
        takeoff_bonus: bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takeoff_bonus_bands() {
        assert_eq!(takeoff_bonus(0.0), 20.0);
        assert_eq!(takeoff_bonus(10.0), 20.0);
        assert_eq!(takeoff_bonus(10.0001), 15.0);
        assert_eq!(takeoff_bonus(25.0), 15.0);
        assert_eq!(takeoff_bonus(25.5), 9.0);
        assert_eq!(takeoff_bonus(50.0), 9.0);
        assert_eq!(takeoff_bonus(50.1), 0.0);
        assert_eq!(takeoff_bonus(100.0), 0.0);
        assert_eq!(takeoff_bonus(150.0), 0.0);
        assert_eq!(takeoff_bonus(-1.0), 0.0);
        assert_eq!(takeoff_bonus(f64::NAN), 0.0);
    }

    #[test]
    fn factors() {
        assert!((empty_weight_factor(1.0) - 11.0 / 8.9).abs() < 1e-12);
        assert!((empty_weight_factor(12.0) - 11.0 / (14641.0 + 8.9)).abs() < 1e-15);
        assert!((wingspan_factor(15.0, 4.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn reference_flight_score() {
        let inputs = ScoreInputs { w_payload: 10.0, w_empty: 12.0, wingspan: 10.0, takeoff_distance: 20.0 };
        let result = flight_score(&inputs);

        let m = 11.0 / (11.0f64.powi(4) + 8.9);
        let z = 15.0 - 10.0f64.powf(1.5);
        assert_eq!(result.takeoff_bonus, 15.0);
        assert!((result.m - m).abs() < 1e-15);
        assert!((result.m - 0.000751).abs() < 1e-6);
        assert!((result.z - z).abs() < 1e-12);
        assert!((result.z + 16.623).abs() < 1e-3);
        assert!((result.score - (3.0 * 10.0 * m + z)).abs() < 1e-12);
        assert!((result.score + 16.60).abs() < 0.01);
    }
}
