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

mod takeoff;
mod mass;

const GRAVITY: f64 = 9.81; // m/s^2
const AIR_DENSITY: f64 = 1.225; // Air density in kg/m³ (at sea level)
const TIME_STEP: f64 = 0.01; // s
const MAX_SIMULATION_STEPS: usize = 100_000;

pub use takeoff::{takeoff_distance, RollOutcome, TakeoffRoll, TakeoffSimulator, ThrustCurve};
pub use mass::{find_max_mass, required_liftoff_airspeed, MassSearch, MassSearchStrategy};
