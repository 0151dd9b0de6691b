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

pub mod error;
pub mod params;
pub mod score;
pub mod sweep;

pub use error::{Error, ErrorKind, Result};
pub use params::{SampleRange, ScoreAssignment, ScoreInputs, ScoreParameter, ScoreRequest, VariedParameter};
pub use score::{flight_score, FlightScore};
pub use sweep::{score_surface, sweep_score, ScoreCurve, ScoreSample, ScoreSurface, SecondaryAxisPolicy};
