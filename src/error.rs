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


use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    #[error("io error. `{0}`")]
    Io(#[from] io::Error),
    #[error("settings error. `{0}`")]
    Settings(#[from] config::ConfigError),
    #[error("failed to read parameters from `{0}`. `{1}`")]
    ParameterFile(PathBuf, String),
    #[error("load calculator error. `{0}`")]
    AircraftLoad(#[from] aircraft_load::Error),
    #[error("flight score error. `{0}`")]
    MicroClass(#[from] micro_class::Error),
    #[error("json encoding error. `{0}`")]
    Json(#[from] serde_json::Error),
    #[error("csv encoding error. `{0}`")]
    Csv(#[from] csv::Error),
    #[error("failed to draw `{0}`. `{1}`")]
    Chart(PathBuf, String),
}
