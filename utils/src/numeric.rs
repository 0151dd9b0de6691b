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

/// Returns `points` evenly spaced values covering `[min, max]` inclusive.
///
/// Each value is computed as `min + (i / (points - 1)) * (max - min)`.
/// A request for a single point yields `[min]` and zero points yields an empty vec.
pub fn linspace(min: f64, max: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let last_idx = (points - 1) as f64;
            (0..points).map(|i| {
                min + (i as f64 / last_idx) * (max - min)
            }).collect()
        }
    }
}

/// Index and value of the first maximum in `values`. NaN entries never win.
pub fn first_max_index(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, val) in values.iter().enumerate() {
        match best {
            Some((_, best_val)) if !(*val > best_val) => {}
            _ if val.is_nan() => {}
            _ => best = Some((idx, *val))
        }
    }
    best
}
