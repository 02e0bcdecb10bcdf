// Distance functions between cells, and helpers to score a cell against a set
// of objectives.
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::SearchError;
use crate::maze::Cell;

#[inline]
fn deltas(a: Cell, b: Cell) -> (u32, u32) {
    ((a.row as i32 - b.row as i32).unsigned_abs(),
     (a.col as i32 - b.col as i32).unsigned_abs())
}

// Admissible and consistent for 4-connected unit-cost moves.
pub fn manhattan_distance(a: Cell, b: Cell) -> u32 {
    let (dr, dc) = deltas(a, b);
    dr + dc
}

// Straight-line distance, floored.
pub fn euclidean_distance(a: Cell, b: Cell) -> u32 {
    let (dr, dc) = deltas(a, b);
    ((dr as f64).powi(2) + (dc as f64).powi(2)).sqrt().floor() as u32
}

// Note: this is the *smaller* of the two axis deltas, not the usual max.
pub fn chebyshev_distance(a: Cell, b: Cell) -> u32 {
    let (dr, dc) = deltas(a, b);
    u32::min(dr, dc)
}

#[derive(ValueEnum, Deserialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    /// |Δrow| + |Δcol|, the only admissible option for 4-connected moves.
    #[default]
    Manhattan,
    /// Floor of the straight-line distance.
    Euclidean,
    /// min(|Δrow|, |Δcol|).
    Chebyshev,
}

impl Distance {
    pub fn measure(&self, a: Cell, b: Cell) -> u32 {
        match self {
            Distance::Manhattan => manhattan_distance(a, b),
            Distance::Euclidean => euclidean_distance(a, b),
            Distance::Chebyshev => chebyshev_distance(a, b),
        }
    }
}

// How a cell's distances to the remaining objectives are folded into one
// estimate.
#[derive(ValueEnum, Deserialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum Estimate {
    /// Distance to the closest objective.
    #[default]
    Nearest,
    /// Sum of the distances to every objective. Not admissible.
    Sum,
}

impl Estimate {
    pub fn score(
        &self, position: Cell, objectives: &[Cell], distance: Distance
        ) -> Result<u32, SearchError> {
        match self {
            Estimate::Nearest => nearest_objective(position, objectives, distance)
                .map(|(_, value)| value),
            Estimate::Sum => sum_objective(position, objectives, distance),
        }
    }
}

/// Index and distance of the objective closest to `position`. Ties go to the
/// first one in `objectives`.
pub fn nearest_objective(
    position: Cell, objectives: &[Cell], distance: Distance
    ) -> Result<(usize, u32), SearchError> {
    let mut best: Option<(usize, u32)> = None;
    for (index, &objective) in objectives.iter().enumerate() {
        let value = distance.measure(position, objective);
        if best.map_or(true, |(_, best_value)| value < best_value) {
            best = Some((index, value));
        }
    }
    best.ok_or(SearchError::EmptyObjectives)
}

// Saturates at `u32::MAX` instead of overflowing on huge objective sets.
pub fn sum_objective(
    position: Cell, objectives: &[Cell], distance: Distance
    ) -> Result<u32, SearchError> {
    if objectives.is_empty() {
        return Err(SearchError::EmptyObjectives);
    }
    Ok(objectives.iter()
        .map(|&objective| distance.measure(position, objective))
        .fold(0, u32::saturating_add))
}
