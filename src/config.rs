use serde::Deserialize;

use crate::heuristic::{Distance, Estimate};

// Knobs for the informed strategies. Breadth-first ignores them.
//
// Example JSON, every field optional:
//   {"distance": "manhattan", "estimate": "nearest"}
#[derive(Deserialize, Debug, Default, PartialEq, Eq, Copy, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Distance between a cell and an objective.
    pub distance: Distance,
    /// How distances to the remaining objectives become one estimate.
    pub estimate: Estimate,
}

impl SearchConfig {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}
