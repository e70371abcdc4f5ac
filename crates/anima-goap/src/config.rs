#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Search horizon, in number of applied tasks. The first accepted node at
    /// this depth ends the whole search.
    pub max_depth: u8,

    /// Keep the path found by a depth-limited search. When false such a
    /// search still succeeds, but with an empty plan.
    pub allow_partial_plan_at_depth: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            allow_partial_plan_at_depth: true,
        }
    }
}
