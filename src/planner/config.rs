use serde::{Deserialize, Serialize};

/// Bounds applied to every phase search so a turn always terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Nodes a single phase search may expand before giving up.
    pub max_expansions: usize,
    /// Nodes the frontier may hold; children beyond it are dropped.
    pub max_frontier: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 20_000,
            max_frontier: 100_000,
        }
    }
}

impl PlannerConfig {
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_max_frontier(mut self, max_frontier: usize) -> Self {
        self.max_frontier = max_frontier;
        self
    }
}
