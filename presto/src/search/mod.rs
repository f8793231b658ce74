//! Free-variable searches for both puzzle variants.

pub mod counting;
pub mod parity;

use crate::num::DEFAULT_TOLERANCE;

/// Knobs for both searches.
///
/// The counting-search ceiling multipliers and per-column cap are tuned for
/// puzzle-sized inputs, not derived bounds; raise them (or the budgets) for
/// harder instances.
#[derive(Clone, Debug)]
pub struct SolveOptions {
    /// Zero/integrality tolerance for the real domain.
    pub tolerance: f64,
    /// Cost ceilings tried while seeding an incumbent, as multiples of the
    /// largest reduced target.
    pub seed_ceiling_factors: Vec<u64>,
    /// Per-column value cap during the optimizing phase, as a multiple of
    /// the largest reduced target.
    pub optimize_cap_factor: u64,
    /// Most free columns the parity enumeration accepts before failing
    /// fast; the pattern space is `2^k`.
    pub max_free_columns: usize,
    /// Node budget shared by both counting-search phases.
    pub node_budget: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            seed_ceiling_factors: vec![1, 2, 3, 5],
            optimize_cap_factor: 2,
            max_free_columns: 20,
            node_budget: 50_000_000,
        }
    }
}

impl SolveOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_free_columns(mut self, limit: usize) -> Self {
        self.max_free_columns = limit;
        self
    }

    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = budget;
        self
    }
}
