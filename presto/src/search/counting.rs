//! Two-phase bounded search for the counting variant.
//!
//! Phase one seeds a feasible incumbent under escalating cost ceilings so
//! that phase two's branch-and-bound prunes effectively from its first
//! node; starting phase two with an unbounded incumbent degenerates to
//! exhaustive search of a huge box.

use super::SolveOptions;
use crate::PrestoError as Error;
use crate::num::Counting;
use crate::reduce::Reduction;

/// Minimum total presses over all assignments of non-negative integers to
/// the buttons that satisfy every row exactly.
pub fn minimum_presses(
    domain: &Counting,
    reduction: &Reduction<f64>,
    options: &SolveOptions,
) -> Result<u64, Error> {
    let tableau = reduction.tableau();

    // Every button pinned: the reduced targets already are the solution.
    if reduction.undetermined().is_empty() {
        let mut total = 0u64;
        for row in 0..reduction.rank() {
            let value = tableau.target(row);
            let rounded = domain.as_integer(value).ok_or(Error::Infeasible)?;
            if rounded < 0 {
                return Err(Error::Infeasible);
            }
            total += rounded as u64;
        }
        return Ok(total);
    }

    let max_target = max_reduced_target(reduction);
    let coefficients = extract_free_coefficients(reduction);
    let mut search = SearchCtx {
        domain,
        reduction,
        coefficients: &coefficients,
        free_values: vec![0; reduction.undetermined().len()],
        best: None,
        nodes: 0,
        budget: options.node_budget,
    };

    // Phase one: seed the incumbent under escalating ceilings, stopping at
    // the first ceiling that admits a feasible assignment.
    for &factor in &options.seed_ceiling_factors {
        if search.seed(0, 0, factor.saturating_mul(max_target))? {
            break;
        }
    }
    if search.best.is_none() {
        return Err(Error::Infeasible);
    }

    // Phase two: branch and bound to optimality under the per-column cap.
    search.optimize(0, 0, options.optimize_cap_factor.saturating_mul(max_target))?;

    Ok(search.best.expect("incumbent survives phase two"))
}

/// Largest reduced target, rounded; negative targets count as zero.
fn max_reduced_target(reduction: &Reduction<f64>) -> u64 {
    let tableau = reduction.tableau();
    let mut max = 0.0f64;
    for row in 0..tableau.row_count() {
        let value = tableau.target(row);
        if value > max {
            max = value;
        }
    }
    max.round() as u64
}

/// Coefficients of the undetermined columns within the determined rows,
/// flattened row-major so the validation loop stays allocation-free.
fn extract_free_coefficients(reduction: &Reduction<f64>) -> Vec<f64> {
    let tableau = reduction.tableau();
    let free = reduction.undetermined();
    let mut out = Vec::with_capacity(reduction.rank() * free.len());
    for row in 0..reduction.rank() {
        let entries = tableau.row(row);
        out.extend(free.iter().map(|&col| entries[col]));
    }
    out
}

/// Which bound a complete assignment must beat to be accepted.
enum AcceptBound {
    /// Seeding: the total may reach the ceiling but not exceed it.
    Ceiling(u64),
    /// Optimizing: the total must strictly improve on the incumbent.
    Incumbent,
}

/// Depth-first state threaded through both phases: the partial free-column
/// assignment, the incumbent, and the node counter enforcing the budget.
struct SearchCtx<'a> {
    domain: &'a Counting,
    reduction: &'a Reduction<f64>,
    coefficients: &'a [f64],
    free_values: Vec<u64>,
    best: Option<u64>,
    nodes: u64,
    budget: u64,
}

impl SearchCtx<'_> {
    fn tick(&mut self) -> Result<(), Error> {
        self.nodes += 1;
        if self.nodes > self.budget {
            return Err(Error::NodeBudget { budget: self.budget });
        }
        Ok(())
    }

    /// Depth-first seeding: the first complete assignment that validates
    /// under `ceiling` becomes the incumbent.
    fn seed(&mut self, depth: usize, sum: u64, ceiling: u64) -> Result<bool, Error> {
        self.tick()?;
        if sum > ceiling {
            return Ok(false);
        }
        if depth == self.free_values.len() {
            return Ok(self.accept(sum, AcceptBound::Ceiling(ceiling)));
        }
        for value in 0..=(ceiling - sum) {
            self.free_values[depth] = value;
            if self.seed(depth + 1, sum + value, ceiling)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Branch and bound: any partial sum that cannot strictly improve on
    /// the incumbent is cut, and per-column values are capped at `cap`.
    fn optimize(&mut self, depth: usize, sum: u64, cap: u64) -> Result<(), Error> {
        self.tick()?;
        let best = self.best.expect("phase two runs with a seeded incumbent");
        if sum >= best {
            return Ok(());
        }
        if depth == self.free_values.len() {
            self.accept(sum, AcceptBound::Incumbent);
            return Ok(());
        }
        let max_value = cap.min(best - sum - 1);
        for value in 0..=max_value {
            self.free_values[depth] = value;
            self.optimize(depth + 1, sum + value, cap)?;
            let improved = self.best.expect("incumbent never disappears");
            if improved <= sum + value + 1 {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Back-substitutes the determined columns under the current free
    /// assignment and, if every value is a non-negative integer and the
    /// total beats `bound`, installs the total as the new incumbent.
    fn accept(&mut self, sum: u64, bound: AcceptBound) -> bool {
        let tableau = self.reduction.tableau();
        let free_count = self.free_values.len();
        let limit = match bound {
            AcceptBound::Ceiling(ceiling) => ceiling,
            AcceptBound::Incumbent => match self.best {
                Some(0) => return false,
                Some(best) => best - 1,
                None => u64::MAX,
            },
        };

        let mut total = sum;
        for row in 0..self.reduction.rank() {
            let mut value = tableau.target(row);
            let base = row * free_count;
            for (offset, &assigned) in self.free_values.iter().enumerate() {
                value -= self.coefficients[base + offset] * assigned as f64;
            }
            // Non-integral or negative dependents reject the branch; the
            // search recovers by moving on.
            let Some(rounded) = self.domain.as_integer(value) else {
                return false;
            };
            if rounded < 0 {
                return false;
            }
            total += rounded as u64;
            if total > limit {
                return false;
            }
        }
        self.best = Some(total);
        true
    }
}
