//! Problem instances and the per-machine solve pipeline.

use crate::PrestoError as Error;
use crate::matrix::Tableau;
use crate::num::{Counting, Domain, Parity};
use crate::reduce::reduce;
use crate::search::{self, SolveOptions};

/// One puzzle instance: an ordered bank of buttons, each listing the
/// variables it feeds (coefficient always one), plus the target vector.
/// Immutable once built; nothing survives across solves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine<T> {
    buttons: Vec<Vec<usize>>,
    target: Vec<T>,
}

/// Parity variant: targets are indicator bits combined with XOR.
pub type ParityMachine = Machine<bool>;

/// Counting variant: targets are non-negative counters combined by
/// addition.
pub type CountingMachine = Machine<u64>;

impl<T> Machine<T> {
    /// Builds a machine, rejecting any button that touches a variable the
    /// target vector does not cover. Nothing is truncated or padded.
    pub fn new(buttons: Vec<Vec<usize>>, target: Vec<T>) -> Result<Self, Error> {
        let targets = target.len();
        for button in &buttons {
            for &index in button {
                if index >= targets {
                    return Err(Error::ShapeMismatch { index, targets });
                }
            }
        }
        Ok(Self { buttons, target })
    }

    #[inline(always)]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    #[inline(always)]
    pub fn variable_count(&self) -> usize {
        self.target.len()
    }

    #[inline(always)]
    pub fn buttons(&self) -> &[Vec<usize>] {
        &self.buttons
    }

    #[inline(always)]
    pub fn target(&self) -> &[T] {
        &self.target
    }

    /// Incidence tableau: column `j` is set at row `i` iff button `j`
    /// feeds variable `i`; the encoded target lands in the final column.
    fn incidence_tableau<D, F>(&self, mut encode: F) -> Tableau<D::Elem>
    where
        D: Domain,
        F: FnMut(&T) -> D::Elem,
    {
        let width = self.button_count() + 1;
        let mut tableau = Tableau::filled(self.variable_count(), width, D::zero());
        for (button, affected) in self.buttons.iter().enumerate() {
            for &variable in affected {
                tableau.row_mut(variable)[button] = D::one();
            }
        }
        for (variable, value) in self.target.iter().enumerate() {
            tableau.row_mut(variable)[width - 1] = encode(value);
        }
        tableau
    }
}

impl Machine<bool> {
    /// Minimal number of presses toggling every indicator to its target.
    pub fn minimum_presses(&self, options: &SolveOptions) -> Result<u64, Error> {
        if self.variable_count() == 0 {
            return Ok(0);
        }
        let tableau = self.incidence_tableau::<Parity, _>(|&bit| bit);
        let reduction = reduce(&Parity, tableau);
        if !reduction.residual_target_zero(&Parity) {
            return Err(Error::Infeasible);
        }
        search::parity::minimum_weight(&reduction, options)
    }
}

impl Machine<u64> {
    /// Minimal total presses driving every counter exactly to its target.
    pub fn minimum_presses(&self, options: &SolveOptions) -> Result<u64, Error> {
        if self.variable_count() == 0 {
            return Ok(0);
        }
        let domain = Counting::new(options.tolerance);
        let tableau = self.incidence_tableau::<Counting, _>(|&count| count as f64);
        let reduction = reduce(&domain, tableau);
        if !reduction.residual_target_zero(&domain) {
            return Err(Error::Infeasible);
        }
        search::counting::minimum_presses(&domain, &reduction, options)
    }
}
