use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PrestoError {
    #[error("button touches variable {index}, outside the target vector (length {targets})")]
    ShapeMismatch { index: usize, targets: usize },

    #[error("no admissible assignment reaches the target")]
    Infeasible,

    #[error("{count} free columns exceed the enumeration limit of {limit}")]
    FreeColumnLimit { count: usize, limit: usize },

    #[error("search exhausted its node budget of {budget}")]
    NodeBudget { budget: u64 },
}
