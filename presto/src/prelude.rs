pub use crate::PrestoError;
pub use crate::machine::{CountingMachine, Machine, ParityMachine};
pub use crate::matrix::Tableau;
pub use crate::num::{Counting, DEFAULT_TOLERANCE, Domain, Parity};
pub use crate::reduce::{Reduction, reduce};
pub use crate::search::SolveOptions;
pub use crate::types::{Col, Row};
