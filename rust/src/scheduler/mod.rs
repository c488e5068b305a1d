//! Roster search engine: MRV backtracking with forward checking and
//! constraint propagation over a seven-day on/off board.

mod core;
pub mod evaluator;
pub mod propagator;
mod state;
pub mod trial;

pub use core::{select_mrv, solve, RosterSolver, SolveStats};
pub use evaluator::check;
pub use propagator::propagate;
pub use state::{ScheduleState, OFF_MARKER, UNDECIDED_MARKER};
pub use trial::{probe, Trial};
