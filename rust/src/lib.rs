//! Seven-day duty roster solver.
//!
//! Assigns every worker an on/off duty for each day of the week under hard
//! constraints: a minimum number of days off, a cap on consecutive days off,
//! minimum daily staffing (overall and senior), and pairwise conflicts that
//! keep named workers from sharing a shift. The engine returns the first
//! feasible roster found by MRV backtracking with forward checking and
//! constraint propagation, or reports that none exists.
//!
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod error;
pub mod input;
pub mod interner;
pub mod logging;
pub mod models;
pub mod scheduler;

#[cfg(feature = "python")]
mod python;

pub use config::{RosterConfig, RosterOverrides};
pub use error::RosterError;
pub use input::{CliArgs, RosterInput, USAGE};
pub use interner::{WorkerIdInterner, WorkerIdx};
pub use models::{weekday, Day, Domain, Duty, Seniority, Worker, DAYS_PER_WEEK};
pub use scheduler::{solve, RosterSolver, ScheduleState, SolveStats};
