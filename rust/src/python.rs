//! The `duty_roster.rust` Python module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::{RosterConfig, RosterOverrides};
use crate::error::RosterError;
use crate::input::RosterInput;
use crate::models::{Seniority, DAYS_PER_WEEK};
use crate::scheduler::{RosterSolver, ScheduleState};

fn value_error(err: RosterError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Constraint thresholds (PyO3 wrapper).
///
/// Unset fields stay `None` and leave the underlying value alone: the
/// defaults for `solve_roster`, the file's values for `solve_roster_file`.
#[pyclass(name = "RosterConfig")]
#[derive(Clone, Debug, Default)]
pub struct PyRosterConfig {
    #[pyo3(get, set)]
    pub min_days_off: Option<u32>,
    #[pyo3(get, set)]
    pub max_consec_days_off: Option<u32>,
    #[pyo3(get, set)]
    pub min_daily_staff: Option<u32>,
    #[pyo3(get, set)]
    pub min_daily_seniors: Option<u32>,
    /// Verbosity level: 0=silent, 1=decisions, 2=probes, 3=trace.
    #[pyo3(get, set)]
    pub verbosity: Option<u8>,
}

#[pymethods]
impl PyRosterConfig {
    #[new]
    #[pyo3(signature = (
        min_days_off=None,
        max_consec_days_off=None,
        min_daily_staff=None,
        min_daily_seniors=None,
        verbosity=None
    ))]
    fn new(
        min_days_off: Option<u32>,
        max_consec_days_off: Option<u32>,
        min_daily_staff: Option<u32>,
        min_daily_seniors: Option<u32>,
        verbosity: Option<u8>,
    ) -> Self {
        Self {
            min_days_off,
            max_consec_days_off,
            min_daily_staff,
            min_daily_seniors,
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RosterConfig(min_days_off={:?}, max_consec_days_off={:?}, min_daily_staff={:?}, min_daily_seniors={:?})",
            self.min_days_off, self.max_consec_days_off, self.min_daily_staff, self.min_daily_seniors
        )
    }
}

impl From<PyRosterConfig> for RosterOverrides {
    fn from(config: PyRosterConfig) -> Self {
        Self {
            min_days_off: config.min_days_off,
            max_consec_days_off: config.max_consec_days_off,
            min_daily_staff: config.min_daily_staff,
            min_daily_seniors: config.min_daily_seniors,
            verbosity: config.verbosity,
            conflict_groups: Vec::new(),
        }
    }
}

/// Outcome of a solve.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct RosterResult {
    #[pyo3(get)]
    pub solved: bool,
    /// Rendered grid, present only when solved
    #[pyo3(get)]
    pub grid: Option<String>,
    /// Worker id -> seven "on"/"off" entries, empty when unsolved
    #[pyo3(get)]
    pub assignments: HashMap<String, Vec<String>>,
    #[pyo3(get)]
    pub stats: HashMap<String, u64>,
}

#[pymethods]
impl RosterResult {
    fn __repr__(&self) -> String {
        format!(
            "RosterResult(solved={}, workers={})",
            self.solved,
            self.assignments.len()
        )
    }
}

fn run(mut state: ScheduleState) -> RosterResult {
    let mut solver = RosterSolver::new(state.config().verbosity);
    let solved = solver.solve(&mut state);

    let s = solver.stats();
    let stats = HashMap::from([
        ("nodes".to_string(), s.nodes),
        ("moves_tried".to_string(), s.moves_tried),
        ("rejected".to_string(), s.rejected),
        ("propagation_failures".to_string(), s.propagation_failures),
        ("backtracks".to_string(), s.backtracks),
    ]);

    if !solved {
        return RosterResult {
            stats,
            ..Default::default()
        };
    }

    let assignments = state
        .assignments()
        .into_iter()
        .map(|(id, row)| {
            let duties = (0..DAYS_PER_WEEK)
                .map(|day| row[day].map_or("-", |duty| duty.as_str()).to_string())
                .collect();
            (id, duties)
        })
        .collect();

    RosterResult {
        solved,
        grid: Some(state.render_grid()),
        assignments,
        stats,
    }
}

/// Solve a roster given as `(worker_id, tier)` pairs and conflict groups.
///
/// # Raises
/// * ValueError on duplicate workers or conflicts naming unknown workers
#[pyfunction]
#[pyo3(signature = (workers, conflicts=Vec::new(), config=None))]
fn solve_roster(
    workers: Vec<(String, String)>,
    conflicts: Vec<Vec<String>>,
    config: Option<PyRosterConfig>,
) -> PyResult<RosterResult> {
    let workers = workers
        .into_iter()
        .map(|(id, tier)| (id, Seniority::from_label(&tier)))
        .collect();
    let mut roster_config = RosterConfig::default();
    if let Some(config) = config {
        roster_config.apply(&RosterOverrides::from(config));
    }
    let state = ScheduleState::new(workers, &conflicts, roster_config).map_err(value_error)?;
    Ok(run(state))
}

/// Load a roster file and solve it. Fields set in `config` take precedence
/// over the file's thresholds.
///
/// # Raises
/// * ValueError if the file cannot be read or is malformed
#[pyfunction]
#[pyo3(signature = (path, config=None))]
fn solve_roster_file(path: String, config: Option<PyRosterConfig>) -> PyResult<RosterResult> {
    let mut input = RosterInput::from_file(&path).map_err(value_error)?;
    if let Some(config) = config {
        input.apply(&RosterOverrides::from(config));
    }
    let state = input.into_state().map_err(value_error)?;
    Ok(run(state))
}

#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRosterConfig>()?;
    m.add_class::<RosterResult>()?;

    m.add_function(wrap_pyfunction!(solve_roster, m)?)?;
    m.add_function(wrap_pyfunction!(solve_roster_file, m)?)?;

    Ok(())
}
