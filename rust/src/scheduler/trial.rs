//! Tentative commits with an undo log.
//!
//! Every forced value the propagator deduces is validated the same way:
//! commit it, run the evaluator, then undo the commit. The search engine uses
//! the same log for the single move it tries before copying the board.

use crate::interner::WorkerIdx;
use crate::models::{Day, Duty};

use super::evaluator::check;
use super::state::ScheduleState;

#[derive(Clone, Copy, Debug)]
struct Move {
    worker: WorkerIdx,
    day: Day,
    duty: Duty,
    saved: (bool, bool),
}

/// Undo log of tentative commits against a `ScheduleState`.
///
/// Dropping a trial keeps its moves; only `rollback` undoes them.
#[derive(Debug, Default)]
pub struct Trial {
    moves: Vec<Move>,
}

impl Trial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `duty` for the cell and remember how to undo it.
    pub fn commit(&mut self, state: &mut ScheduleState, worker: WorkerIdx, day: Day, duty: Duty) {
        debug_assert!(
            state.duty_of(worker, day).is_none(),
            "cell already committed"
        );
        let saved = state.commit(worker, day, duty);
        self.moves.push(Move {
            worker,
            day,
            duty,
            saved,
        });
    }

    /// Undo every recorded move, newest first.
    pub fn rollback(self, state: &mut ScheduleState) {
        for m in self.moves.into_iter().rev() {
            state.restore(m.worker, m.day, m.duty, m.saved);
        }
    }
}

/// Tentatively apply `moves`, run the evaluator for `focus`, and roll back.
///
/// Returns whether the evaluator accepted the tentative board. The state is
/// left exactly as it was either way.
pub fn probe(
    state: &mut ScheduleState,
    moves: &[(WorkerIdx, Day, Duty)],
    focus: (WorkerIdx, Day),
) -> bool {
    let mut trial = Trial::new();
    for &(worker, day, duty) in moves {
        trial.commit(state, worker, day, duty);
    }
    let ok = check(state, focus.0, focus.1);
    trial.rollback(state);
    ok
}
