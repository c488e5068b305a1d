//! Local feasibility checks for a single (worker, day) move.
//!
//! Every predicate is a necessary condition evaluated against the committed
//! cells and the still-live domains: passing proves the constraint can still
//! be met, not that it is met.

use crate::interner::WorkerIdx;
use crate::models::{Day, Duty, DAYS_PER_WEEK};

use super::state::ScheduleState;

/// All four constraint families must hold for the move at (worker, day).
pub fn check(state: &ScheduleState, worker: WorkerIdx, day: Day) -> bool {
    min_days_off_reachable(state, worker)
        && max_consec_days_off_respected(state, worker)
        && min_daily_staff_reachable(state, day)
        && conflicts_respected(state, worker, day)
}

/// Off days still possible plus off days committed meet the weekly minimum.
pub fn min_days_off_reachable(state: &ScheduleState, worker: WorkerIdx) -> bool {
    let live = state.worker(worker).domain.live_count(Duty::Off);
    let committed = state.committed_count(worker, Duty::Off);
    live + committed >= state.config().min_days_off as usize
}

/// No run of committed off days reaches the consecutive limit.
///
/// The run is compared after every day, including days that end it, so a
/// limit of zero rejects every board.
pub fn max_consec_days_off_respected(state: &ScheduleState, worker: WorkerIdx) -> bool {
    let limit = state.config().max_consec_days_off as usize;
    let mut run = 0;
    for day in 0..DAYS_PER_WEEK {
        run = if state.is_off(worker, day) { run + 1 } else { 0 };
        if run >= limit {
            return false;
        }
    }
    true
}

/// Enough workers, and enough seniors, could still be on duty for `day`.
pub fn min_daily_staff_reachable(state: &ScheduleState, day: Day) -> bool {
    let config = state.config();
    let (total, seniors) = state.reachable_staff(day);
    total >= config.min_daily_staff as usize
        && (config.min_daily_seniors == 0 || seniors >= config.min_daily_seniors as usize)
}

/// An on-duty worker shares the day with none of its conflict partners.
pub fn conflicts_respected(state: &ScheduleState, worker: WorkerIdx, day: Day) -> bool {
    if !state.is_on(worker, day) {
        return true;
    }
    state
        .conflicts_of(worker)
        .iter()
        .all(|&partner| !state.is_on(partner, day))
}
