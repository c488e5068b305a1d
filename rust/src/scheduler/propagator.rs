//! Domain reduction after a committed move.
//!
//! Each pass looks for options that can no longer be part of any solution
//! and removes them. Every forced value is validated with a probe before the
//! narrowing is kept; a failed probe, or a day left with no option at all,
//! means the branch is dead.

use crate::interner::WorkerIdx;
use crate::models::{weekday, Day, Duty, DAYS_PER_WEEK};
use crate::{log_probes, log_trace};

use super::state::ScheduleState;
use super::trial::probe;

/// Run every reduction pass for the move just made at (worker, day).
///
/// Returns false when the board is proven infeasible. On false the state
/// may be partially narrowed and must be discarded.
pub fn propagate(state: &mut ScheduleState, worker: WorkerIdx, day: Day) -> bool {
    let verbosity = state.config().verbosity;

    if !saturate_min_days_off(state, worker) {
        log_probes!(
            verbosity,
            "  propagate: min-days-off contradiction for {}",
            state.worker(worker).id
        );
        return false;
    }
    if !saturate_max_consec_days_off(state, worker) {
        log_probes!(
            verbosity,
            "  propagate: max-consec-days-off contradiction for {}",
            state.worker(worker).id
        );
        return false;
    }
    if !saturate_min_daily_staff(state, day) {
        log_probes!(
            verbosity,
            "  propagate: staffing contradiction on {}",
            weekday(day)
        );
        return false;
    }
    if !broadcast_conflicts(state, worker, day) {
        log_probes!(
            verbosity,
            "  propagate: conflict contradiction for partners of {} on {}",
            state.worker(worker).id,
            weekday(day)
        );
        return false;
    }
    true
}

/// Force `duty` for the cell: drop the other option, then probe the commit.
///
/// The narrowing stays in place whether or not the probe succeeds.
fn force(state: &mut ScheduleState, worker: WorkerIdx, day: Day, duty: Duty) -> bool {
    state.eliminate(worker, day, duty.opposite());
    if !state.worker(worker).domain.is_live(day, duty) {
        // Both options gone on an undecided day.
        return false;
    }
    log_trace!(
        state.config().verbosity,
        "    force {} {} on {}",
        state.worker(worker).id,
        duty,
        weekday(day)
    );
    probe(state, &[(worker, day, duty)], (worker, day))
}

/// When the remaining off options are exactly enough for the weekly minimum,
/// every one of them must be taken.
fn saturate_min_days_off(state: &mut ScheduleState, worker: WorkerIdx) -> bool {
    let reachable = state.worker(worker).domain.live_count(Duty::Off)
        + state.committed_count(worker, Duty::Off);
    if reachable != state.config().min_days_off as usize {
        return true;
    }

    for day in 0..DAYS_PER_WEEK {
        let domain = &state.worker(worker).domain;
        if domain.is_live(day, Duty::Off)
            && domain.is_live(day, Duty::On)
            && !force(state, worker, day, Duty::Off)
        {
            return false;
        }
    }
    true
}

/// A live off day that would complete a run of committed off days reaching
/// the limit must be on duty.
fn saturate_max_consec_days_off(state: &mut ScheduleState, worker: WorkerIdx) -> bool {
    let limit = state.config().max_consec_days_off as usize;

    for day in 0..DAYS_PER_WEEK {
        if !state.worker(worker).domain.is_live(day, Duty::Off) {
            continue;
        }
        let mut first = day;
        while first > 0 && state.is_off(worker, first - 1) {
            first -= 1;
        }
        let mut last = day;
        while last + 1 < DAYS_PER_WEEK && state.is_off(worker, last + 1) {
            last += 1;
        }

        let run = last - first + 1;
        if run >= limit && !force(state, worker, day, Duty::On) {
            return false;
        }
    }
    true
}

/// When reachable staff for the day is exactly the minimum, everyone who can
/// still work must. Otherwise the same holds for seniors alone.
fn saturate_min_daily_staff(state: &mut ScheduleState, day: Day) -> bool {
    let config = state.config();
    let (total, seniors) = state.reachable_staff(day);
    let seniors_only = if total == config.min_daily_staff as usize {
        false
    } else if seniors == config.min_daily_seniors as usize {
        true
    } else {
        return true;
    };

    let forced: Vec<WorkerIdx> = state
        .worker_indices()
        .filter(|&idx| {
            let worker = state.worker(idx);
            worker.domain.is_live(day, Duty::On)
                && worker.domain.is_live(day, Duty::Off)
                && (!seniors_only || worker.seniority.is_senior())
        })
        .collect();

    forced
        .into_iter()
        .all(|idx| force(state, idx, day, Duty::On))
}

/// An on-duty worker takes the day away from each conflict partner, and each
/// partner must stay feasible while off duty on every day the worker works.
fn broadcast_conflicts(state: &mut ScheduleState, worker: WorkerIdx, day: Day) -> bool {
    if !state.is_on(worker, day) {
        return true;
    }

    let verbosity = state.config().verbosity;
    let worker_on_days: Vec<Day> = (0..DAYS_PER_WEEK)
        .filter(|&d| state.is_on(worker, d))
        .collect();
    let partners: Vec<WorkerIdx> = state.conflicts_of(worker).to_vec();

    for partner in partners {
        if !state.worker(partner).domain.is_live(day, Duty::On) {
            continue;
        }
        state.eliminate(partner, day, Duty::On);
        if state.worker(partner).domain.is_exhausted(day) {
            return false;
        }
        log_trace!(
            verbosity,
            "    {} cannot work {} alongside {}",
            state.worker(partner).id,
            weekday(day),
            state.worker(worker).id
        );

        let mut moves = Vec::with_capacity(worker_on_days.len());
        for &d in &worker_on_days {
            match state.duty_of(partner, d) {
                None => moves.push((partner, d, Duty::Off)),
                Some(Duty::Off) => {}
                Some(Duty::On) => return false,
            }
        }
        if !probe(state, &moves, (partner, day)) {
            return false;
        }
    }
    true
}
