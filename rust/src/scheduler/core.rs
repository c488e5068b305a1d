//! Backtracking search over the roster board.

use crate::interner::WorkerIdx;
use crate::models::{weekday, Duty, DAYS_PER_WEEK};
use crate::{log_decisions, log_probes};

use super::evaluator::check;
use super::propagator::propagate;
use super::state::ScheduleState;
use super::trial::Trial;

/// Counters collected during one `solve` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Search nodes entered (including the root)
    pub nodes: u64,
    /// Tentative (worker, day, duty) moves attempted
    pub moves_tried: u64,
    /// Moves rejected by the evaluator
    pub rejected: u64,
    /// Moves whose propagation found a contradiction
    pub propagation_failures: u64,
    /// Moves that propagated cleanly but whose subtree had no solution
    pub backtracks: u64,
}

/// Worker with the fewest live options, ignoring workers with none left.
///
/// Ties go to the lowest index, i.e. the lexicographically smallest
/// identifier. Returns `None` when no worker has a live option.
pub fn select_mrv(state: &ScheduleState) -> Option<WorkerIdx> {
    let mut best: Option<(usize, WorkerIdx)> = None;
    for idx in state.worker_indices() {
        let count = state.worker(idx).domain.option_count();
        if count == 0 {
            continue;
        }
        if best.map_or(true, |(best_count, _)| count < best_count) {
            best = Some((count, idx));
        }
    }
    best.map(|(_, idx)| idx)
}

/// Depth-first MRV search with forward checking and propagation.
///
/// Exploration order is fixed: worker by MRV, then day ascending, on before
/// off. The first feasible roster found is returned.
#[derive(Debug, Default)]
pub struct RosterSolver {
    verbosity: u8,
    stats: SolveStats,
}

impl RosterSolver {
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            stats: SolveStats::default(),
        }
    }

    /// Solve `state` in place.
    ///
    /// On true `state` holds a complete assignment. On false `state` is
    /// exactly as it was passed in.
    pub fn solve(&mut self, state: &mut ScheduleState) -> bool {
        self.stats = SolveStats::default();
        if state.is_empty() {
            return true;
        }

        let solved = self.search(state, 0);
        if solved {
            log_decisions!(
                self.verbosity,
                "Solution found after {} nodes ({} backtracks)",
                self.stats.nodes,
                self.stats.backtracks
            );
        } else {
            log_decisions!(
                self.verbosity,
                "No solution after {} nodes",
                self.stats.nodes
            );
        }
        solved
    }

    /// Statistics of the most recent `solve` call.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    fn search(&mut self, state: &mut ScheduleState, depth: usize) -> bool {
        self.stats.nodes += 1;

        let Some(worker) = select_mrv(state) else {
            // Every domain is empty: all cells are committed.
            return true;
        };

        for day in 0..DAYS_PER_WEEK {
            for duty in Duty::ORDER {
                if !state.worker(worker).domain.is_live(day, duty) {
                    continue;
                }
                self.stats.moves_tried += 1;

                let mut trial = Trial::new();
                trial.commit(state, worker, day, duty);

                if check(state, worker, day) {
                    let mut child = state.clone();
                    if propagate(&mut child, worker, day) {
                        log_decisions!(
                            self.verbosity,
                            depth = depth,
                            "{} {} on {}",
                            state.worker(worker).id,
                            duty,
                            weekday(day)
                        );
                        if self.search(&mut child, depth + 1) {
                            *state = child;
                            return true;
                        }
                        self.stats.backtracks += 1;
                        log_decisions!(
                            self.verbosity,
                            depth = depth,
                            "backtrack {} {} on {}",
                            state.worker(worker).id,
                            duty,
                            weekday(day)
                        );
                    } else {
                        self.stats.propagation_failures += 1;
                    }
                } else {
                    self.stats.rejected += 1;
                    log_probes!(
                        self.verbosity,
                        depth = depth,
                        "reject {} {} on {}",
                        state.worker(worker).id,
                        duty,
                        weekday(day)
                    );
                }

                trial.rollback(state);
            }
        }
        false
    }
}

/// Solve `state` in place with the verbosity from its configuration.
pub fn solve(state: &mut ScheduleState) -> bool {
    RosterSolver::new(state.config().verbosity).solve(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterConfig;
    use crate::models::{Day, Seniority};

    fn build(workers: &[(&str, Seniority)], conflicts: &[&[&str]], config: RosterConfig) -> ScheduleState {
        let workers = workers.iter().map(|(id, s)| (id.to_string(), *s)).collect();
        let groups: Vec<Vec<String>> = conflicts
            .iter()
            .map(|g| g.iter().map(|s| s.to_string()).collect())
            .collect();
        ScheduleState::new(workers, &groups, config).unwrap()
    }

    fn config(min_days_off: u32, max_consec: u32, staff: u32, seniors: u32) -> RosterConfig {
        RosterConfig {
            min_days_off,
            max_consec_days_off: max_consec,
            min_daily_staff: staff,
            min_daily_seniors: seniors,
            verbosity: 0,
        }
    }

    /// Every hard constraint holds on a solved board.
    fn assert_valid(state: &ScheduleState) {
        let config = state.config().clone();
        assert!(state.is_complete(), "undecided cells:\n{}", state);

        for idx in state.worker_indices() {
            let id = &state.worker(idx).id;
            assert!(
                state.committed_count(idx, Duty::Off) >= config.min_days_off as usize,
                "{} has too few days off",
                id
            );
            let mut run = 0;
            for day in 0..DAYS_PER_WEEK {
                run = if state.is_off(idx, day) { run + 1 } else { 0 };
                assert!(
                    run < config.max_consec_days_off as usize,
                    "{} off too long ending day {}",
                    id,
                    day
                );
            }
        }

        for day in 0..DAYS_PER_WEEK {
            let on = state.committed_on_day(day, Duty::On);
            let seniors = on
                .iter()
                .filter(|&&idx| state.worker(idx).seniority.is_senior())
                .count();
            assert!(on.len() >= config.min_daily_staff as usize, "understaffed day {}", day);
            assert!(seniors >= config.min_daily_seniors as usize, "no senior on day {}", day);
            for &a in on {
                for &b in on {
                    assert!(!state.conflicts_of(a).contains(&b), "conflict on day {}", day);
                }
            }
        }
    }

    /// One worker's week as a bit mask, bit `day` set when on duty.
    fn week_is_valid(week: u8, config: &RosterConfig) -> bool {
        let off = |day: Day| week & (1u8 << day) == 0;
        if (0..DAYS_PER_WEEK).filter(|&d| off(d)).count() < config.min_days_off as usize {
            return false;
        }
        let mut run = 0;
        for day in 0..DAYS_PER_WEEK {
            run = if off(day) { run + 1 } else { 0 };
            if run >= config.max_consec_days_off as usize {
                return false;
            }
        }
        true
    }

    fn days_staffed(weeks: &[u8], tiers: &[Seniority], config: &RosterConfig) -> bool {
        (0..DAYS_PER_WEEK).all(|day| {
            let on: Vec<Seniority> = weeks
                .iter()
                .zip(tiers)
                .filter(|(week, _)| **week & (1u8 << day) != 0)
                .map(|(_, tier)| *tier)
                .collect();
            let seniors = on.iter().filter(|tier| tier.is_senior()).count();
            on.len() >= config.min_daily_staff as usize
                && seniors >= config.min_daily_seniors as usize
        })
    }

    /// Whether any complete roster for one or two workers satisfies `config`,
    /// found by trying every week of every worker.
    fn feasible_by_enumeration(tiers: &[Seniority], conflict: bool, config: &RosterConfig) -> bool {
        let weeks: Vec<u8> = (0..1u8 << DAYS_PER_WEEK)
            .filter(|&week| week_is_valid(week, config))
            .collect();
        match tiers.len() {
            1 => weeks.iter().any(|&a| days_staffed(&[a], tiers, config)),
            2 => weeks.iter().any(|&a| {
                weeks.iter().any(|&b| {
                    !(conflict && a & b != 0) && days_staffed(&[a, b], tiers, config)
                })
            }),
            n => panic!("enumeration supports one or two workers, got {}", n),
        }
    }

    #[test]
    fn test_agrees_with_enumeration_on_small_rosters() {
        let rosters: Vec<(Vec<Seniority>, bool)> = vec![
            (vec![Seniority::Regular], false),
            (vec![Seniority::Senior], false),
            (vec![Seniority::Regular, Seniority::Regular], false),
            (vec![Seniority::Regular, Seniority::Regular], true),
            (vec![Seniority::Regular, Seniority::Senior], false),
            (vec![Seniority::Regular, Seniority::Senior], true),
            (vec![Seniority::Senior, Seniority::Senior], false),
            (vec![Seniority::Senior, Seniority::Senior], true),
        ];
        let ids = ["A", "B"];

        let mut feasible = 0;
        let mut infeasible = 0;
        for (tiers, conflict) in &rosters {
            let workers: Vec<(&str, Seniority)> =
                ids.iter().copied().zip(tiers.iter().copied()).collect();
            let conflicts: &[&[&str]] = if *conflict { &[&["A", "B"]] } else { &[] };

            for min_days_off in 0..=4 {
                for max_consec in 0..=4 {
                    for staff in 0..=2 {
                        for seniors in 0..=2 {
                            let config = config(min_days_off, max_consec, staff, seniors);
                            let expected = feasible_by_enumeration(tiers, *conflict, &config);
                            let mut state = build(&workers, conflicts, config.clone());
                            let blank = state.render_grid();

                            let solved = solve(&mut state);
                            assert_eq!(
                                solved, expected,
                                "{:?} conflict={} {:?}",
                                tiers, conflict, config
                            );
                            if solved {
                                assert_valid(&state);
                                feasible += 1;
                            } else {
                                assert_eq!(state.render_grid(), blank);
                                infeasible += 1;
                            }
                        }
                    }
                }
            }
        }
        // Both outcomes are exercised.
        assert!(feasible > 0);
        assert!(infeasible > 0);
    }

    #[test]
    fn test_alternating_off_days_are_kept() {
        // Mon off, Tue on, Wed off must survive consecutive-off pruning.
        let mut state = build(&[("A", Seniority::Regular)], &[], config(4, 2, 0, 0));
        assert!(solve(&mut state));
        assert_valid(&state);
        assert_eq!(state.render_grid(), "x A x A x A x \n");
    }

    #[test]
    fn test_zero_consecutive_limit_has_no_roster() {
        let mut state = build(&[("A", Seniority::Regular)], &[], config(0, 0, 0, 0));
        let mut solver = RosterSolver::new(0);
        assert!(!solver.solve(&mut state));
        assert_eq!(solver.stats().rejected, solver.stats().moves_tried);
    }

    #[test]
    fn test_empty_roster_is_solved() {
        let mut state = build(&[], &[], RosterConfig::default());
        assert!(solve(&mut state));
    }

    #[test]
    fn test_mrv_prefers_fewest_options_then_identifier() {
        let mut state = build(
            &[
                ("a", Seniority::Regular),
                ("b", Seniority::Regular),
                ("c", Seniority::Regular),
            ],
            &[],
            RosterConfig::default(),
        );
        assert_eq!(select_mrv(&state), Some(0));

        state.eliminate(2, 0, Duty::On);
        state.eliminate(1, 0, Duty::On);
        assert_eq!(select_mrv(&state), Some(1));

        for day in 0..DAYS_PER_WEEK {
            state.commit(1, day, Duty::On);
        }
        // b has nothing left and is skipped.
        assert_eq!(select_mrv(&state), Some(2));
    }

    #[test]
    fn test_mrv_none_when_all_committed() {
        let mut state = build(&[("a", Seniority::Regular)], &[], RosterConfig::default());
        for day in 0..DAYS_PER_WEEK {
            state.commit(0, day, Duty::On);
        }
        assert_eq!(select_mrv(&state), None);
    }

    #[test]
    fn test_single_senior_needing_days_off_is_infeasible() {
        // B is the only senior, so B must work all seven days.
        let mut state = build(
            &[
                ("A", Seniority::Regular),
                ("B", Seniority::Senior),
                ("C", Seniority::Regular),
            ],
            &[],
            config(2, 3, 2, 1),
        );
        assert!(!solve(&mut state));
    }

    #[test]
    fn test_two_seniors_three_workers_is_feasible() {
        let mut state = build(
            &[
                ("A", Seniority::Regular),
                ("B", Seniority::Senior),
                ("C", Seniority::Senior),
            ],
            &[],
            config(2, 3, 2, 1),
        );
        assert!(solve(&mut state));
        assert_valid(&state);
    }

    #[test]
    fn test_more_staff_required_than_workers() {
        let mut state = build(
            &[
                ("A", Seniority::Senior),
                ("B", Seniority::Senior),
                ("C", Seniority::Senior),
            ],
            &[],
            config(0, 7, 4, 0),
        );
        let mut solver = RosterSolver::new(0);
        assert!(!solver.solve(&mut state));
        // Every move fails the staffing check, so nothing is explored.
        assert_eq!(solver.stats().nodes, 1);
        assert_eq!(solver.stats().rejected, solver.stats().moves_tried);
    }

    #[test]
    fn test_conflicting_pair_cannot_staff_alone() {
        let mut state = build(
            &[("A", Seniority::Regular), ("B", Seniority::Regular)],
            &[&["A", "B"]],
            config(2, 3, 2, 0),
        );
        let before = state.render_grid();
        let before_workers = state.workers().to_vec();

        assert!(!solve(&mut state));
        assert_eq!(state.render_grid(), before);
        assert_eq!(state.workers(), before_workers.as_slice());
    }

    #[test]
    fn test_relaxed_constraints_accept_all_on_duty() {
        let mut state = build(
            &[
                ("A", Seniority::Regular),
                ("B", Seniority::Senior),
                ("C", Seniority::Regular),
            ],
            &[],
            config(0, 7, 2, 1),
        );
        assert!(solve(&mut state));
        assert_eq!(
            state.render_grid(),
            "A A A A A A A \nB B B B B B B \nC C C C C C C \n"
        );
    }

    #[test]
    fn test_zero_senior_minimum_ignores_tier() {
        let mut state = build(
            &[
                ("A", Seniority::Regular),
                ("B", Seniority::Regular),
                ("C", Seniority::Regular),
            ],
            &[],
            config(1, 7, 2, 0),
        );
        assert!(solve(&mut state));
        assert_valid(&state);
    }

    #[test]
    fn test_conflict_respected_in_solution() {
        let mut state = build(
            &[
                ("A", Seniority::Regular),
                ("B", Seniority::Regular),
                ("C", Seniority::Regular),
                ("D", Seniority::Regular),
            ],
            &[&["A", "B"]],
            config(2, 3, 2, 0),
        );
        let mut solver = RosterSolver::new(0);
        assert!(solver.solve(&mut state));
        assert_valid(&state);
        assert!(solver.stats().nodes > 1);
        assert!(solver.stats().propagation_failures > 0);
    }

    #[test]
    fn test_solution_is_deterministic() {
        let make = || {
            build(
                &[
                    ("C", Seniority::Senior),
                    ("A", Seniority::Regular),
                    ("B", Seniority::Senior),
                ],
                &[],
                config(2, 3, 2, 1),
            )
        };
        let mut first = make();
        let mut second = make();
        assert!(solve(&mut first));
        assert!(solve(&mut second));
        assert_eq!(first.render_grid(), second.render_grid());
    }

    #[test]
    fn test_infeasible_is_stable_across_runs() {
        for _ in 0..3 {
            let mut state = build(
                &[("A", Seniority::Regular), ("B", Seniority::Regular)],
                &[&["A", "B"]],
                config(0, 7, 2, 0),
            );
            assert!(!solve(&mut state));
        }
    }
}
