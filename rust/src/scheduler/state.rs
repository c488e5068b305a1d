//! The schedule board searched by the solver.

use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::RosterConfig;
use crate::error::RosterError;
use crate::interner::{WorkerIdInterner, WorkerIdx};
use crate::models::{Day, Duty, Seniority, Worker, DAYS_PER_WEEK};

/// Cell marker for an off-duty day in the rendered grid.
pub const OFF_MARKER: &str = "x";
/// Cell marker for an undecided day in the rendered grid.
pub const UNDECIDED_MARKER: &str = "-";

/// Per-day committed assignments, worker domains and constraint thresholds.
///
/// Cloning copies the mutable board (domains and committed sets) while the
/// conflict relation, fixed at construction, stays shared.
#[derive(Clone, Debug)]
pub struct ScheduleState {
    /// Worker table indexed by `WorkerIdx` (identifier order)
    workers: Vec<Worker>,
    /// Workers committed on duty, per day
    on: [FxHashSet<WorkerIdx>; DAYS_PER_WEEK],
    /// Workers committed off duty, per day
    off: [FxHashSet<WorkerIdx>; DAYS_PER_WEEK],
    /// Symmetric, irreflexive adjacency lists, sorted by index
    conflicts: Arc<Vec<Vec<WorkerIdx>>>,
    config: RosterConfig,
}

impl ScheduleState {
    /// Build a fresh board with every (worker, day) undecided.
    ///
    /// Every pairing within a conflict group becomes a symmetric edge; a
    /// worker is never linked to itself.
    pub fn new(
        workers: Vec<(String, Seniority)>,
        conflict_groups: &[Vec<String>],
        config: RosterConfig,
    ) -> Result<Self, RosterError> {
        let index = WorkerIdInterner::from_ids(workers.iter().map(|(id, _)| id.clone()));
        if index.len() != workers.len() {
            let mut seen = FxHashSet::default();
            for (id, _) in &workers {
                if !seen.insert(id.as_str()) {
                    return Err(RosterError::DuplicateWorker(id.clone()));
                }
            }
        }

        let mut table: Vec<Option<Worker>> = vec![None; index.len()];
        for (id, seniority) in workers {
            if let Some(idx) = index.get(&id) {
                table[idx as usize] = Some(Worker::new(id, seniority));
            }
        }
        let workers: Vec<Worker> = table.into_iter().flatten().collect();

        let mut conflicts: Vec<FxHashSet<WorkerIdx>> = vec![FxHashSet::default(); index.len()];
        for group in conflict_groups {
            let members = group
                .iter()
                .map(|id| {
                    index
                        .get(id)
                        .ok_or_else(|| RosterError::UnknownWorker(id.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            for &a in &members {
                for &b in &members {
                    if a != b {
                        conflicts[a as usize].insert(b);
                    }
                }
            }
        }
        let conflicts: Vec<Vec<WorkerIdx>> = conflicts
            .into_iter()
            .map(|set| {
                let mut partners: Vec<WorkerIdx> = set.into_iter().collect();
                partners.sort_unstable();
                partners
            })
            .collect();

        Ok(Self {
            workers,
            on: std::array::from_fn(|_| FxHashSet::default()),
            off: std::array::from_fn(|_| FxHashSet::default()),
            conflicts: Arc::new(conflicts),
            config,
        })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Workers in index (identifier) order.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    #[inline]
    pub fn worker(&self, idx: WorkerIdx) -> &Worker {
        &self.workers[idx as usize]
    }

    #[inline]
    pub(crate) fn worker_mut(&mut self, idx: WorkerIdx) -> &mut Worker {
        &mut self.workers[idx as usize]
    }

    /// Indices of all workers, in tie-break order.
    pub fn worker_indices(&self) -> impl Iterator<Item = WorkerIdx> {
        0..self.workers.len() as WorkerIdx
    }

    /// Conflict partners of a worker, in index order.
    pub fn conflicts_of(&self, idx: WorkerIdx) -> &[WorkerIdx] {
        &self.conflicts[idx as usize]
    }

    #[inline]
    fn committed(&self, duty: Duty) -> &[FxHashSet<WorkerIdx>; DAYS_PER_WEEK] {
        match duty {
            Duty::On => &self.on,
            Duty::Off => &self.off,
        }
    }

    #[inline]
    fn committed_mut(&mut self, duty: Duty) -> &mut [FxHashSet<WorkerIdx>; DAYS_PER_WEEK] {
        match duty {
            Duty::On => &mut self.on,
            Duty::Off => &mut self.off,
        }
    }

    #[inline]
    pub fn is_on(&self, idx: WorkerIdx, day: Day) -> bool {
        self.on[day].contains(&idx)
    }

    #[inline]
    pub fn is_off(&self, idx: WorkerIdx, day: Day) -> bool {
        self.off[day].contains(&idx)
    }

    /// Committed duty for a cell, `None` while undecided.
    pub fn duty_of(&self, idx: WorkerIdx, day: Day) -> Option<Duty> {
        if self.is_on(idx, day) {
            Some(Duty::On)
        } else if self.is_off(idx, day) {
            Some(Duty::Off)
        } else {
            None
        }
    }

    /// Number of days the worker is committed to `duty`.
    pub fn committed_count(&self, idx: WorkerIdx, duty: Duty) -> usize {
        self.committed(duty)
            .iter()
            .filter(|workers| workers.contains(&idx))
            .count()
    }

    /// Workers committed to `duty` on `day`.
    pub fn committed_on_day(&self, day: Day, duty: Duty) -> &FxHashSet<WorkerIdx> {
        &self.committed(duty)[day]
    }

    /// Workers who are on duty or could still be on duty for `day`,
    /// as `(total, seniors)`.
    pub fn reachable_staff(&self, day: Day) -> (usize, usize) {
        let mut total = 0;
        let mut seniors = 0;
        for (idx, worker) in self.workers.iter().enumerate() {
            if worker.domain.is_live(day, Duty::On) || self.on[day].contains(&(idx as WorkerIdx)) {
                total += 1;
                if worker.seniority.is_senior() {
                    seniors += 1;
                }
            }
        }
        (total, seniors)
    }

    /// Whether every (worker, day) cell has been committed.
    pub fn is_complete(&self) -> bool {
        self.worker_indices()
            .all(|idx| (0..DAYS_PER_WEEK).all(|day| self.duty_of(idx, day).is_some()))
    }

    /// Move a cell out of the domain and into the committed set for `duty`.
    ///
    /// Returns the domain bits `(on, off)` held before the move so the
    /// caller can restore them.
    pub(crate) fn commit(&mut self, idx: WorkerIdx, day: Day, duty: Duty) -> (bool, bool) {
        let domain = &mut self.worker_mut(idx).domain;
        let saved = (domain.available_on[day], domain.available_off[day]);
        domain.available_on[day] = false;
        domain.available_off[day] = false;
        self.committed_mut(duty)[day].insert(idx);
        saved
    }

    /// Undo a `commit`, restoring the saved domain bits.
    pub(crate) fn restore(&mut self, idx: WorkerIdx, day: Day, duty: Duty, saved: (bool, bool)) {
        self.committed_mut(duty)[day].remove(&idx);
        let domain = &mut self.worker_mut(idx).domain;
        domain.available_on[day] = saved.0;
        domain.available_off[day] = saved.1;
    }

    /// Drop `duty` from the worker's remaining options for `day`.
    pub(crate) fn eliminate(&mut self, idx: WorkerIdx, day: Day, duty: Duty) {
        self.worker_mut(idx).domain.set(day, duty, false);
    }

    /// Committed grid as `(identifier, [duty per day])` rows in identifier order.
    pub fn assignments(&self) -> Vec<(String, [Option<Duty>; DAYS_PER_WEEK])> {
        self.worker_indices()
            .map(|idx| {
                let row = std::array::from_fn(|day| self.duty_of(idx, day));
                (self.worker(idx).id.clone(), row)
            })
            .collect()
    }

    /// Render the grid: one row per worker, the worker's identifier on duty,
    /// `x` off duty, `-` undecided.
    pub fn render_grid(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in self.worker_indices() {
            let id = &self.worker(idx).id;
            for day in 0..DAYS_PER_WEEK {
                let cell = match self.duty_of(idx, day) {
                    Some(Duty::On) => id.as_str(),
                    Some(Duty::Off) => OFF_MARKER,
                    None => UNDECIDED_MARKER,
                };
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
