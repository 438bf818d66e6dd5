//! Per-row progress state.

use std::time::{Duration, Instant};

use crate::phase::Phase;

/// Identifier for a bar row, stable for the row's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// The raw slot value.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Live state behind one progress row.
///
/// Counters advance through the controller; rows are created, reset and
/// hidden by the registry. Hosts only read.
#[derive(Debug, Clone)]
pub struct ProgressTask {
    id: TaskId,
    phase: Phase,
    description: String,
    total: Option<u64>,
    completed: u64,
    visible: bool,
    epoch: u64,
    started_at: Instant,
    finished_at: Option<Instant>,
}

impl ProgressTask {
    pub(crate) fn new(id: TaskId, phase: Phase, total: Option<u64>, epoch: u64) -> Self {
        Self {
            id,
            phase,
            description: phase.label(epoch),
            total,
            completed: 0,
            visible: true,
            epoch,
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    /// Row identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Phase this row reports on.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Label shown in the description column.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit count of the source, when finite.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Units processed so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Whether the row is currently painted.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Epoch index the row belongs to.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Completed fraction against a known total, clamped to `1.0`.
    pub fn fraction(&self) -> Option<f64> {
        self.total.map(|total| {
            if total == 0 {
                1.0
            } else {
                (self.completed as f64 / total as f64).min(1.0)
            }
        })
    }

    /// Completed percentage against a known total.
    pub fn percentage(&self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }

    /// Whether the row has reached a known total.
    pub fn is_finished(&self) -> bool {
        self.total.is_some_and(|total| self.completed >= total)
    }

    /// Wall time since the row (re)started, frozen once the phase ends.
    pub fn elapsed(&self) -> Duration {
        match self.finished_at {
            Some(end) => end.duration_since(self.started_at),
            None => self.started_at.elapsed(),
        }
    }

    /// Units per second since the row (re)started.
    pub fn speed(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 { self.completed as f64 / secs } else { 0.0 }
    }

    /// Estimated time to reach the total at the current speed.
    pub fn remaining(&self) -> Option<Duration> {
        let total = self.total?;
        let speed = self.speed();
        if speed <= 0.0 {
            return None;
        }
        let left = total.saturating_sub(self.completed);
        Some(Duration::from_secs_f64(left as f64 / speed))
    }

    // Clamped to the total when one is known; a host overdriving its
    // declared source size never pushes the readout past it.
    pub(crate) fn advance(&mut self, n: u64) {
        let next = self.completed.saturating_add(n);
        self.completed = match self.total {
            Some(total) => next.min(total),
            None => next,
        };
    }

    /// Zeroes counters and restamps the clock for a new occurrence of
    /// the phase. The row itself is kept and re-shown.
    pub(crate) fn reset_for_epoch(&mut self, epoch: u64, total: Option<u64>) {
        self.completed = 0;
        self.total = total;
        self.epoch = epoch;
        self.description = self.phase.label(epoch);
        self.visible = true;
        self.started_at = Instant::now();
        self.finished_at = None;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(total: Option<u64>) -> ProgressTask {
        ProgressTask::new(TaskId(0), Phase::Train, total, 0)
    }

    #[test]
    fn advance_accumulates() {
        let mut t = task(Some(10));
        t.advance(3);
        t.advance(1);
        assert_eq!(t.completed(), 4);
        assert!(!t.is_finished());
    }

    #[test]
    fn advance_clamps_to_a_known_total() {
        let mut t = task(Some(4));
        t.advance(6);
        assert_eq!(t.completed(), 4);
        assert!((t.fraction().unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(t.is_finished());

        let mut unbounded = task(None);
        unbounded.advance(6);
        assert_eq!(unbounded.completed(), 6);
    }

    #[test]
    fn fraction_handles_zero_total() {
        let empty = task(Some(0));
        assert!((empty.fraction().unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(task(None).fraction().is_none());
    }

    #[test]
    fn reset_zeroes_counters_and_relabels() {
        let mut t = task(Some(10));
        t.advance(10);
        t.finish();
        t.set_visible(false);

        t.reset_for_epoch(2, Some(8));
        assert_eq!(t.completed(), 0);
        assert_eq!(t.total(), Some(8));
        assert_eq!(t.epoch(), 2);
        assert_eq!(t.description(), "Epoch 2");
        assert!(t.visible());
        assert!(!t.is_finished());
    }

    #[test]
    fn remaining_requires_progress() {
        let t = task(Some(10));
        assert!(t.remaining().is_none());
    }
}
