//! Creation-ordered task store with per-phase current-row tracking.

use std::collections::HashMap;

use crate::phase::Phase;
use crate::task::{ProgressTask, TaskId};

/// Outcome of claiming a row for a phase occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotOutcome {
    /// A fresh row was created.
    Created(TaskId),
    /// An existing row was reset in place; the caller must mirror the
    /// reset to the renderer.
    Reused(TaskId),
}

impl SlotOutcome {
    #[cfg(test)]
    fn id(self) -> TaskId {
        match self {
            SlotOutcome::Created(id) | SlotOutcome::Reused(id) => id,
        }
    }
}

/// All rows of the current run, in creation order.
///
/// One row per phase is "current" at a time; older rows survive only as
/// frozen history (leave policy). Rows live until the controller tears
/// down, except sanity rows which are discarded when training begins.
#[derive(Debug, Default)]
pub(crate) struct TaskRegistry {
    tasks: Vec<ProgressTask>,
    current: HashMap<Phase, TaskId>,
    next_id: usize,
}

impl TaskRegistry {
    /// Claims the row for a starting phase occurrence.
    ///
    /// With `leave` unset an existing current row is reset in place;
    /// otherwise a new row is created and the old one stops being
    /// current. Starting a secondary phase first hides every other
    /// visible secondary row, keeping at most one on screen.
    pub(crate) fn begin_phase(
        &mut self,
        phase: Phase,
        total: Option<u64>,
        epoch: u64,
        leave: bool,
    ) -> SlotOutcome {
        if phase.is_secondary() {
            self.hide_visible_secondaries();
        }

        if !leave
            && let Some(&id) = self.current.get(&phase)
            && let Some(task) = self.task_mut(id)
        {
            task.reset_for_epoch(epoch, total);
            return SlotOutcome::Reused(id);
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ProgressTask::new(id, phase, total, epoch));
        self.current.insert(phase, id);
        SlotOutcome::Created(id)
    }

    /// Marks the phase's current row finished and applies the leave
    /// policy: hidden until the next occurrence when `leave` is unset,
    /// left on screen otherwise.
    pub(crate) fn finish_phase(&mut self, phase: Phase, leave: bool) {
        if let Some(&id) = self.current.get(&phase)
            && let Some(task) = self.task_mut(id)
        {
            task.finish();
            if !leave {
                task.set_visible(false);
            }
        }
    }

    /// Advances the phase's current row by `n` units.
    pub(crate) fn advance(&mut self, phase: Phase, n: u64) {
        if let Some(&id) = self.current.get(&phase)
            && let Some(task) = self.task_mut(id)
        {
            task.advance(n);
        }
    }

    /// Drops sanity rows entirely. They never participate in the leave
    /// policy and are never retained across epochs.
    pub(crate) fn discard_sanity(&mut self) {
        self.tasks.retain(|t| t.phase() != Phase::SanityCheck);
        self.current.remove(&Phase::SanityCheck);
    }

    /// Current row for `phase`, if one exists.
    pub(crate) fn current(&self, phase: Phase) -> Option<&ProgressTask> {
        let id = *self.current.get(&phase)?;
        self.task(id)
    }

    /// Row by identifier.
    pub(crate) fn task(&self, id: TaskId) -> Option<&ProgressTask> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Every visible row, in creation order.
    pub(crate) fn visible(&self) -> Vec<&ProgressTask> {
        self.tasks.iter().filter(|t| t.visible()).collect()
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut ProgressTask> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    fn hide_visible_secondaries(&mut self) {
        for task in &mut self.tasks {
            if task.phase().is_secondary() && task.visible() {
                task.set_visible(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuse_resets_in_place_when_leave_unset() {
        let mut reg = TaskRegistry::default();
        let first = reg.begin_phase(Phase::Train, Some(4), 0, false);
        assert!(matches!(first, SlotOutcome::Created(_)));
        reg.advance(Phase::Train, 4);
        reg.finish_phase(Phase::Train, false);

        let second = reg.begin_phase(Phase::Train, Some(4), 1, false);
        assert_eq!(second, SlotOutcome::Reused(first.id()));
        let task = reg.current(Phase::Train).unwrap();
        assert_eq!(task.completed(), 0);
        assert_eq!(task.epoch(), 1);
        assert!(task.visible());
        assert_eq!(reg.visible().len(), 1);
    }

    #[test]
    fn leave_creates_a_fresh_row_and_keeps_history() {
        let mut reg = TaskRegistry::default();
        let first = reg.begin_phase(Phase::Train, Some(4), 0, true);
        reg.advance(Phase::Train, 4);
        reg.finish_phase(Phase::Train, true);

        let second = reg.begin_phase(Phase::Train, Some(4), 1, true);
        assert!(matches!(second, SlotOutcome::Created(_)));
        assert_ne!(first.id(), second.id());
        // the finished epoch stays on screen, the new row is current
        assert_eq!(reg.visible().len(), 2);
        assert_eq!(reg.current(Phase::Train).unwrap().id(), second.id());
    }

    #[test]
    fn at_most_one_secondary_row_is_visible() {
        let mut reg = TaskRegistry::default();
        reg.begin_phase(Phase::Train, Some(4), 0, false);
        reg.begin_phase(Phase::Validate, Some(2), 0, false);
        assert_eq!(reg.visible().len(), 2);

        reg.begin_phase(Phase::Test, Some(2), 0, false);
        let visible = reg.visible();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().any(|t| t.phase() == Phase::Train));
        assert!(visible.iter().any(|t| t.phase() == Phase::Test));
    }

    #[test]
    fn discard_sanity_removes_rows_outright() {
        let mut reg = TaskRegistry::default();
        reg.begin_phase(Phase::SanityCheck, Some(2), 0, false);
        reg.discard_sanity();
        assert!(reg.current(Phase::SanityCheck).is_none());
        assert!(reg.visible().is_empty());
    }

    #[test]
    fn visible_rows_keep_creation_order() {
        let mut reg = TaskRegistry::default();
        reg.begin_phase(Phase::Train, Some(4), 0, true);
        reg.begin_phase(Phase::Train, Some(4), 1, true);
        reg.begin_phase(Phase::Validate, Some(2), 1, false);
        let phases: Vec<Phase> = reg.visible().iter().map(|t| t.phase()).collect();
        assert_eq!(phases, vec![Phase::Train, Phase::Train, Phase::Validate]);
    }

    #[test]
    fn hidden_secondary_reappears_on_reset() {
        let mut reg = TaskRegistry::default();
        reg.begin_phase(Phase::Validate, Some(2), 0, false);
        reg.finish_phase(Phase::Validate, false);
        assert!(reg.visible().is_empty());

        reg.begin_phase(Phase::Validate, Some(2), 1, false);
        assert_eq!(reg.visible().len(), 1);
    }

    #[test]
    fn leave_true_still_hides_prior_secondary_rows() {
        let mut reg = TaskRegistry::default();
        reg.begin_phase(Phase::Validate, Some(2), 0, true);
        reg.finish_phase(Phase::Validate, true);
        assert_eq!(reg.visible().len(), 1);

        // a later occurrence replaces the old row instead of stacking
        reg.begin_phase(Phase::Validate, Some(2), 1, true);
        let visible = reg.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].epoch(), 1);
    }
}
