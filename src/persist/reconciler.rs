//! Persistence reconciler: Clean / Dirty / Saving with a rescheduling
//! debounce. Each new dirty mark resets the single resettable deadline; the
//! session loop polls for due saves and reports their outcome back.

use std::time::{Duration, Instant};

pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(1400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    Clean,
    Dirty,
    Saving,
}

#[derive(Debug)]
pub struct Reconciler {
    phase: SavePhase,
    deadline: Option<Instant>,
    debounce: Duration,
    enabled: bool,
    suppressed: bool,
    dirtied_while_saving: bool,
}

impl Reconciler {
    pub fn new(enabled: bool) -> Self {
        Self::with_debounce(enabled, SAVE_DEBOUNCE)
    }

    pub fn with_debounce(enabled: bool, debounce: Duration) -> Self {
        Self {
            phase: SavePhase::Clean,
            deadline: None,
            debounce,
            enabled,
            suppressed: false,
            dirtied_while_saving: false,
        }
    }

    pub fn phase(&self) -> SavePhase {
        self.phase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suppress dirty-marking for the startup pull-and-initialize window so
    /// no loopback write escapes.
    pub fn suppress(&mut self) {
        self.suppressed = true;
    }

    pub fn resume(&mut self) {
        self.suppressed = false;
    }

    /// Record a mutation. No-op while suppressed or when persistence is
    /// administratively disabled. Always resets the debounce deadline.
    pub fn mark_dirty(&mut self, now: Instant) {
        if !self.enabled || self.suppressed {
            return;
        }
        match self.phase {
            SavePhase::Clean | SavePhase::Dirty => {
                self.phase = SavePhase::Dirty;
                self.deadline = Some(now + self.debounce);
            }
            SavePhase::Saving => {
                self.dirtied_while_saving = true;
                self.deadline = Some(now + self.debounce);
            }
        }
    }

    /// True exactly when a save attempt should start now; transitions
    /// Dirty -> Saving. The caller performs the write and reports via
    /// [finish](Reconciler::finish).
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.phase != SavePhase::Dirty {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.phase = SavePhase::Saving;
                self.deadline = None;
                self.dirtied_while_saving = false;
                true
            }
            _ => false,
        }
    }

    /// Report the outcome of a save attempt. Failure returns to Dirty with a
    /// re-armed deadline so a future debounce cycle retries without needing
    /// another mutation.
    pub fn finish(&mut self, ok: bool, now: Instant) {
        debug_assert_eq!(self.phase, SavePhase::Saving);
        if ok {
            if self.dirtied_while_saving {
                self.phase = SavePhase::Dirty;
            } else {
                self.phase = SavePhase::Clean;
                self.deadline = None;
            }
        } else {
            self.phase = SavePhase::Dirty;
            self.deadline = Some(now + self.debounce);
        }
        self.dirtied_while_saving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn reconciler() -> (Reconciler, Instant) {
        (Reconciler::with_debounce(true, TICK), Instant::now())
    }

    #[test]
    fn single_mutation_produces_exactly_one_write_attempt() {
        let (mut rec, t0) = reconciler();
        rec.mark_dirty(t0);
        assert_eq!(rec.phase(), SavePhase::Dirty);

        assert!(!rec.poll(t0 + TICK / 2));
        assert!(rec.poll(t0 + TICK));
        assert_eq!(rec.phase(), SavePhase::Saving);

        rec.finish(true, t0 + TICK);
        assert_eq!(rec.phase(), SavePhase::Clean);
        assert!(!rec.poll(t0 + TICK * 10));
    }

    #[test]
    fn rapid_mutations_collapse_into_one_write() {
        let (mut rec, t0) = reconciler();
        rec.mark_dirty(t0);
        rec.mark_dirty(t0 + TICK / 4);
        rec.mark_dirty(t0 + TICK / 2);

        // The deadline tracks the most recent mutation.
        assert!(!rec.poll(t0 + TICK));
        assert!(rec.poll(t0 + TICK / 2 + TICK));
        rec.finish(true, t0 + TICK * 2);
        assert_eq!(rec.phase(), SavePhase::Clean);
    }

    #[test]
    fn failed_save_returns_to_dirty_and_retries() {
        let (mut rec, t0) = reconciler();
        rec.mark_dirty(t0);
        assert!(rec.poll(t0 + TICK));

        rec.finish(false, t0 + TICK);
        assert_eq!(rec.phase(), SavePhase::Dirty);

        // Retry without a new mutation.
        assert!(rec.poll(t0 + TICK * 2));
        rec.finish(true, t0 + TICK * 2);
        assert_eq!(rec.phase(), SavePhase::Clean);
    }

    #[test]
    fn mutation_during_save_schedules_a_follow_up() {
        let (mut rec, t0) = reconciler();
        rec.mark_dirty(t0);
        assert!(rec.poll(t0 + TICK));

        rec.mark_dirty(t0 + TICK);
        rec.finish(true, t0 + TICK);
        assert_eq!(rec.phase(), SavePhase::Dirty);
        assert!(rec.poll(t0 + TICK * 2));
    }

    #[test]
    fn suppression_window_swallows_dirty_marks() {
        let (mut rec, t0) = reconciler();
        rec.suppress();
        rec.mark_dirty(t0);
        assert_eq!(rec.phase(), SavePhase::Clean);

        rec.resume();
        rec.mark_dirty(t0);
        assert_eq!(rec.phase(), SavePhase::Dirty);
    }

    #[test]
    fn disabled_reconciler_ignores_everything() {
        let mut rec = Reconciler::with_debounce(false, TICK);
        let t0 = Instant::now();
        rec.mark_dirty(t0);
        assert_eq!(rec.phase(), SavePhase::Clean);
        assert!(!rec.poll(t0 + TICK * 10));
    }
}
