//! Progression engine: a single-writer state machine over [PlayerState].
//!
//! All mutation goes through [Engine]. Components (stat ledger, effect
//! registry, skill unlocks, action resolver, progression core, target
//! generator) are impl blocks over the same aggregate, split by module.

pub mod actions;
pub mod effects;
pub mod progression;
pub mod rng;
pub mod skills;
pub mod state;
pub mod stats;
pub mod targets;
pub mod ticks;

pub use actions::{
    classify_event_roll, training_action, training_actions, ActionDefinition, RaidOutcome,
    TrainingEvent, TrainingOutcome, RAID_ENERGY_COST,
};
pub use rng::Rng;
pub use skills::{skill_library, Requirement, SkillDefinition};
pub use state::{
    Effect, LogEntry, LogKind, Notification, PlayerState, Stat, StatKey, MAX_LOG_ENTRIES,
};
pub use targets::Targets;
pub use ticks::Ticker;

use state::PlayerState as State;

/// Owns the player aggregate, the seeded RNG, and the outboxes the trigger
/// surfaces drain (notifications, dirty flag).
#[derive(Debug)]
pub struct Engine {
    pub state: State,
    rng: Rng,
    notifications: Vec<Notification>,
    dirty: bool,
    legion_ticker: u32,
}

impl Engine {
    pub fn new(seed: u64) -> Self {
        Self::from_state(State::default(), seed)
    }

    pub fn from_state(state: State, seed: u64) -> Self {
        Self {
            state,
            rng: Rng::new(seed),
            notifications: Vec::new(),
            dirty: false,
            legion_ticker: 0,
        }
    }

    /// Startup pass: ensure targets exist, grant any already-satisfied skills,
    /// write the boot banner to the feed. Safe to call once per process.
    pub fn initialize(&mut self) {
        if self.state.targets.is_none() {
            let targets = self.generate_default_targets();
            self.state.targets = Some(targets);
        }
        self.evaluate_unlocks();
        self.log(LogKind::Status, "Shadow training shell initialized.");
        self.log(
            LogKind::Status,
            "Manual Reps protocol loaded. Awaiting commands.",
        );
    }

    pub fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.state.push_log(kind, message);
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Hands the pending notifications to the caller, clearing the outbox.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Reads and clears the dirty flag. The session driver forwards a `true`
    /// result to the persistence reconciler.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_generates_targets_and_baseline_skill() {
        let mut engine = Engine::new(7);
        engine.initialize();
        assert!(engine.state.targets.is_some());
        // manual-reps has an always-true requirement.
        assert!(engine.state.has_skill("manual-reps"));
        assert!(engine.take_dirty());
    }

    #[test]
    fn drain_notifications_empties_the_outbox() {
        let mut engine = Engine::new(7);
        engine.notify(Notification::plain("NOTICE", "test"));
        assert_eq!(engine.drain_notifications().len(), 1);
        assert!(engine.drain_notifications().is_empty());
    }
}
