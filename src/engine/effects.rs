//! Effect registry: timed, replace-on-grant buffs consumed by later actions.
//!
//! An effect with zero remaining duration is logically absent; `consume`
//! self-purges and the periodic sweep removes anything stale so readers never
//! observe a dead entry.

use crate::engine::state::{Effect, PlayerState};

impl PlayerState {
    /// Grant an effect. Granting an id that is already active replaces its
    /// duration; effects do not stack.
    pub fn grant_effect(&mut self, id: &str, duration: u32) {
        if let Some(existing) = self.effects.iter_mut().find(|effect| effect.id == id) {
            existing.duration = duration;
        } else {
            self.effects.push(Effect {
                id: id.to_string(),
                duration,
            });
        }
    }

    /// Consume one charge of the effect. Returns true and decrements when the
    /// effect is active; an exhausted entry is purged immediately.
    pub fn consume_effect(&mut self, id: &str) -> bool {
        let Some(effect) = self
            .effects
            .iter_mut()
            .find(|effect| effect.id == id && effect.duration > 0)
        else {
            return false;
        };
        effect.duration -= 1;
        if effect.duration == 0 {
            self.effects.retain(|effect| effect.duration > 0);
        }
        true
    }

    /// Sweep run by the periodic tick; removes exhausted entries.
    pub fn sweep_effects(&mut self) {
        self.effects.retain(|effect| effect.duration > 0);
    }

    pub fn effect_active(&self, id: &str) -> bool {
        self.effects
            .iter()
            .any(|effect| effect.id == id && effect.duration > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_replaces_duration_instead_of_stacking() {
        let mut state = PlayerState::default();
        state.grant_effect("hyper-anabolic", 1);
        state.grant_effect("hyper-anabolic", 3);
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].duration, 3);
    }

    #[test]
    fn consume_decrements_and_purges_at_zero() {
        let mut state = PlayerState::default();
        state.grant_effect("hyper-anabolic", 2);

        assert!(state.consume_effect("hyper-anabolic"));
        assert!(state.effect_active("hyper-anabolic"));

        assert!(state.consume_effect("hyper-anabolic"));
        assert!(!state.effect_active("hyper-anabolic"));
        assert!(state.effects.is_empty());

        assert!(!state.consume_effect("hyper-anabolic"));
    }

    #[test]
    fn consume_of_missing_effect_reports_false_without_mutation() {
        let mut state = PlayerState::default();
        state.grant_effect("other", 1);
        assert!(!state.consume_effect("hyper-anabolic"));
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].duration, 1);
    }

    #[test]
    fn sweep_removes_stale_entries() {
        let mut state = PlayerState::default();
        state.effects.push(Effect {
            id: "stale".to_string(),
            duration: 0,
        });
        state.grant_effect("live", 2);
        state.sweep_effects();
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].id, "live");
    }
}
