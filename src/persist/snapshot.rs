//! Persisted snapshot document: the flat record written to the remote store
//! and merged back field-by-field on startup.
//!
//! Every field is optional on read; an absent field keeps the in-memory
//! value. Unknown stat keys and unknown skill ids are skipped. Effects and
//! the log feed are deliberately not persisted.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::skills::skill_by_id;
use crate::engine::state::{PlayerState, StatKey};
use crate::engine::targets::Targets;
use crate::engine::Engine;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub xp: Option<u32>,
    #[serde(default)]
    pub xp_to_level: Option<u32>,
    #[serde(default)]
    pub energy: Option<u32>,
    #[serde(default)]
    pub energy_max: Option<u32>,
    #[serde(default)]
    pub stats: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub targets: Option<Targets>,
    #[serde(default)]
    pub bonus_stacks: Option<u32>,
    /// Epoch milliseconds at write time.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl PlayerSnapshot {
    /// Capture a fully-populated document from the live aggregate.
    pub fn capture(state: &PlayerState) -> Self {
        let stats = state
            .stats
            .iter()
            .map(|(key, stat)| (key.as_str().to_string(), stat.value))
            .collect();
        Self {
            level: Some(state.level),
            xp: Some(state.xp),
            xp_to_level: Some(state.xp_to_level),
            energy: Some(state.energy),
            energy_max: Some(state.energy_max),
            stats: Some(stats),
            skills: Some(state.skills.keys().cloned().collect()),
            targets: state.targets.clone(),
            bonus_stacks: Some(state.bonus_stacks),
            updated_at: Some(Utc::now().timestamp_millis()),
        }
    }

    /// Merge this document into the aggregate, field by field. This is the
    /// only path allowed to lower stat values or the energy ceiling.
    pub fn apply_to(&self, state: &mut PlayerState) {
        if let Some(level) = self.level {
            state.level = level;
        }
        if let Some(xp) = self.xp {
            state.xp = xp;
        }
        if let Some(xp_to_level) = self.xp_to_level {
            state.xp_to_level = xp_to_level;
        }
        if let Some(energy) = self.energy {
            state.energy = energy;
        }
        if let Some(energy_max) = self.energy_max {
            state.energy_max = energy_max;
        }
        if let Some(bonus_stacks) = self.bonus_stacks {
            state.bonus_stacks = bonus_stacks;
        }

        if let Some(stats) = &self.stats {
            for (raw_key, value) in stats {
                let Some(key) = StatKey::parse(raw_key) else {
                    continue;
                };
                if let Some(stat) = state.stats.get_mut(&key) {
                    stat.value = *value;
                }
            }
        }

        if let Some(targets) = &self.targets {
            state.targets = Some(targets.clone());
        }

        if let Some(ids) = &self.skills {
            state.skills.clear();
            for id in ids {
                if let Some(skill) = skill_by_id(id) {
                    state.skills.insert(skill.id.to_string(), *skill);
                }
            }
        }
    }
}

impl Engine {
    /// One-shot remote-state merge, then a fresh unlock pass: remote state may
    /// already satisfy predicates the defaults did not.
    pub fn apply_remote(&mut self, snapshot: &PlayerSnapshot) {
        snapshot.apply_to(&mut self.state);
        self.evaluate_unlocks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_serializes_the_documented_shape() {
        let state = PlayerState::default();
        let snapshot = PlayerSnapshot::capture(&state);
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["level"], 1);
        assert_eq!(value["xpToLevel"], 120);
        assert_eq!(value["energyMax"], 100);
        assert_eq!(value["stats"]["strength"], 18);
        assert_eq!(value["stats"]["aura"], 10);
        assert_eq!(value["bonusStacks"], 0);
        assert!(value["updatedAt"].as_i64().unwrap() > 0);
        assert!(value["skills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn partial_document_merges_field_by_field() {
        let mut state = PlayerState::default();
        let snapshot: PlayerSnapshot =
            serde_json::from_str(r#"{"level":5,"stats":{"strength":50}}"#).unwrap();
        snapshot.apply_to(&mut state);

        assert_eq!(state.level, 5);
        assert_eq!(state.stats[&StatKey::Strength].value, 50);
        // Every other field keeps its prior in-memory value.
        assert_eq!(state.xp, 0);
        assert_eq!(state.xp_to_level, 120);
        assert_eq!(state.energy, 100);
        assert_eq!(state.stats[&StatKey::Agility].value, 14);
        assert!(state.skills.is_empty());
    }

    #[test]
    fn unknown_stat_keys_are_skipped() {
        let mut state = PlayerState::default();
        let snapshot: PlayerSnapshot =
            serde_json::from_str(r#"{"stats":{"charisma":99,"focus":40}}"#).unwrap();
        snapshot.apply_to(&mut state);
        assert_eq!(state.stats[&StatKey::Focus].value, 40);
        assert_eq!(state.stats.len(), 5);
    }

    #[test]
    fn skills_restore_as_frozen_library_copies() {
        let mut state = PlayerState::default();
        let snapshot: PlayerSnapshot =
            serde_json::from_str(r#"{"skills":["manual-reps","retired-skill"]}"#).unwrap();
        snapshot.apply_to(&mut state);
        assert_eq!(state.skills.len(), 1);
        assert_eq!(state.skills["manual-reps"].name, "Manual Reps");
    }

    #[test]
    fn targets_round_trip_through_the_document() {
        let mut engine = Engine::new(7);
        let targets = engine.generate_default_targets();
        engine.state.targets = Some(targets.clone());

        let snapshot = PlayerSnapshot::capture(&engine.state);
        let raw = serde_json::to_string(&snapshot).unwrap();
        let parsed: PlayerSnapshot = serde_json::from_str(&raw).unwrap();

        let mut fresh = PlayerState::default();
        parsed.apply_to(&mut fresh);
        assert_eq!(fresh.targets, Some(targets));
    }
}
