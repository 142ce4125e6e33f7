//! Skill catalog and unlock engine.
//!
//! Unlock requirements are a closed enum evaluated against an immutable view
//! of the player state, so they are pure and safe to re-evaluate on every
//! pass. An unlocked skill is a frozen copy of its definition: once present
//! it is never removed or re-derived.

use crate::engine::state::{LogKind, PlayerState};
use crate::engine::Engine;

pub const MANUAL_REPS: &str = "manual-reps";
pub const SHADOW_MOMENTUM: &str = "shadow-momentum";
pub const HYPER_ANABOLIC: &str = "hyper-anabolic";
pub const MONARCH_REDUX: &str = "monarch-redux";
pub const SHADOW_LEGION: &str = "shadow-legion";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    LevelAtLeast(u32),
    TotalPowerAtLeast(u32),
}

impl Requirement {
    pub fn met(self, state: &PlayerState) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::LevelAtLeast(level) => state.level >= level,
            Requirement::TotalPowerAtLeast(power) => state.total_power() >= power,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub tier: &'static str,
    pub requirement: Requirement,
}

const SKILL_LIBRARY: [SkillDefinition; 5] = [
    SkillDefinition {
        id: MANUAL_REPS,
        name: "Manual Reps",
        desc: "Baseline control. All stat gains are amplified by your determination.",
        tier: "D",
        requirement: Requirement::Always,
    },
    SkillDefinition {
        id: SHADOW_MOMENTUM,
        name: "Shadow Momentum",
        desc: "Every third session refunds 25% energy. Stackable resonance.",
        tier: "C",
        requirement: Requirement::LevelAtLeast(2),
    },
    SkillDefinition {
        id: HYPER_ANABOLIC,
        name: "Hyper Anabolic Surge",
        desc: "First workout after unlocking grants +75% XP and +2 bonus stat points.",
        tier: "B",
        requirement: Requirement::LevelAtLeast(4),
    },
    SkillDefinition {
        id: MONARCH_REDUX,
        name: "Monarch Redux",
        desc: "Gate raids scale off total stats instead of randomness.",
        tier: "A",
        requirement: Requirement::TotalPowerAtLeast(640),
    },
    SkillDefinition {
        id: SHADOW_LEGION,
        name: "Shadow Legion Spotters",
        desc: "Summons auto-trainers that harvest +1 stat per minute while above 60 energy.",
        tier: "S",
        requirement: Requirement::LevelAtLeast(8),
    },
];

/// The static library in definition order.
pub fn skill_library() -> &'static [SkillDefinition] {
    &SKILL_LIBRARY
}

pub fn skill_by_id(id: &str) -> Option<&'static SkillDefinition> {
    SKILL_LIBRARY.iter().find(|skill| skill.id == id)
}

impl Engine {
    /// Evaluate every not-yet-unlocked skill against current state, granting
    /// those whose requirement holds. Returns whether anything unlocked.
    ///
    /// The hyper-anabolic unlock additionally primes its one-shot effect;
    /// that wiring is specific to that skill id.
    pub fn evaluate_unlocks(&mut self) -> bool {
        let mut unlocked = false;
        for skill in skill_library() {
            if self.state.has_skill(skill.id) || !skill.requirement.met(&self.state) {
                continue;
            }
            self.state.skills.insert(skill.id.to_string(), *skill);
            unlocked = true;
            self.log(
                LogKind::Loot,
                format!("Skill unlocked: {} ({}).", skill.name, skill.tier),
            );
            if skill.id == HYPER_ANABOLIC {
                self.state.grant_effect(HYPER_ANABOLIC, 1);
            }
        }
        if unlocked {
            self.mark_dirty();
        }
        unlocked
    }
}
