//! Action resolver: training actions, the gate raid, and the post-action
//! event policy.
//!
//! The random event is resolved through one uniform draw classified against
//! explicit cumulative boundaries, so the policy is testable with an injected
//! roll independently of the RNG.

use crate::engine::skills::{HYPER_ANABOLIC, MONARCH_REDUX, SHADOW_MOMENTUM};
use crate::engine::state::{LogKind, Notification, StatKey};
use crate::engine::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub energy_cost: u32,
    pub xp_gain: u32,
    pub stat: Option<StatKey>,
    pub stat_gain: u32,
    pub flavor: &'static str,
}

const TRAINING_ACTIONS: [ActionDefinition; 4] = [
    ActionDefinition {
        key: "strength",
        name: "Titan Lifts",
        energy_cost: 18,
        xp_gain: 26,
        stat: Some(StatKey::Strength),
        stat_gain: 6,
        flavor: "Crushed the Titan series with adaptive resistance platforms.",
    },
    ActionDefinition {
        key: "agility",
        name: "Shadow Sprints",
        energy_cost: 14,
        xp_gain: 22,
        stat: Some(StatKey::Agility),
        stat_gain: 5,
        flavor: "Phased through an obstacle grid in 34.2 seconds.",
    },
    ActionDefinition {
        key: "endurance",
        name: "Void Cycling",
        energy_cost: 16,
        xp_gain: 24,
        stat: Some(StatKey::Endurance),
        stat_gain: 5,
        flavor: "Maintained 170 BPM under zero-g resistance for 12 minutes.",
    },
    ActionDefinition {
        key: "focus",
        name: "Mind Palace",
        energy_cost: 12,
        xp_gain: 18,
        stat: Some(StatKey::Focus),
        stat_gain: 4,
        flavor: "Cracked the mental dungeon; neural sync increased by 7%.",
    },
];

pub const RAID_ENERGY_COST: u32 = 38;
pub const RAID_DIFFICULTY_MIN: i64 = 480;
pub const RAID_DIFFICULTY_MAX: i64 = 820;
pub const RAID_VARIANCE: i64 = 90;
const RAID_SURGE_CHANCE: f64 = 0.36;

const HYPER_XP_MULTIPLIER: f64 = 1.75;
const HYPER_BONUS_STAT_GAIN: u32 = 2;
const MOMENTUM_REFUND_RATE: f64 = 0.25;

/// Static catalog lookup by wire/CLI key. Unknown keys are a no-op for
/// callers, matching the permissive reference behavior.
pub fn training_action(key: &str) -> Option<&'static ActionDefinition> {
    TRAINING_ACTIONS.iter().find(|action| action.key == key)
}

pub fn training_actions() -> &'static [ActionDefinition] {
    &TRAINING_ACTIONS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    UnknownAction,
    InsufficientEnergy,
    Performed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidOutcome {
    InsufficientEnergy,
    Victory { xp_gain: u32, stat_gain: u32 },
    Backlash { energy_lost: u32 },
}

/// Post-action event kinds, in cumulative-boundary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingEvent {
    BonusXp,
    EnergyShield,
    Quiet,
    EnergyDrain,
}

pub const EVENT_BONUS_XP_BOUND: f64 = 0.12;
pub const EVENT_SHIELD_BOUND: f64 = 0.22;
/// Exclusive on the high side: a roll of exactly 0.92 stays quiet.
pub const EVENT_DRAIN_BOUND: f64 = 0.92;

/// Classify one uniform roll in [0, 1) against the event boundaries.
pub fn classify_event_roll(roll: f64) -> TrainingEvent {
    if roll < EVENT_BONUS_XP_BOUND {
        TrainingEvent::BonusXp
    } else if roll < EVENT_SHIELD_BOUND {
        TrainingEvent::EnergyShield
    } else if roll > EVENT_DRAIN_BOUND {
        TrainingEvent::EnergyDrain
    } else {
        TrainingEvent::Quiet
    }
}

impl Engine {
    /// Resolve one training action by catalog key.
    pub fn execute_training(&mut self, key: &str) -> TrainingOutcome {
        let Some(action) = training_action(key) else {
            return TrainingOutcome::UnknownAction;
        };

        if self.state.energy < action.energy_cost {
            self.log(
                LogKind::Alert,
                format!(
                    "Insufficient energy for {}. Initiate recovery protocols.",
                    action.name
                ),
            );
            return TrainingOutcome::InsufficientEnergy;
        }

        self.state.energy -= action.energy_cost;
        let mut xp_gain = action.xp_gain;
        let mut stat_gain = action.stat_gain;

        if self.state.consume_effect(HYPER_ANABOLIC) {
            xp_gain = (xp_gain as f64 * HYPER_XP_MULTIPLIER).round() as u32;
            stat_gain += HYPER_BONUS_STAT_GAIN;
            self.log(
                LogKind::Status,
                "Hyper Anabolic Surge triggered. Stats amplified.",
            );
        }

        self.state.bonus_stacks = (self.state.bonus_stacks + 1) % 3;
        if self.state.bonus_stacks == 0 && self.state.has_skill(SHADOW_MOMENTUM) {
            let refund = (action.energy_cost as f64 * MOMENTUM_REFUND_RATE).round() as u32;
            self.state.energy = (self.state.energy + refund).min(self.state.energy_max);
            self.log(
                LogKind::Status,
                format!("Shadow Momentum refunds {refund} energy."),
            );
        }

        self.add_xp(xp_gain);
        if let Some(stat_key) = action.stat {
            self.state.apply_gain(stat_key, stat_gain);
            self.log(
                LogKind::Status,
                format!("{} increased by {stat_gain}.", stat_key.label()),
            );
        }
        self.log(LogKind::Status, action.flavor);

        self.run_post_action_event(action.name);
        self.evaluate_unlocks();
        self.check_targets();
        self.mark_dirty();
        TrainingOutcome::Performed
    }

    /// Resolve the gate raid: aggregate power against a rolled difficulty.
    pub fn execute_raid(&mut self) -> RaidOutcome {
        if self.state.energy < RAID_ENERGY_COST {
            self.log(
                LogKind::Alert,
                "Gate Raid denied. Energy core at critical levels.",
            );
            return RaidOutcome::InsufficientEnergy;
        }

        self.state.energy -= RAID_ENERGY_COST;
        let power = self.state.total_power();
        let difficulty = self.rng.range_i64(RAID_DIFFICULTY_MIN, RAID_DIFFICULTY_MAX);
        let variance = if self.state.has_skill(MONARCH_REDUX) {
            0
        } else {
            self.rng.range_i64(-RAID_VARIANCE, RAID_VARIANCE)
        };
        let score = power as i64 + variance;

        let outcome = if score >= difficulty {
            let xp_gain = (power as f64 / 6.0).round() as u32;
            let stat_gain = ((power as f64 / 180.0).round() as u32).max(4);
            self.add_xp(xp_gain);
            self.state.apply_gain_all(stat_gain);
            self.log(
                LogKind::Loot,
                format!(
                    "Gate conquered! Harvested {xp_gain} XP and team gains +{stat_gain} to all stats."
                ),
            );
            if self.rng.next_f64() < RAID_SURGE_CHANCE {
                self.state.grant_effect(HYPER_ANABOLIC, 1);
                self.log(
                    LogKind::Status,
                    "Hyper Anabolic Surge primed. Next workout enhanced.",
                );
            }
            RaidOutcome::Victory { xp_gain, stat_gain }
        } else {
            let backlash = ((difficulty - score) as f64 / 18.0).round() as u32;
            self.state.energy = self.state.energy.saturating_sub(backlash);
            self.log(
                LogKind::Alert,
                format!("Raid backlash! Systems overloaded, -{backlash} energy."),
            );
            RaidOutcome::Backlash {
                energy_lost: backlash,
            }
        };

        self.evaluate_unlocks();
        self.check_targets();
        self.mark_dirty();
        outcome
    }

    /// One shared uniform draw decides the post-training event.
    fn run_post_action_event(&mut self, action_name: &str) {
        let roll = self.rng.next_f64();
        match classify_event_roll(roll) {
            TrainingEvent::BonusXp => {
                let bonus = self.rng.range_u32(12, 28);
                self.add_xp(bonus);
                self.log(
                    LogKind::Loot,
                    format!("Shadow Monarch grants {bonus} bonus XP."),
                );
                self.notify(Notification::with_actions(
                    "NOTIFICATION",
                    "You have received a reward.\n[Penalty Quest: Survival]\nCheck your reward?",
                    &["Yes", "No"],
                ));
            }
            TrainingEvent::EnergyShield => {
                let shield = (self.state.energy_max as f64 * 0.15).round() as u32;
                self.state.energy = (self.state.energy + shield).min(self.state.energy_max);
                self.log(
                    LogKind::Status,
                    format!("Void shield pulses. Energy +{shield}."),
                );
                self.notify(Notification::plain(
                    "SYSTEM NOTICE",
                    "Void shield reinforcement detected.",
                ));
            }
            TrainingEvent::EnergyDrain => {
                let drain = self.rng.range_u32(10, 18);
                self.state.energy = self.state.energy.saturating_sub(drain);
                self.log(
                    LogKind::Alert,
                    format!("Overexertion detected during {action_name}. Energy -{drain}."),
                );
                self.notify(Notification::plain(
                    "WARNING",
                    "Overexertion detected during training.",
                ));
            }
            TrainingEvent::Quiet => {}
        }
    }
}
