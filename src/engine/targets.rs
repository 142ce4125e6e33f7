//! Target/quest generator: dynamic threshold goals that re-issue themselves.
//!
//! Goals are never marked "done": clearing one immediately replaces it with a
//! strictly harder version, so the snapshot always holds a live regimen.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::state::{LogKind, Notification, StatKey};
use crate::engine::Engine;

const POWER_TARGET_HEADROOM: u32 = 140;
const POWER_TARGET_REISSUE_HEADROOM: u32 = 160;
const STAT_TARGET_OFFSET_MIN: u32 = 18;
const STAT_TARGET_OFFSET_MAX: u32 = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Targets {
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub raid_power: Option<u32>,
    #[serde(default)]
    pub stats: BTreeMap<StatKey, u32>,
    /// Epoch milliseconds at generation time.
    #[serde(default)]
    pub created_at: i64,
}

impl Engine {
    /// Produce a fresh snapshot of goals relative to current state.
    pub fn generate_default_targets(&mut self) -> Targets {
        let mut stats = BTreeMap::new();
        for key in StatKey::ALL {
            let value = self.state.stats[&key].value;
            let offset = self
                .rng
                .range_u32(STAT_TARGET_OFFSET_MIN, STAT_TARGET_OFFSET_MAX);
            stats.insert(key, value + offset);
        }
        Targets {
            level: Some(self.state.level + 1),
            raid_power: Some(self.state.total_power() + POWER_TARGET_HEADROOM),
            stats,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Check every goal against current state; each met goal is logged,
    /// announced, and re-issued in place at a strictly higher threshold.
    pub fn check_targets(&mut self) {
        let Some(mut targets) = self.state.targets.take() else {
            return;
        };
        let mut reissued = false;

        if let Some(goal) = targets.level {
            if self.state.level >= goal {
                let level = self.state.level;
                self.log(
                    LogKind::Loot,
                    format!("Ascension target achieved: Lv.{level}."),
                );
                targets.level = Some(level + 1);
                reissued = true;
                self.notify(Notification::plain(
                    "QUEST UPDATE",
                    &format!("Ascension objective cleared at Lv.{level}."),
                ));
            }
        }

        if let Some(goal) = targets.raid_power {
            let power = self.state.total_power();
            if power >= goal {
                self.log(
                    LogKind::Loot,
                    format!("Raid readiness threshold hit: {power} power."),
                );
                targets.raid_power = Some(power + POWER_TARGET_REISSUE_HEADROOM);
                reissued = true;
                self.notify(Notification::plain(
                    "QUEST UPDATE",
                    "Gate power threshold secured.",
                ));
            }
        }

        for key in StatKey::ALL {
            let Some(goal) = targets.stats.get(&key).copied() else {
                continue;
            };
            let value = self.state.stats[&key].value;
            if value >= goal {
                let label = key.label();
                self.log(LogKind::Loot, format!("{label} target cleared at {value}."));
                let offset = self
                    .rng
                    .range_u32(STAT_TARGET_OFFSET_MIN, STAT_TARGET_OFFSET_MAX);
                targets.stats.insert(key, goal + offset);
                reissued = true;
                self.notify(Notification::plain(
                    "QUEST UPDATE",
                    &format!("{label} regimen complete."),
                ));
            }
        }

        self.state.targets = Some(targets);
        if reissued {
            self.mark_dirty();
        }
    }

    /// Discard all current goals and issue a full fresh set.
    pub fn recalibrate_targets(&mut self) {
        let targets = self.generate_default_targets();
        self.state.targets = Some(targets);
        self.log(
            LogKind::Status,
            "Mission targets recalibrated by System Handler.",
        );
        self.notify(Notification::plain(
            "NOTICE",
            "Quest directives recalibrated by the System Handler.",
        ));
        self.mark_dirty();
    }
}
