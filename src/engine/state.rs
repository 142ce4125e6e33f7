//! Player aggregate: the single mutable state owned by the engine.
//! Everything the progression rules touch lives here; rendering concerns do not.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::skills::SkillDefinition;
use crate::engine::targets::Targets;

/// Player-facing log feed is bounded; oldest entries are evicted first.
pub const MAX_LOG_ENTRIES: usize = 120;

pub const BASE_LEVEL: u32 = 1;
pub const BASE_XP_TO_LEVEL: u32 = 120;
pub const BASE_ENERGY: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Strength,
    Agility,
    Endurance,
    Focus,
    Aura,
}

impl StatKey {
    pub const ALL: [StatKey; 5] = [
        StatKey::Strength,
        StatKey::Agility,
        StatKey::Endurance,
        StatKey::Focus,
        StatKey::Aura,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StatKey::Strength => "Strength",
            StatKey::Agility => "Agility",
            StatKey::Endurance => "Endurance",
            StatKey::Focus => "Focus",
            StatKey::Aura => "Aura Sync",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatKey::Strength => "strength",
            StatKey::Agility => "agility",
            StatKey::Endurance => "endurance",
            StatKey::Focus => "focus",
            StatKey::Aura => "aura",
        }
    }

    /// Lookup by wire/CLI key. Unknown keys resolve to `None`; callers treat
    /// that as a no-op rather than an error.
    pub fn parse(raw: &str) -> Option<StatKey> {
        match raw {
            "strength" => Some(StatKey::Strength),
            "agility" => Some(StatKey::Agility),
            "endurance" => Some(StatKey::Endurance),
            "focus" => Some(StatKey::Focus),
            "aura" => Some(StatKey::Aura),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: u32,
    pub soft_cap: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub id: String,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Status,
    Alert,
    Loot,
}

impl LogKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogKind::Status => "status",
            LogKind::Alert => "alert",
            LogKind::Loot => "loot",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Out-of-band notification emitted by the engine; rendering is external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub actions: Vec<String>,
}

impl Notification {
    pub fn plain(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(title: &str, body: &str, actions: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            actions: actions.iter().map(|label| label.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub level: u32,
    pub xp: u32,
    pub xp_to_level: u32,
    pub energy: u32,
    pub energy_max: u32,
    pub stats: BTreeMap<StatKey, Stat>,
    pub bonus_stacks: u32,
    pub effects: Vec<Effect>,
    pub skills: BTreeMap<String, SkillDefinition>,
    pub targets: Option<Targets>,
    pub logs: VecDeque<LogEntry>,
}

impl Default for PlayerState {
    fn default() -> Self {
        let mut stats = BTreeMap::new();
        for (key, value, soft_cap) in [
            (StatKey::Strength, 18, 260),
            (StatKey::Agility, 14, 240),
            (StatKey::Endurance, 16, 280),
            (StatKey::Focus, 12, 220),
            (StatKey::Aura, 10, 260),
        ] {
            stats.insert(
                key,
                Stat {
                    label: key.label(),
                    value,
                    soft_cap,
                },
            );
        }

        Self {
            level: BASE_LEVEL,
            xp: 0,
            xp_to_level: BASE_XP_TO_LEVEL,
            energy: BASE_ENERGY,
            energy_max: BASE_ENERGY,
            stats,
            bonus_stacks: 0,
            effects: Vec::new(),
            skills: BTreeMap::new(),
            targets: None,
            logs: VecDeque::new(),
        }
    }
}

impl PlayerState {
    pub fn push_log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.logs.push_back(LogEntry {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        });
        while self.logs.len() > MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
    }

    pub fn has_skill(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }
}
