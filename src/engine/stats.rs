//! Stat ledger: bounded growth arithmetic over the five training stats.
//!
//! Values are clamped at the effective cap (`soft_cap + level * 2`) on every
//! mutation and never go negative. Growth is monotonic; only a remote
//! snapshot overwrite may lower a value.

use crate::engine::state::{PlayerState, StatKey};

impl PlayerState {
    /// Level-derived ceiling for a stat.
    pub fn effective_cap(&self, key: StatKey) -> u32 {
        let bonus = self.level * 2;
        self.stats
            .get(&key)
            .map(|stat| stat.soft_cap + bonus)
            .unwrap_or(bonus)
    }

    /// Increase one stat, clamped to its effective cap. Missing keys are a
    /// documented no-op, not an error.
    pub fn apply_gain(&mut self, key: StatKey, amount: u32) {
        let cap = self.effective_cap(key);
        if let Some(stat) = self.stats.get_mut(&key) {
            stat.value = (stat.value + amount).min(cap);
        }
    }

    /// Increase every stat by the same amount, each clamped independently.
    pub fn apply_gain_all(&mut self, amount: u32) {
        for key in StatKey::ALL {
            self.apply_gain(key, amount);
        }
    }

    /// Aggregate power: the sum of all current stat values. Drives raid
    /// resolution and the power-threshold quest.
    pub fn total_power(&self) -> u32 {
        self.stats.values().map(|stat| stat.value).sum()
    }
}
