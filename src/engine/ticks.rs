//! Periodic background passes: effect sweep / legion auto-training and
//! energy regeneration. Both are fully sequential passes over the aggregate,
//! driven by the single-writer session loop.

use std::time::{Duration, Instant};

use crate::engine::skills::SHADOW_LEGION;
use crate::engine::state::LogKind;
use crate::engine::Engine;

pub const EFFECT_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const ENERGY_REGEN_INTERVAL: Duration = Duration::from_secs(6);

/// Legion auto-training fires once per this many effect ticks.
const LEGION_TICKS_PER_HARVEST: u32 = 60;
/// Legion auto-training only runs while energy is above this floor.
const LEGION_ENERGY_FLOOR: u32 = 60;

/// Fixed-cadence deadline. Process-lifetime: tickers are never cancelled.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// True once per elapsed period; re-arms relative to `now` so a stalled
    /// loop does not burst-fire.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}

impl Engine {
    /// 1-second pass: count toward the legion harvest and purge stale effects.
    pub fn tick_effects(&mut self) {
        self.legion_ticker += 1;
        if self.state.has_skill(SHADOW_LEGION)
            && self.state.energy > LEGION_ENERGY_FLOOR
            && self.legion_ticker >= LEGION_TICKS_PER_HARVEST
        {
            self.legion_ticker = 0;
            self.state.apply_gain_all(1);
            self.log(
                LogKind::Status,
                "Shadow Legion Spotters auto-train +1 to all stats.",
            );
            self.mark_dirty();
        }
        self.state.sweep_effects();
    }

    /// 6-second pass: regenerate a fraction of the energy ceiling.
    pub fn regen_energy(&mut self) {
        if self.state.energy >= self.state.energy_max {
            return;
        }
        let regen = ((self.state.energy_max as f64 * 0.06).round() as u32).max(4);
        self.state.energy = (self.state.energy + regen).min(self.state.energy_max);
    }
}
