//! Progression core: XP accumulation and the level-up cascade.

use crate::engine::state::{LogKind, Notification};
use crate::engine::Engine;

/// Energy ceiling growth per level.
const ENERGY_MAX_PER_LEVEL: u32 = 12;

impl Engine {
    /// Add experience and settle: a single large gain may cross several
    /// thresholds and cascade through multiple level-ups.
    pub fn add_xp(&mut self, amount: u32) {
        self.state.xp += amount;
        self.log(LogKind::Status, format!("Gained {amount} XP."));
        while self.state.xp >= self.state.xp_to_level {
            self.state.xp -= self.state.xp_to_level;
            self.level_up();
        }
    }

    /// One level-up step. Energy refills to the raised ceiling, all stats
    /// grow, and the requirement curve is strictly increasing.
    /// Skill unlocks and target checks re-run synchronously because a new
    /// level can retroactively satisfy both.
    fn level_up(&mut self) {
        self.state.level += 1;
        self.state.energy_max += ENERGY_MAX_PER_LEVEL;
        self.state.energy = self.state.energy_max;

        let stat_gain = 4 + self.state.level / 3;
        self.state.apply_gain_all(stat_gain);
        self.log(
            LogKind::Alert,
            format!(
                "LEVEL UP! Ascended to Lv.{}. Core stats +{stat_gain} each.",
                self.state.level
            ),
        );
        self.notify(Notification::plain("ALARM", "You leveled up!"));

        self.state.xp_to_level = (self.state.xp_to_level as f64 * 1.32
            + self.state.level as f64 * 18.0)
            .round() as u32;

        self.evaluate_unlocks();
        self.check_targets();
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;

    #[test]
    fn xp_settles_below_the_threshold() {
        let mut engine = Engine::new(7);
        engine.add_xp(119);
        assert_eq!(engine.state.level, 1);
        assert_eq!(engine.state.xp, 119);

        engine.add_xp(1);
        assert_eq!(engine.state.level, 2);
        assert_eq!(engine.state.xp, 0);
        assert!(engine.state.xp < engine.state.xp_to_level);
    }

    #[test]
    fn requirement_curve_matches_the_reference_arithmetic() {
        let mut engine = Engine::new(7);
        engine.add_xp(120);
        // round(120 * 1.32 + 2 * 18) = 194
        assert_eq!(engine.state.xp_to_level, 194);
    }

    #[test]
    fn large_gain_cascades_through_multiple_levels() {
        let mut engine = Engine::new(7);
        // 120 + 194 = 314 crosses two thresholds exactly.
        engine.add_xp(314);
        assert_eq!(engine.state.level, 3);
        assert_eq!(engine.state.xp, 0);
        // round(194 * 1.32 + 3 * 18) = round(310.08) = 310
        assert_eq!(engine.state.xp_to_level, 310);
    }

    #[test]
    fn level_up_refills_energy_to_the_raised_ceiling() {
        let mut engine = Engine::new(7);
        engine.state.energy = 3;
        engine.add_xp(120);
        assert_eq!(engine.state.energy_max, 112);
        assert_eq!(engine.state.energy, 112);
    }

    #[test]
    fn level_up_grows_every_stat() {
        let mut engine = Engine::new(7);
        let before = engine.state.stats.clone();
        engine.add_xp(120);
        // level 2 => gain 4 + 2/3 = 4
        for (key, stat) in &engine.state.stats {
            assert_eq!(stat.value, before[key].value + 4);
        }
    }
}
