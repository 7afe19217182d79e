//! Player upgrades
//!
//! The progression layer owns upgrade levels. The engine only ever sees a
//! resolved `UpgradeSnapshot`, fixed for the whole session.

use serde::{Deserialize, Serialize};

/// Gold yield bonus per Block Magnet level (percent)
pub const MAGNET_PCT_PER_LEVEL: f64 = 5.0;
/// XP yield bonus per XP Battery level (percent)
pub const BATTERY_PCT_PER_LEVEL: f64 = 5.0;
/// Speed reduction per Stabilizer level (fraction)
pub const STABILIZER_PER_LEVEL: f32 = 0.01;
pub const STABILIZER_MAX: f32 = 0.5;
/// Auto-correct chance per Gridlock level
pub const GRIDLOCK_PER_LEVEL: f64 = 0.02;
pub const GRIDLOCK_MAX: f64 = 0.6;
/// Critical chance per Luck Streak level
pub const LUCK_PER_LEVEL: f64 = 0.01;
pub const LUCK_MAX: f64 = 0.35;

/// Raw upgrade levels as stored by the progression layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub magnet: u32,
    pub battery: u32,
    pub stabilizer: u32,
    pub gridlock: u32,
    pub luck: u32,
}

/// Effective upgrade values for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeSnapshot {
    /// Extra gold yield in percent (Block Magnet)
    pub gold_bonus_pct: f64,
    /// Extra XP yield in percent (XP Battery / overclock)
    pub xp_bonus_pct: f64,
    /// Fraction of block speed removed (Stabilizer)
    pub speed_reduction: f32,
    /// Probability that an imperfect placement snaps to perfect
    pub auto_correct_chance: f64,
    /// Probability that a placement pays a bonus block
    pub critical_chance: f64,
}

impl UpgradeSnapshot {
    /// Resolve levels into effective values
    pub fn from_levels(levels: &UpgradeLevels) -> Self {
        Self {
            gold_bonus_pct: levels.magnet as f64 * MAGNET_PCT_PER_LEVEL,
            xp_bonus_pct: levels.battery as f64 * BATTERY_PCT_PER_LEVEL,
            speed_reduction: (levels.stabilizer as f32 * STABILIZER_PER_LEVEL).min(STABILIZER_MAX),
            auto_correct_chance: (levels.gridlock as f64 * GRIDLOCK_PER_LEVEL).min(GRIDLOCK_MAX),
            critical_chance: (levels.luck as f64 * LUCK_PER_LEVEL).min(LUCK_MAX),
        }
    }

    /// Clamp every value into its valid range.
    ///
    /// Snapshots can be built by hand, so NaN or out-of-range values are
    /// replaced rather than trusted.
    pub fn sanitized(&self) -> Self {
        let sane = Self {
            gold_bonus_pct: non_negative(self.gold_bonus_pct),
            xp_bonus_pct: non_negative(self.xp_bonus_pct),
            speed_reduction: if self.speed_reduction.is_finite() {
                self.speed_reduction.clamp(0.0, 1.0)
            } else {
                0.0
            },
            auto_correct_chance: probability(self.auto_correct_chance),
            critical_chance: probability(self.critical_chance),
        };
        if sane != *self {
            log::warn!("Upgrade snapshot sanitized: {:?} -> {:?}", self, sane);
        }
        sane
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn probability(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}

/// Equipment tier feeding the session multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MinerTier(pub u32);

impl MinerTier {
    const MULTIPLIERS: [f64; 6] = [1.0, 1.1, 1.25, 1.5, 1.75, 2.0];

    pub fn multiplier(&self) -> f64 {
        let idx = (self.0 as usize).min(Self::MULTIPLIERS.len() - 1);
        Self::MULTIPLIERS[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_levels() {
        let snap = UpgradeSnapshot::from_levels(&UpgradeLevels {
            magnet: 2,
            battery: 3,
            stabilizer: 10,
            gridlock: 5,
            luck: 4,
        });
        assert_eq!(snap.gold_bonus_pct, 10.0);
        assert_eq!(snap.xp_bonus_pct, 15.0);
        assert!((snap.speed_reduction - 0.10).abs() < 1e-6);
        assert!((snap.auto_correct_chance - 0.10).abs() < 1e-9);
        assert!((snap.critical_chance - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_from_levels_caps() {
        let snap = UpgradeSnapshot::from_levels(&UpgradeLevels {
            stabilizer: 500,
            gridlock: 500,
            luck: 500,
            ..Default::default()
        });
        assert_eq!(snap.speed_reduction, STABILIZER_MAX);
        assert_eq!(snap.auto_correct_chance, GRIDLOCK_MAX);
        assert_eq!(snap.critical_chance, LUCK_MAX);
    }

    #[test]
    fn test_sanitized() {
        let snap = UpgradeSnapshot {
            gold_bonus_pct: -5.0,
            xp_bonus_pct: f64::NAN,
            speed_reduction: 3.0,
            auto_correct_chance: 1.5,
            critical_chance: -0.2,
        }
        .sanitized();
        assert_eq!(snap.gold_bonus_pct, 0.0);
        assert_eq!(snap.xp_bonus_pct, 0.0);
        assert_eq!(snap.speed_reduction, 1.0);
        assert_eq!(snap.auto_correct_chance, 1.0);
        assert_eq!(snap.critical_chance, 0.0);
    }

    #[test]
    fn test_miner_tier() {
        assert_eq!(MinerTier(0).multiplier(), 1.0);
        assert_eq!(MinerTier(3).multiplier(), 1.5);
        assert_eq!(MinerTier(99).multiplier(), 2.0);
    }
}
