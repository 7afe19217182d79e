//! Reward calculation
//!
//! Pure conversion of a run into altitude, XP and gold.

use serde::{Deserialize, Serialize};

use crate::consts::{GOLD_PER_BLOCK, XP_PER_BLOCK};
use crate::upgrades::UpgradeSnapshot;

/// Final (or projected) result of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub altitude: u32,
    pub xp: u64,
    pub gold: u64,
}

/// Absorbs float error such as 350 * 1.1 = 384.99999... before flooring
const FLOOR_EPSILON: f64 = 1e-9;

/// Non-finite multipliers fall back to 1.0, negative ones to 0.0
pub fn sanitize_multiplier(multiplier: f64) -> f64 {
    if !multiplier.is_finite() {
        1.0
    } else {
        multiplier.max(0.0)
    }
}

fn scaled(base: f64, bonus_pct: f64, multiplier: f64) -> u64 {
    let bonus = if bonus_pct.is_finite() { bonus_pct.max(0.0) } else { 0.0 };
    let value = base * (1.0 + bonus / 100.0) * sanitize_multiplier(multiplier);
    if value.is_finite() && value > 0.0 {
        (value + FLOOR_EPSILON).floor() as u64
    } else {
        0
    }
}

/// Convert a run into rewards. Same inputs, same output, always.
pub fn finalize(
    score: u32,
    bonus_xp: u64,
    bonus_gold: u64,
    upgrades: &UpgradeSnapshot,
    session_multiplier: f64,
) -> Outcome {
    let xp_base = score as f64 * XP_PER_BLOCK as f64 + bonus_xp as f64;
    let gold_base = score as f64 * GOLD_PER_BLOCK as f64 + bonus_gold as f64;
    Outcome {
        altitude: score,
        xp: scaled(xp_base, upgrades.xp_bonus_pct, session_multiplier),
        gold: scaled(gold_base, upgrades.gold_bonus_pct, session_multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run() {
        let outcome = finalize(10, 0, 0, &UpgradeSnapshot::default(), 1.0);
        assert_eq!(outcome, Outcome { altitude: 10, xp: 350, gold: 200 });
    }

    #[test]
    fn test_overclock_bonus() {
        let upgrades = UpgradeSnapshot {
            xp_bonus_pct: 10.0,
            ..Default::default()
        };
        let outcome = finalize(10, 0, 0, &upgrades, 1.0);
        assert_eq!(outcome.xp, 385);
        assert_eq!(outcome.gold, 200);
        assert_eq!(outcome.altitude, 10);
    }

    #[test]
    fn test_bonus_and_multiplier() {
        let upgrades = UpgradeSnapshot {
            gold_bonus_pct: 5.0,
            ..Default::default()
        };
        // (3*35 + 35) * 1.5 = 210, (3*20 + 20) * 1.05 * 1.5 = 126
        let outcome = finalize(3, 35, 20, &upgrades, 1.5);
        assert_eq!(outcome.xp, 210);
        assert_eq!(outcome.gold, 126);
    }

    #[test]
    fn test_zero_and_garbage_inputs() {
        assert_eq!(finalize(0, 0, 0, &UpgradeSnapshot::default(), 1.0), Outcome::default());
        let outcome = finalize(4, 0, 0, &UpgradeSnapshot::default(), f64::NAN);
        assert_eq!(outcome.xp, 140);
        let outcome = finalize(4, 0, 0, &UpgradeSnapshot::default(), -2.0);
        assert_eq!(outcome, Outcome { altitude: 4, xp: 0, gold: 0 });
        let upgrades = UpgradeSnapshot {
            xp_bonus_pct: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(finalize(4, 0, 0, &upgrades, 1.0).xp, 140);
    }
}
