//! Placement resolution
//!
//! Judges a drop of the moving block onto the top of the stack.

use rand::Rng;

use super::state::{ActiveBlock, SessionTotals, StackBlock};
use crate::consts::*;
use crate::upgrades::UpgradeSnapshot;

/// How a successful placement was judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Within the perfect tolerance
    Skill,
    /// Auto-correct roll snapped it
    Saved,
    /// Plain overlap, block trimmed
    Partial,
}

impl Precision {
    pub fn is_perfect(&self) -> bool {
        !matches!(self, Precision::Partial)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementOutcome {
    Placed {
        block: StackBlock,
        precision: Precision,
        critical: bool,
    },
    Failed,
}

/// Horizontal overlap of the two blocks (may be zero or negative)
pub fn overlap(top: &StackBlock, active: &ActiveBlock) -> (f32, f32) {
    let start = top.x.max(active.x);
    let end = top.right().min(active.right());
    (start, end - start)
}

/// Perfect tolerance is generous early in a run and tight later
pub fn perfect_threshold(score: u32) -> f32 {
    if score < PERFECT_THRESHOLD_SCORE {
        EARLY_PERFECT_THRESHOLD
    } else {
        LATE_PERFECT_THRESHOLD
    }
}

fn roll(rng: &mut impl Rng, chance: f64) -> bool {
    let p = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 };
    rng.random_bool(p)
}

/// Resolve a drop. Critical bonuses accrue into `totals`.
///
/// Auto-correct and critical are independent rolls; both may hit on the same
/// placement.
pub fn resolve(
    top: &StackBlock,
    active: &ActiveBlock,
    score: u32,
    upgrades: &UpgradeSnapshot,
    totals: &mut SessionTotals,
    rng: &mut impl Rng,
) -> PlacementOutcome {
    let (overlap_start, overlap_width) = overlap(top, active);
    let diff = (active.x - top.x).abs();

    let precision = if diff <= perfect_threshold(score) {
        Precision::Skill
    } else if overlap_width > 0.0 && roll(rng, upgrades.auto_correct_chance) {
        Precision::Saved
    } else {
        Precision::Partial
    };

    if !precision.is_perfect() && overlap_width <= 0.0 {
        return PlacementOutcome::Failed;
    }

    let block = if precision.is_perfect() {
        StackBlock {
            x: top.x,
            y: active.y,
            width: top.width,
            is_perfect: true,
        }
    } else {
        let width = overlap_width.clamp(MIN_BLOCK_WIDTH.min(top.width), top.width);
        StackBlock {
            x: overlap_start.min(top.right() - width),
            y: active.y,
            width,
            is_perfect: false,
        }
    };

    match precision {
        Precision::Skill => totals.perfects += 1,
        Precision::Saved => {
            totals.perfects += 1;
            totals.saves += 1;
        }
        Precision::Partial => {}
    }

    let critical = roll(rng, upgrades.critical_chance);
    if critical {
        totals.bonus_xp += XP_PER_BLOCK;
        totals.bonus_gold += GOLD_PER_BLOCK;
        totals.criticals += 1;
    }

    log::debug!(
        "placement score={} diff={:.1} overlap={:.1} -> {:?} critical={}",
        score,
        diff,
        overlap_width,
        precision,
        critical
    );

    PlacementOutcome::Placed {
        block,
        precision,
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn top() -> StackBlock {
        StackBlock {
            x: 100.0,
            y: BASE_Y,
            width: 200.0,
            is_perfect: false,
        }
    }

    fn active_at(x: f32) -> ActiveBlock {
        ActiveBlock {
            x,
            y: BASE_Y - BLOCK_HEIGHT,
            width: 200.0,
            speed: 1.0,
            direction: 1.0,
            oscillation: 0.0,
        }
    }

    fn resolve_with(x: f32, score: u32, upgrades: UpgradeSnapshot) -> (PlacementOutcome, SessionTotals) {
        let mut totals = SessionTotals::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let outcome = resolve(&top(), &active_at(x), score, &upgrades, &mut totals, &mut rng);
        (outcome, totals)
    }

    #[test]
    fn test_skill_perfect_snaps() {
        let (outcome, totals) = resolve_with(108.0, 0, UpgradeSnapshot::default());
        match outcome {
            PlacementOutcome::Placed { block, precision, critical } => {
                assert_eq!(precision, Precision::Skill);
                assert_eq!(block.x, 100.0);
                assert_eq!(block.width, 200.0);
                assert!(block.is_perfect);
                assert!(!critical);
            }
            PlacementOutcome::Failed => panic!("should place"),
        }
        assert_eq!(totals.perfects, 1);
    }

    #[test]
    fn test_threshold_tightens_late() {
        let (outcome, _) = resolve_with(108.0, PERFECT_THRESHOLD_SCORE, UpgradeSnapshot::default());
        assert!(matches!(
            outcome,
            PlacementOutcome::Placed { precision: Precision::Partial, .. }
        ));
        let (outcome, _) = resolve_with(103.0, PERFECT_THRESHOLD_SCORE, UpgradeSnapshot::default());
        assert!(matches!(
            outcome,
            PlacementOutcome::Placed { precision: Precision::Skill, .. }
        ));
    }

    #[test]
    fn test_partial_trims_to_overlap() {
        let (outcome, _) = resolve_with(150.0, 0, UpgradeSnapshot::default());
        match outcome {
            PlacementOutcome::Placed { block, precision, .. } => {
                assert_eq!(precision, Precision::Partial);
                assert_eq!(block.x, 150.0);
                assert_eq!(block.width, 150.0);
                assert!(!block.is_perfect);
            }
            PlacementOutcome::Failed => panic!("should place"),
        }
    }

    #[test]
    fn test_sliver_overlap_clamped_to_min_width() {
        let (outcome, _) = resolve_with(295.0, 0, UpgradeSnapshot::default());
        match outcome {
            PlacementOutcome::Placed { block, .. } => {
                assert_eq!(block.width, MIN_BLOCK_WIDTH);
                assert!(block.right() <= top().right());
            }
            PlacementOutcome::Failed => panic!("should place"),
        }
    }

    #[test]
    fn test_miss_fails() {
        let (outcome, totals) = resolve_with(300.0, 0, UpgradeSnapshot::default());
        assert_eq!(outcome, PlacementOutcome::Failed);
        assert_eq!(totals, SessionTotals::default());

        // Auto-correct never rescues a clean miss
        let always = UpgradeSnapshot {
            auto_correct_chance: 1.0,
            ..Default::default()
        };
        let (outcome, _) = resolve_with(-150.0, 0, always);
        assert_eq!(outcome, PlacementOutcome::Failed);
    }

    #[test]
    fn test_auto_correct_saves() {
        let always = UpgradeSnapshot {
            auto_correct_chance: 1.0,
            ..Default::default()
        };
        let (outcome, totals) = resolve_with(250.0, 0, always);
        match outcome {
            PlacementOutcome::Placed { block, precision, .. } => {
                assert_eq!(precision, Precision::Saved);
                assert_eq!(block.x, 100.0);
                assert_eq!(block.width, 200.0);
            }
            PlacementOutcome::Failed => panic!("should place"),
        }
        assert_eq!(totals.saves, 1);
    }

    #[test]
    fn test_critical_accrues_bonus() {
        let lucky = UpgradeSnapshot {
            critical_chance: 1.0,
            ..Default::default()
        };
        let (outcome, totals) = resolve_with(150.0, 0, lucky);
        assert!(matches!(outcome, PlacementOutcome::Placed { critical: true, .. }));
        assert_eq!(totals.bonus_xp, XP_PER_BLOCK);
        assert_eq!(totals.bonus_gold, GOLD_PER_BLOCK);
    }
}
