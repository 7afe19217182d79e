//! Difficulty curve
//!
//! Maps stack height to the next moving block's width and speed.

use rand::Rng;

use super::state::ActiveBlock;
use crate::consts::*;
use crate::upgrades::UpgradeSnapshot;

/// Width for the next block: 2% narrower on every 10th placement, never wider
/// than the previous block and never below the floor.
pub fn width_for_score(previous_width: f32, score: u32) -> f32 {
    let previous = if previous_width.is_finite() {
        previous_width.max(MIN_BLOCK_WIDTH)
    } else {
        MIN_BLOCK_WIDTH
    };
    let shrink_step = score > 0 && score % WIDTH_SHRINK_INTERVAL == 0;
    let width = if shrink_step {
        previous * WIDTH_SHRINK_FACTOR
    } else {
        previous
    };
    width.clamp(MIN_BLOCK_WIDTH, previous)
}

/// Smooth base speed: fast early rise that saturates toward the asymptote
pub fn base_speed(score: u32) -> f32 {
    let rise = 1.0 - (-(score as f32) / SPEED_CURVE_SCALE).exp();
    BASE_SPEED_START + (BASE_SPEED_ASYMPTOTE - BASE_SPEED_START) * rise
}

/// Jitter half-range as a fraction of speed (0 below the threshold)
pub fn jitter_pct(score: u32) -> f32 {
    if score < JITTER_START_SCORE {
        return 0.0;
    }
    let over = (score - JITTER_START_SCORE) as f32;
    (JITTER_BASE_PCT + over * JITTER_PCT_PER_BLOCK).min(JITTER_MAX_PCT)
}

/// Wobble amplitude as a fraction of speed (0 below the threshold)
pub fn oscillation_amplitude(score: u32) -> f32 {
    if score < OSCILLATION_START_SCORE {
        return 0.0;
    }
    let over = (score - OSCILLATION_START_SCORE) as f32;
    (OSCILLATION_BASE_AMPLITUDE + over * OSCILLATION_AMPLITUDE_PER_BLOCK)
        .min(OSCILLATION_MAX_AMPLITUDE)
}

/// Final speed for a score: curve, jitter, stabilizer, clamp
pub fn speed_for_score(score: u32, upgrades: &UpgradeSnapshot, rng: &mut impl Rng) -> f32 {
    let mut speed = base_speed(score);

    let pct = jitter_pct(score);
    if pct > 0.0 {
        speed *= 1.0 + rng.random_range(-pct..=pct);
    }

    let damping = if upgrades.speed_reduction.is_finite() {
        upgrades.speed_reduction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    speed *= 1.0 - damping;

    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        MIN_SPEED
    }
}

/// Spawn the next moving block at `target_y`
pub fn next_block(
    previous_width: f32,
    target_y: f32,
    score: u32,
    upgrades: &UpgradeSnapshot,
    rng: &mut impl Rng,
) -> ActiveBlock {
    let width = width_for_score(previous_width, score);
    let speed = speed_for_score(score, upgrades, rng);

    // Entry edge and heading are cosmetic variety only
    let x = if rng.random_bool(0.5) { 0.0 } else { GAME_WIDTH - width };
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

    if score == JITTER_START_SCORE || score == OSCILLATION_START_SCORE {
        log::info!("Difficulty step at score {}: speed {:.2}", score, speed);
    }

    ActiveBlock {
        x,
        y: target_y,
        width,
        speed,
        direction,
        oscillation: oscillation_amplitude(score),
    }
}
