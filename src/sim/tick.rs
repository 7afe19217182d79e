//! Fixed timestep simulation
//!
//! Advances a session deterministically and applies placement actions.

use glam::Vec2;
use rand::Rng;

use super::difficulty::next_block;
use super::placement::{PlacementOutcome, Precision, resolve};
use super::state::{GameEvent, SessionState, row_y};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::upgrades::UpgradeSnapshot;

/// What a placement action did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceStep {
    /// A block joined the stack and the next one spawned
    Placed,
    /// Clean miss, the session is over
    Failed,
    /// Nothing to place
    NoActiveBlock,
}

/// Spawn the moving block for the next row
pub fn spawn_next(state: &mut SessionState, upgrades: &UpgradeSnapshot) {
    let previous_width = state.top().width;
    let target_y = row_y(state.stack.len());
    let block = next_block(
        previous_width,
        target_y,
        state.score,
        upgrades,
        &mut state.rng.gameplay,
    );
    state.active = Some(block);
}

/// Feed a host timestamp; runs as many fixed steps as have elapsed.
///
/// The first call only anchors the session clock. Returns the number of steps run.
pub fn advance(state: &mut SessionState, now_ms: f64) -> u32 {
    if !now_ms.is_finite() {
        return 0;
    }
    if state.started_at_ms.is_none() {
        state.started_at_ms = Some(now_ms);
        state.now_ms = now_ms;
        return 0;
    }

    // Hosts may hand us a stale or rewound clock; never integrate backwards
    let gap_ms = (now_ms - state.now_ms).clamp(0.0, MAX_FRAME_GAP_MS);
    state.now_ms = state.now_ms.max(now_ms);
    state.accumulator += (gap_ms / 1000.0) as f32;

    let mut substeps = 0;
    while state.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
        step(state);
        state.accumulator -= SIM_DT;
        substeps += 1;
    }
    if substeps == MAX_SUBSTEPS {
        // Drop the backlog rather than spiral
        state.accumulator = state.accumulator.min(SIM_DT);
    }
    substeps
}

/// Advance the session by one fixed step
pub fn step(state: &mut SessionState) {
    let time_secs = state.time_secs();

    if let Some(block) = state.active.as_mut() {
        let speed = block.effective_speed(time_secs);
        block.x += speed * block.direction;
        if block.right() > GAME_WIDTH || block.x < 0.0 {
            block.direction = -block.direction;
            let bump = state.rng.gameplay.random::<f32>() * BOUNCE_BUMP;
            block.x += (speed + bump) * block.direction;
            block.x = block.x.clamp(0.0, (GAME_WIDTH - block.width).max(0.0));
        }
    }

    state.particles.step();

    // Decay screen shake
    state.screen_shake *= SHAKE_DECAY;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
        state.shake_offset = Vec2::ZERO;
    } else {
        let rng = &mut state.rng.cosmetic;
        state.shake_offset = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
            * state.screen_shake;
    }

    // Ease camera toward its target
    let delta = state.camera_target - state.camera_y;
    state.camera_y = if delta.abs() < 0.01 {
        state.camera_target
    } else {
        state.camera_y + delta * CAMERA_EASE
    };

    state.time_ticks += 1;
}

/// Apply a placement action against the current stack top and moving block
pub fn place(
    state: &mut SessionState,
    upgrades: &UpgradeSnapshot,
    shake_enabled: bool,
    events: &mut Vec<GameEvent>,
) -> PlaceStep {
    let Some(active) = state.active else {
        return PlaceStep::NoActiveBlock;
    };
    let top = state.top();

    let outcome = resolve(
        &top,
        &active,
        state.score,
        upgrades,
        &mut state.totals,
        &mut state.rng.gameplay,
    );

    let (block, precision, critical) = match outcome {
        PlacementOutcome::Failed => {
            state.active = None;
            events.push(GameEvent::Sound(SoundEffect::Fail));
            events.push(GameEvent::Failed { score: state.score });
            return PlaceStep::Failed;
        }
        PlacementOutcome::Placed {
            block,
            precision,
            critical,
        } => (block, precision, critical),
    };

    state.stack.push(block);
    state.score += 1;

    let center = Vec2::new(block.x + block.width / 2.0, block.y);
    if precision.is_perfect() {
        let saved = precision == Precision::Saved;
        if shake_enabled {
            state.screen_shake = PERFECT_SHAKE;
        }
        state
            .particles
            .perfect_burst(center, saved, &mut state.rng.cosmetic);
        events.push(GameEvent::Perfect { saved });
        events.push(GameEvent::Sound(SoundEffect::Perfect));
    } else {
        if shake_enabled {
            state.screen_shake = HIT_SHAKE;
        }
        events.push(GameEvent::Sound(SoundEffect::Hit));
    }

    if critical {
        state.particles.critical_label(center);
        events.push(GameEvent::Critical {
            bonus_xp: XP_PER_BLOCK,
            bonus_gold: GOLD_PER_BLOCK,
        });
    }

    events.push(GameEvent::Placed {
        score: state.score,
        width: block.width,
    });

    if row_y(state.stack.len()) < GAME_HEIGHT / 2.0 {
        state.camera_target += BLOCK_HEIGHT;
        events.push(GameEvent::CameraScrolled {
            camera_y: state.camera_target,
        });
    }

    spawn_next(state, upgrades);
    PlaceStep::Placed
}
