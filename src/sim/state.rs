//! Session state and core simulation types
//!
//! Everything a single run owns lives here and is dropped when the run ends.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never activated, or waiting for the next activation
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a missed placement
    Failed,
    /// Run ended early by the host
    Interrupted,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Failed | GamePhase::Interrupted)
    }
}

/// A placed block. Never mutated after it joins the stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub is_perfect: bool,
}

impl StackBlock {
    /// The centered foundation block at index 0
    pub fn foundation() -> Self {
        Self {
            x: (GAME_WIDTH - INITIAL_BLOCK_WIDTH) / 2.0,
            y: BASE_Y,
            width: INITIAL_BLOCK_WIDTH,
            is_perfect: false,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Row Y for the block at `index` in the stack
#[inline]
pub fn row_y(index: usize) -> f32 {
    BASE_Y - index as f32 * BLOCK_HEIGHT
}

/// The single moving block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Pixels per step before oscillation
    pub speed: f32,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
    /// Amplitude of the time-based speed wobble (0 = none)
    pub oscillation: f32,
}

impl ActiveBlock {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Speed at session time `time_secs`, including the wobble
    pub fn effective_speed(&self, time_secs: f32) -> f32 {
        if self.oscillation > 0.0 {
            let wobble = 1.0 + self.oscillation * (time_secs * OSCILLATION_FREQUENCY).sin();
            (self.speed * wobble).clamp(MIN_SPEED, MAX_SPEED)
        } else {
            self.speed
        }
    }
}

/// Bonus rewards accrued from critical events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub bonus_xp: u64,
    pub bonus_gold: u64,
    pub criticals: u32,
    pub perfects: u32,
    pub saves: u32,
}

/// Seeded randomness for one session.
///
/// Two PCG streams from the same seed: gameplay rolls never share a stream
/// with cosmetic ones, so toggling particles cannot change an outcome.
#[derive(Debug, Clone)]
pub struct SessionRng {
    pub gameplay: Pcg32,
    pub cosmetic: Pcg32,
}

impl SessionRng {
    pub fn new(seed: u64, session_index: u64) -> Self {
        let state = seed ^ session_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            gameplay: Pcg32::new(state, 0xa02b_dbf7_bb3c_0a7),
            cosmetic: Pcg32::new(state, 0x5851_f42d_4c95_7f2d),
        }
    }
}

/// Notable things that happened, for presentation and analytics
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A block joined the stack
    Placed { score: u32, width: f32 },
    /// Placement judged perfect; `saved` when the auto-correct roll did it
    Perfect { saved: bool },
    /// Critical roll paid a bonus block
    Critical { bonus_xp: u64, bonus_gold: u64 },
    /// Camera target rose by one block
    CameraScrolled { camera_y: f32 },
    Failed { score: u32 },
    Interrupted { score: u32 },
    Sound(SoundEffect),
}

/// Complete per-session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Successful placements (= altitude)
    pub score: u32,
    pub totals: SessionTotals,
    /// Placed blocks, index 0 is the foundation
    pub stack: Vec<StackBlock>,
    /// None once the session has ended
    pub active: Option<ActiveBlock>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Current camera offset (pixels scrolled up)
    pub camera_y: f32,
    pub camera_target: f32,
    /// Shake magnitude in pixels
    pub screen_shake: f32,
    /// Shake offset rolled for the current step
    pub shake_offset: Vec2,
    /// Session clock anchor (host ms of first frame); None before first frame
    pub started_at_ms: Option<f64>,
    /// Host ms seen on the latest frame
    pub now_ms: f64,
    /// Fixed steps simulated so far
    pub time_ticks: u64,
    /// Unsimulated time carried to the next frame (seconds)
    pub accumulator: f32,
    pub rng: SessionRng,
}

impl SessionState {
    pub fn new(rng: SessionRng, max_particles: usize) -> Self {
        Self {
            score: 0,
            totals: SessionTotals::default(),
            stack: vec![StackBlock::foundation()],
            active: None,
            particles: ParticleSystem::new(max_particles),
            camera_y: 0.0,
            camera_target: 0.0,
            screen_shake: 0.0,
            shake_offset: Vec2::ZERO,
            started_at_ms: None,
            now_ms: 0.0,
            time_ticks: 0,
            accumulator: 0.0,
            rng,
        }
    }

    /// Top of the stack. The foundation is never removed.
    pub fn top(&self) -> StackBlock {
        self.stack.last().copied().unwrap_or_else(StackBlock::foundation)
    }

    /// Session time in seconds, used for the speed wobble
    pub fn time_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Milliseconds since the first frame (0 before it)
    pub fn elapsed_ms(&self) -> f64 {
        self.started_at_ms
            .map(|start| (self.now_ms - start).max(0.0))
            .unwrap_or(0.0)
    }

    /// True while placement input must be ignored
    pub fn in_grace_window(&self) -> bool {
        self.started_at_ms.is_none() || self.elapsed_ms() < GRACE_PERIOD_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foundation_centered() {
        let f = StackBlock::foundation();
        assert_eq!(f.x + f.width / 2.0, GAME_WIDTH / 2.0);
        assert_eq!(f.y, row_y(0));
        assert_eq!(row_y(2), BASE_Y - 2.0 * BLOCK_HEIGHT);
    }

    #[test]
    fn test_grace_window() {
        let mut s = SessionState::new(SessionRng::new(1, 0), 0);
        assert!(s.in_grace_window());
        s.started_at_ms = Some(1000.0);
        s.now_ms = 1200.0;
        assert!(s.in_grace_window());
        s.now_ms = 1500.0;
        assert!(!s.in_grace_window());
    }

    #[test]
    fn test_effective_speed_clamped() {
        let block = ActiveBlock {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            speed: MAX_SPEED,
            direction: 1.0,
            oscillation: OSCILLATION_MAX_AMPLITUDE,
        };
        for i in 0..100 {
            let v = block.effective_speed(i as f32 * 0.1);
            assert!((MIN_SPEED..=MAX_SPEED).contains(&v));
        }
    }
}
