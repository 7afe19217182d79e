//! Ascent Stack - A vertical block-stacking arcade engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, placement, particles, rewards)
//! - `engine`: Session orchestrator (activation, input, frame stepping, outcome)
//! - `renderer`: Injected draw surface and scene drawing
//! - `audio`: Procedural sound cue definitions
//! - `upgrades`: Player upgrade snapshot and level resolution
//! - `settings`: Presentation preferences

pub mod audio;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod upgrades;

pub use engine::{FrameContext, GameEngine, PlacementResult, Telemetry};
pub use error::EngineError;
pub use settings::{QualityPreset, Settings};
pub use sim::Outcome;
pub use upgrades::{MinerTier, UpgradeLevels, UpgradeSnapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (all speeds are in pixels per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame gap we will integrate (ms)
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 440.0;
    pub const GAME_HEIGHT: f32 = 660.0;
    pub const BLOCK_HEIGHT: f32 = 48.0;
    /// Y of the foundation block (index 0)
    pub const BASE_Y: f32 = GAME_HEIGHT - BLOCK_HEIGHT;

    /// Block width
    pub const INITIAL_BLOCK_WIDTH: f32 = 240.0;
    pub const MIN_BLOCK_WIDTH: f32 = 24.0;
    /// Width shrinks once every this many placements
    pub const WIDTH_SHRINK_INTERVAL: u32 = 10;
    pub const WIDTH_SHRINK_FACTOR: f32 = 0.98;

    /// Speed curve (pixels per step)
    pub const BASE_SPEED_START: f32 = 0.5;
    pub const BASE_SPEED_ASYMPTOTE: f32 = 6.5;
    /// Score at which ~63% of the asymptotic rise is reached
    pub const SPEED_CURVE_SCALE: f32 = 30.0;
    pub const MIN_SPEED: f32 = 0.3;
    pub const MAX_SPEED: f32 = 8.5;

    /// Random jitter kicks in at this score
    pub const JITTER_START_SCORE: u32 = 50;
    pub const JITTER_BASE_PCT: f32 = 0.05;
    pub const JITTER_PCT_PER_BLOCK: f32 = 0.002;
    pub const JITTER_MAX_PCT: f32 = 0.20;

    /// Sinusoidal speed wobble kicks in at this score
    pub const OSCILLATION_START_SCORE: u32 = 100;
    pub const OSCILLATION_BASE_AMPLITUDE: f32 = 0.10;
    pub const OSCILLATION_AMPLITUDE_PER_BLOCK: f32 = 0.002;
    pub const OSCILLATION_MAX_AMPLITUDE: f32 = 0.30;
    /// Angular frequency of the wobble (radians per second of session time)
    pub const OSCILLATION_FREQUENCY: f32 = 1.5;

    /// Maximum random extra displacement when bouncing off a wall
    pub const BOUNCE_BUMP: f32 = 0.1;

    /// Perfect tolerance (pixels) early and late in a run
    pub const EARLY_PERFECT_THRESHOLD: f32 = 9.0;
    pub const LATE_PERFECT_THRESHOLD: f32 = 3.0;
    pub const PERFECT_THRESHOLD_SCORE: u32 = 40;

    /// Inputs within this window after session start are ignored
    pub const GRACE_PERIOD_MS: f64 = 500.0;

    /// Rewards
    pub const XP_PER_BLOCK: u64 = 35;
    pub const GOLD_PER_BLOCK: u64 = 20;

    /// Camera
    pub const PERFECT_SHAKE: f32 = 35.0;
    pub const HIT_SHAKE: f32 = 6.0;
    pub const SHAKE_DECAY: f32 = 0.85;
    pub const CAMERA_EASE: f32 = 0.2;
}
