//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (separate gameplay and cosmetic streams)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod particles;
pub mod placement;
pub mod rewards;
pub mod state;
pub mod tick;

pub use difficulty::{next_block, speed_for_score, width_for_score};
pub use particles::{Callout, Particle, ParticleKind, ParticleSystem};
pub use placement::{PlacementOutcome, Precision, resolve};
pub use rewards::{Outcome, finalize};
pub use state::{
    ActiveBlock, GameEvent, GamePhase, SessionRng, SessionState, SessionTotals, StackBlock,
};
pub use tick::{PlaceStep, advance, place, spawn_next, step};
