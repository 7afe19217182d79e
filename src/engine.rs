//! Session orchestrator
//!
//! Owns one run at a time: activation, player input, frame stepping, drawing
//! and the single terminal outcome. The host supplies timestamps and a draw
//! surface; the engine never schedules frames itself.

use crate::error::EngineError;
use crate::renderer::{FrameView, RenderSurface, draw_frame};
use crate::settings::Settings;
use crate::sim::rewards::sanitize_multiplier;
use crate::sim::{
    GameEvent, GamePhase, Outcome, PlaceStep, SessionRng, SessionState, advance, finalize, place,
    spawn_next,
};
use crate::upgrades::UpgradeSnapshot;

/// Host frame timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Monotonic host clock in milliseconds
    pub now_ms: f64,
}

/// What a placement action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementResult {
    /// Outside `Running`, or inside the grace window
    Ignored,
    /// Block stacked; new score
    Placed { score: u32 },
    /// Missed; the session is over
    Ended(Outcome),
}

/// Read-only presentation data. Not authoritative until the outcome fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub phase: GamePhase,
    pub score: u32,
    /// Rewards if the session ended right now
    pub projected: Outcome,
    pub bonus_xp: u64,
    pub bonus_gold: u64,
    pub active_width: Option<f32>,
    pub active_speed: Option<f32>,
    pub particles: usize,
}

type OutcomeHandler = Box<dyn FnMut(&Outcome)>;

pub struct GameEngine {
    seed: u64,
    settings: Settings,
    phase: GamePhase,
    session: Option<SessionState>,
    upgrades: UpgradeSnapshot,
    session_multiplier: f64,
    sessions_started: u64,
    events: Vec<GameEvent>,
    last_outcome: Option<Outcome>,
    on_outcome: Option<OutcomeHandler>,
}

impl GameEngine {
    /// Create an idle engine. Every session derives its randomness from `seed`.
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            seed,
            settings,
            phase: GamePhase::Idle,
            session: None,
            upgrades: UpgradeSnapshot::default(),
            session_multiplier: 1.0,
            sessions_started: 0,
            events: Vec::new(),
            last_outcome: None,
            on_outcome: None,
        }
    }

    /// Install the collaborator that receives each session's outcome
    pub fn set_outcome_handler(&mut self, handler: impl FnMut(&Outcome) + 'static) {
        self.on_outcome = Some(Box::new(handler));
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Outcome of the most recent finished session
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Start a fresh session
    pub fn activate(
        &mut self,
        upgrades: UpgradeSnapshot,
        session_multiplier: f64,
    ) -> Result<(), EngineError> {
        if self.phase == GamePhase::Running {
            return Err(EngineError::AlreadyRunning);
        }

        let multiplier = sanitize_multiplier(session_multiplier);
        if multiplier != session_multiplier {
            log::warn!(
                "Session multiplier {} sanitized to {}",
                session_multiplier,
                multiplier
            );
        }
        self.upgrades = upgrades.sanitized();
        self.session_multiplier = multiplier;

        let rng = SessionRng::new(self.seed, self.sessions_started);
        let mut session = SessionState::new(rng, self.settings.max_particles());
        spawn_next(&mut session, &self.upgrades);

        self.session = Some(session);
        self.sessions_started += 1;
        self.events.clear();
        self.last_outcome = None;
        self.phase = GamePhase::Running;

        log::info!(
            "Session {} started (multiplier {:.2}, upgrades {:?})",
            self.sessions_started,
            self.session_multiplier,
            self.upgrades
        );
        Ok(())
    }

    /// The player's only input
    pub fn submit_placement_action(&mut self) -> Result<PlacementResult, EngineError> {
        if self.sessions_started == 0 {
            return Err(EngineError::NotActivated);
        }
        if self.phase != GamePhase::Running {
            return Ok(PlacementResult::Ignored);
        }
        let shake = self.settings.effective_screen_shake();
        let Some(session) = self.session.as_mut() else {
            return Ok(PlacementResult::Ignored);
        };
        if session.in_grace_window() {
            log::debug!("Placement ignored inside grace window");
            return Ok(PlacementResult::Ignored);
        }

        let step = place(session, &self.upgrades, shake, &mut self.events);
        let score = session.score;
        match step {
            PlaceStep::Placed => Ok(PlacementResult::Placed { score }),
            PlaceStep::Failed => Ok(PlacementResult::Ended(self.finish(GamePhase::Failed))),
            PlaceStep::NoActiveBlock => Ok(PlacementResult::Ignored),
        }
    }

    /// End the session early with whatever has accrued.
    ///
    /// Returns the outcome if this call ended the session, `None` if it had
    /// already ended.
    pub fn interrupt(&mut self) -> Result<Option<Outcome>, EngineError> {
        if self.sessions_started == 0 {
            return Err(EngineError::NotActivated);
        }
        if self.phase != GamePhase::Running {
            return Ok(None);
        }
        let score = self.session.as_ref().map(|s| s.score).unwrap_or(0);
        self.events.push(GameEvent::Interrupted { score });
        Ok(Some(self.finish(GamePhase::Interrupted)))
    }

    /// Advance by one host frame. Returns whether the host should keep
    /// scheduling frames.
    pub fn tick(&mut self, frame: FrameContext) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        if let Some(session) = self.session.as_mut() {
            advance(session, frame.now_ms);
        }
        true
    }

    /// Draw the current frame
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        if let Some(session) = &self.session {
            draw_frame(surface, &FrameView::new(session));
        }
    }

    /// Take queued events (sounds, perfects, criticals, ...)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn telemetry(&self) -> Telemetry {
        let (score, bonus_xp, bonus_gold) = self
            .session
            .as_ref()
            .map(|s| (s.score, s.totals.bonus_xp, s.totals.bonus_gold))
            .unwrap_or_default();
        let active = self.session.as_ref().and_then(|s| s.active);
        Telemetry {
            phase: self.phase,
            score,
            projected: finalize(
                score,
                bonus_xp,
                bonus_gold,
                &self.upgrades,
                self.session_multiplier,
            ),
            bonus_xp,
            bonus_gold,
            active_width: active.map(|b| b.width),
            active_speed: active.map(|b| b.speed),
            particles: self.session.as_ref().map(|s| s.particles.len()).unwrap_or(0),
        }
    }

    /// Stop the run, compute rewards and report them exactly once
    fn finish(&mut self, phase: GamePhase) -> Outcome {
        let (score, bonus_xp, bonus_gold) = match self.session.as_mut() {
            Some(session) => {
                session.active = None;
                (session.score, session.totals.bonus_xp, session.totals.bonus_gold)
            }
            None => (0, 0, 0),
        };
        let outcome = finalize(
            score,
            bonus_xp,
            bonus_gold,
            &self.upgrades,
            self.session_multiplier,
        );
        self.phase = phase;
        self.last_outcome = Some(outcome);

        log::info!(
            "Session {} {:?}: altitude {} xp {} gold {}",
            self.sessions_started,
            phase,
            outcome.altitude,
            outcome.xp,
            outcome.gold
        );

        if let Some(handler) = self.on_outcome.as_mut() {
            handler(&outcome);
        }
        outcome
    }
}
