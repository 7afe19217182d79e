//! Ascent Stack entry point
//!
//! Headless native runner: an autopilot plays one session against a
//! recording surface and logs the outcome.
//!
//! Usage: `ascent-stack [seed] [skill_px] [quality]`

use std::cell::Cell;
use std::rc::Rc;

use ascent_stack::audio::{AudioSink, LogAudio};
use ascent_stack::renderer::RecordingSurface;
use ascent_stack::sim::GameEvent;
use ascent_stack::{
    FrameContext, GameEngine, MinerTier, PlacementResult, QualityPreset, Settings, UpgradeLevels,
    UpgradeSnapshot,
};

/// Host frame interval (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after ten minutes of simulated play
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(42);
    let skill: f32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4.0);
    let quality = args
        .get(2)
        .and_then(|s| QualityPreset::parse(s))
        .unwrap_or_default();

    log::info!(
        "Ascent Stack (native) starting: seed {}, skill {}px, quality {}",
        seed,
        skill,
        quality.as_str()
    );

    let settings = Settings::from_preset(quality);
    let volume = settings.effective_volume();
    let mut engine = GameEngine::new(seed, settings);

    let reported = Rc::new(Cell::new(0u32));
    let counter = reported.clone();
    engine.set_outcome_handler(move |outcome| {
        counter.set(counter.get() + 1);
        println!(
            "Altitude {}m | +{} XP | +{} gold",
            outcome.altitude, outcome.xp, outcome.gold
        );
    });

    let levels = UpgradeLevels {
        magnet: 2,
        battery: 2,
        stabilizer: 5,
        gridlock: 3,
        luck: 3,
    };
    let upgrades = UpgradeSnapshot::from_levels(&levels);
    if let Err(e) = engine.activate(upgrades, MinerTier(1).multiplier()) {
        log::error!("Activation failed: {}", e);
        return;
    }

    let mut surface = RecordingSurface::new();
    let mut audio = LogAudio::default();
    let mut now_ms = 0.0;

    for frame in 0..MAX_FRAMES {
        if !engine.tick(FrameContext { now_ms }) {
            break;
        }
        surface.reset();
        engine.render(&mut surface);

        if should_drop(&engine, skill) {
            match engine.submit_placement_action() {
                Ok(PlacementResult::Ended(_)) => log::info!("Missed on frame {}", frame),
                Ok(_) => {}
                Err(e) => log::error!("Placement rejected: {}", e),
            }
        }

        for event in engine.drain_events() {
            if let GameEvent::Sound(effect) = event {
                audio.play(effect, volume);
            }
        }
        now_ms += FRAME_MS;
    }

    if let Ok(Some(_)) = engine.interrupt() {
        log::info!("Session interrupted at frame limit");
    }

    let telemetry = engine.telemetry();
    log::info!(
        "Done: {} outcome(s), {} sounds, final score {}",
        reported.get(),
        audio.played,
        telemetry.score
    );
}

/// Autopilot: drop when the moving block lines up within `skill` pixels
fn should_drop(engine: &GameEngine, skill: f32) -> bool {
    let Some(session) = engine.session() else {
        return false;
    };
    let Some(active) = session.active else {
        return false;
    };
    (active.x - session.top().x).abs() <= skill
}
