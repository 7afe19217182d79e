//! Sound cues
//!
//! Procedurally generated sound effects - no external files needed!
//! The engine only decides *when* a cue fires; playback belongs to the host.

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// Frequency sweep and gain envelope for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub waveform: Waveform,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Peak gain before master volume
    pub gain: f32,
    /// Seconds
    pub duration: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Partial placement
    Hit,
    /// Perfect placement (skill or save)
    Perfect,
    /// Session-ending miss
    Fail,
}

impl SoundEffect {
    pub fn envelope(&self) -> Envelope {
        match self {
            SoundEffect::Hit => Envelope {
                waveform: Waveform::Square,
                freq_start: 120.0,
                freq_end: 60.0,
                gain: 0.007,
                duration: 0.1,
            },
            SoundEffect::Perfect => Envelope {
                waveform: Waveform::Sine,
                freq_start: 523.25,
                freq_end: 1046.5,
                gain: 0.02,
                duration: 0.3,
            },
            SoundEffect::Fail => Envelope {
                waveform: Waveform::Sawtooth,
                freq_start: 80.0,
                freq_end: 30.0,
                gain: 0.01,
                duration: 0.5,
            },
        }
    }
}

/// Host-side playback
pub trait AudioSink {
    /// Play `effect` with `volume` already folded in from settings
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: usize,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        let env = effect.envelope();
        log::debug!(
            "sfx {:?}: {:?} {}->{} Hz for {}s",
            effect,
            env.waveform,
            env.freq_start,
            env.freq_end,
            env.duration
        );
        self.played += 1;
    }
}
