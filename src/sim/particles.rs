//! Transient feedback particles
//!
//! Flashes, rings, ejecta and floating labels. Cosmetic only: the pool can be
//! capped to zero and the run plays out identically.

use glam::Vec2;
use rand::Rng;

use crate::consts::GAME_WIDTH;

/// Life lost per step
pub const LIFE_DECAY: f32 = 0.02;
/// Downward acceleration on ejecta (pixels/step²)
pub const EJECTA_GRAVITY: f32 = 0.25;
pub const RING_GROWTH: f32 = 1.08;
pub const SHRINK: f32 = 0.96;
pub const EJECTA_PER_BURST: usize = 15;

/// Text callouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callout {
    /// Skill-perfect placement
    Perfect,
    /// Auto-correct turned a miss-aligned drop into a perfect
    Gridlock,
    /// Critical bonus
    Lucky,
}

impl Callout {
    pub fn text(&self) -> &'static str {
        match self {
            Callout::Perfect => "PERFECT",
            Callout::Gridlock => "GRIDLOCK",
            Callout::Lucky => "LUCKY!",
        }
    }
}

/// Particle kinds, each with its own motion/scale rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Text(Callout),
    /// Falling square debris
    Ejecta,
    /// Expanding outline
    Ring,
    /// Full-width horizontal flash line
    Flash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub scale: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Advance one step
    fn age(&mut self) {
        self.pos += self.vel;
        self.life -= LIFE_DECAY;
        match self.kind {
            ParticleKind::Text(_) => {}
            ParticleKind::Ring => self.scale *= RING_GROWTH,
            ParticleKind::Ejecta => {
                self.vel.y += EJECTA_GRAVITY;
                self.scale *= SHRINK;
            }
            ParticleKind::Flash => self.scale *= SHRINK,
        }
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Owned particle pool
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(256)),
            max_particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Queue a particle; dropped silently when the pool is full
    pub fn emit(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Age everything one step and drop the dead
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.age();
        }
        self.particles.retain(Particle::alive);
    }

    /// Flash, ring, ejecta and a label for a perfect placement
    pub fn perfect_burst(&mut self, center: Vec2, saved: bool, rng: &mut impl Rng) {
        if self.max_particles == 0 {
            return;
        }
        self.emit(Particle {
            pos: Vec2::new(GAME_WIDTH / 2.0, center.y),
            vel: Vec2::ZERO,
            life: 0.8,
            scale: 1.0,
            kind: ParticleKind::Flash,
        });
        self.emit(Particle {
            pos: center,
            vel: Vec2::ZERO,
            life: 0.6,
            scale: 1.0,
            kind: ParticleKind::Ring,
        });
        let callout = if saved { Callout::Gridlock } else { Callout::Perfect };
        self.emit(Particle {
            pos: center - Vec2::new(0.0, 45.0),
            vel: Vec2::new(0.0, -2.0),
            life: 1.0,
            scale: 2.5,
            kind: ParticleKind::Text(callout),
        });
        for _ in 0..EJECTA_PER_BURST {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 15.0,
                (rng.random::<f32>() - 0.5) * 15.0 - 5.0,
            );
            self.emit(Particle {
                pos: center,
                vel,
                life: 1.0,
                scale: 4.0 + rng.random::<f32>() * 6.0,
                kind: ParticleKind::Ejecta,
            });
        }
    }

    /// Floating label for a critical, offset so it stacks under a perfect label
    pub fn critical_label(&mut self, center: Vec2) {
        self.emit(Particle {
            pos: center - Vec2::new(0.0, 80.0),
            vel: Vec2::new(0.0, -1.5),
            life: 1.0,
            scale: 1.8,
            kind: ParticleKind::Text(Callout::Lucky),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(kind: ParticleKind) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life: 1.0,
            scale: 2.0,
            kind,
        }
    }

    #[test]
    fn test_per_kind_rules() {
        let mut text = particle(ParticleKind::Text(Callout::Perfect));
        let mut ring = particle(ParticleKind::Ring);
        let mut ejecta = particle(ParticleKind::Ejecta);
        let mut flash = particle(ParticleKind::Flash);
        for p in [&mut text, &mut ring, &mut ejecta, &mut flash] {
            p.age();
            assert_eq!(p.pos.x, 1.0);
            assert!((p.life - 0.98).abs() < 1e-6);
        }
        assert_eq!(text.scale, 2.0);
        assert!(ring.scale > 2.0);
        assert!(ejecta.scale < 2.0);
        assert!(flash.scale < 2.0);
        assert_eq!(ejecta.vel.y, EJECTA_GRAVITY);
        assert_eq!(ring.vel.y, 0.0);
    }

    #[test]
    fn test_particles_expire() {
        let mut system = ParticleSystem::new(256);
        let mut rng = Pcg32::seed_from_u64(7);
        system.perfect_burst(Vec2::new(200.0, 300.0), false, &mut rng);
        system.critical_label(Vec2::new(200.0, 300.0));
        assert_eq!(system.len(), 3 + EJECTA_PER_BURST + 1);
        for _ in 0..51 {
            system.step();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_pool_cap() {
        let mut system = ParticleSystem::new(5);
        let mut rng = Pcg32::seed_from_u64(7);
        system.perfect_burst(Vec2::ZERO, true, &mut rng);
        assert_eq!(system.len(), 5);

        let mut disabled = ParticleSystem::new(0);
        disabled.perfect_burst(Vec2::ZERO, true, &mut rng);
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_saved_label_differs() {
        let mut system = ParticleSystem::new(256);
        let mut rng = Pcg32::seed_from_u64(1);
        system.perfect_burst(Vec2::ZERO, true, &mut rng);
        assert!(system
            .iter()
            .any(|p| p.kind == ParticleKind::Text(Callout::Gridlock)));
        assert!(!system
            .iter()
            .any(|p| p.kind == ParticleKind::Text(Callout::Perfect)));
    }
}
