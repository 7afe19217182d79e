//! Scene drawing
//!
//! Grid, stack, moving block, particles and HUD, in back-to-front order.

use glam::Vec2;

use super::{Color, Rect, RenderSurface};
use crate::consts::{BLOCK_HEIGHT, GAME_HEIGHT, GAME_WIDTH};
use crate::sim::{ActiveBlock, Particle, ParticleKind, SessionState, StackBlock};

const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const GOLD_NEON: Color = [1.0, 0.843, 0.0, 1.0];
const GRID: Color = [1.0, 1.0, 1.0, 0.03];
const GRID_SPACING: f32 = 40.0;
/// Visible gap between stacked blocks
const BLOCK_GAP: f32 = 6.0;

/// Everything a frame needs, borrowed from the session
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub stack: &'a [StackBlock],
    pub active: Option<&'a ActiveBlock>,
    pub particles: &'a [Particle],
    pub score: u32,
    pub camera_y: f32,
    pub shake_offset: Vec2,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a SessionState) -> Self {
        Self {
            stack: &state.stack,
            active: state.active.as_ref(),
            particles: state.particles.as_slice(),
            score: state.score,
            camera_y: state.camera_y,
            shake_offset: state.shake_offset,
        }
    }
}

fn with_alpha(mut color: Color, alpha: f32) -> Color {
    color[3] = alpha.clamp(0.0, 1.0);
    color
}

fn block_rect(x: f32, y: f32, width: f32) -> Rect {
    Rect::new(x, y, width, BLOCK_HEIGHT - BLOCK_GAP)
}

fn draw_grid(surface: &mut dyn RenderSurface) {
    let mut x = 0.0;
    while x < GAME_WIDTH {
        surface.fill_rect(Rect::new(x, 0.0, 1.0, GAME_HEIGHT), GRID);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < GAME_HEIGHT {
        surface.fill_rect(Rect::new(0.0, y, GAME_WIDTH, 1.0), GRID);
        y += GRID_SPACING;
    }
}

fn draw_particle(surface: &mut dyn RenderSurface, p: &Particle) {
    match p.kind {
        ParticleKind::Flash => {
            surface.fill_rect(
                Rect::new(0.0, p.pos.y - 1.0, GAME_WIDTH, 3.0),
                with_alpha(GOLD_NEON, p.life * 0.8),
            );
        }
        ParticleKind::Text(callout) => {
            surface.fill_text(callout.text(), p.pos, 14.0 * p.scale, with_alpha(GOLD_NEON, p.life));
        }
        ParticleKind::Ring => {
            surface.stroke_circle(p.pos, 20.0 * p.scale, with_alpha(GOLD_NEON, p.life), 2.0);
        }
        ParticleKind::Ejecta => {
            surface.fill_rect(
                Rect::new(p.pos.x, p.pos.y, p.scale, p.scale),
                with_alpha(GOLD_NEON, p.life),
            );
        }
    }
}

/// Draw one full frame
pub fn draw_frame(surface: &mut dyn RenderSurface, view: &FrameView<'_>) {
    surface.clear(BLACK);
    draw_grid(surface);

    surface.push_offset(Vec2::new(0.0, view.camera_y) + view.shake_offset);

    for block in view.stack {
        let rect = block_rect(block.x, block.y, block.width);
        if block.is_perfect {
            surface.fill_rect(rect, GOLD_NEON);
            surface.stroke_rect(rect, GOLD_NEON, 2.0);
        } else {
            surface.fill_rect(rect, WHITE);
            surface.stroke_rect(rect, WHITE, 1.0);
        }
    }

    if let Some(active) = view.active {
        surface.fill_rect(block_rect(active.x, active.y, active.width), WHITE);
    }

    for particle in view.particles {
        draw_particle(surface, particle);
    }

    surface.pop_offset();

    // HUD stays fixed on screen
    surface.fill_text(&view.score.to_string(), Vec2::new(GAME_WIDTH / 2.0, 100.0), 60.0, WHITE);
    surface.fill_text("METERS", Vec2::new(GAME_WIDTH / 2.0, 120.0), 12.0, with_alpha(WHITE, 0.6));
}
