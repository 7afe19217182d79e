//! Rendering module
//!
//! The engine draws through an injected `RenderSurface`; it never knows which
//! canvas, GPU or terminal sits behind it.

pub mod recording;
pub mod scene;

use glam::Vec2;

pub use recording::{DrawCommand, RecordingSurface};
pub use scene::{FrameView, draw_frame};

/// Straight RGBA, 0.0 - 1.0
pub type Color = [f32; 4];

/// Axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

/// Minimal 2D drawing surface
pub trait RenderSurface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);
    /// Centered text; `size` in pixels
    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
    /// Translate everything drawn until the matching `pop_offset`
    fn push_offset(&mut self, offset: Vec2);
    fn pop_offset(&mut self);
}
