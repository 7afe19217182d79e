//! Surface that records draw calls instead of rasterizing them
//!
//! Used by the headless binary and by tests that inspect a frame.

use glam::Vec2;

use super::{Color, Rect, RenderSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, line_width: f32 },
    StrokeCircle { center: Vec2, radius: f32, color: Color, line_width: f32 },
    Text { text: String, pos: Vec2, size: f32, color: Color },
}

/// Records commands with offsets already applied
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    offsets: Vec<Vec2>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame
    pub fn reset(&mut self) {
        self.commands.clear();
        self.offsets.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn offset(&self) -> Vec2 {
        self.offsets.iter().copied().sum()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, mut rect: Rect, color: Color) {
        rect.pos += self.offset();
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, mut rect: Rect, color: Color, line_width: f32) {
        rect.pos += self.offset();
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        let center = center + self.offset();
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        let pos = pos + self.offset();
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }

    fn push_offset(&mut self, offset: Vec2) {
        self.offsets.push(offset);
    }

    fn pop_offset(&mut self) {
        self.offsets.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_stack() {
        let mut surface = RecordingSurface::new();
        surface.push_offset(Vec2::new(1.0, 2.0));
        surface.push_offset(Vec2::new(10.0, 0.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), [1.0; 4]);
        surface.pop_offset();
        surface.fill_text("hi", Vec2::ZERO, 12.0, [1.0; 4]);
        surface.pop_offset();

        assert_eq!(
            surface.commands[0],
            DrawCommand::FillRect {
                rect: Rect::new(11.0, 2.0, 5.0, 5.0),
                color: [1.0; 4]
            }
        );
        match &surface.commands[1] {
            DrawCommand::Text { pos, .. } => assert_eq!(*pos, Vec2::new(1.0, 2.0)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["hi"]);
    }
}
