//! Drawing surface abstraction for the node field.
//!
//! The field only needs three primitives, so the web frontend can map them
//! onto a `CanvasRenderingContext2d` and tests can record them instead.

use glam::Vec2;

/// Straight-alpha sRGB colour as used by canvas style strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(rgb: [u8; 3], a: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }

    /// CSS `rgba(...)` string accepted by `fillStyle`/`strokeStyle`.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Option<Glow>);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        line_width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        glow: Option<Glow>,
    },
}

/// Surface that keeps the commands of the last frame(s) in memory.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the most recent `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn line_count(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn glow_count(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { glow: Some(_), .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        // Only the newest frame is interesting; keep memory flat across frames.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Option<Glow>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            glow,
        });
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, width: f32, height: f32) {
        (**self).clear(width, height)
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32) {
        (**self).stroke_line(from, to, color, line_width)
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Option<Glow>) {
        (**self).fill_circle(center, radius, color, glow)
    }
}
