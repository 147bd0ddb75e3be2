use glam::Vec2;
use motion_core::{Glow, Rgba, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface`] backed by a canvas 2D context.
pub struct Canvas2dSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// `None` when the canvas cannot hand out a 2D context.
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&color.css());
        ctx.set_line_width(line_width as f64);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Option<Glow>) {
        let ctx = &self.ctx;
        match glow {
            Some(g) => {
                ctx.set_shadow_blur(g.blur as f64);
                ctx.set_shadow_color(&g.color.css());
            }
            None => ctx.set_shadow_blur(0.0),
        }
        ctx.set_fill_style_str(&color.css());
        ctx.begin_path();
        _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        ctx.fill();
        if glow.is_some() {
            ctx.set_shadow_blur(0.0);
        }
    }
}
