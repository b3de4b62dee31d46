//! Canvas surface state
//!
//! Owns the 2D context and the device-pixel-ratio transform. A missing
//! context is not an error: the decorative layer simply never starts.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{GLOW, PALETTE, trace_heart, trace_petal};
use crate::sim::{FieldState, ShapeKind};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Acquire the 2D context. `None` leaves the decorative layer off.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        })
    }

    /// Resize the backing store for the current viewport and device pixel
    /// ratio (clamped to [1, 2]) and reset the drawing transform. Particles
    /// are untouched.
    pub fn resize(&mut self, css_width: f64, css_height: f64, device_pixel_ratio: f64) {
        let dpr = device_pixel_ratio.clamp(1.0, 2.0);
        self.width = css_width.floor();
        self.height = css_height.floor();
        self.canvas.set_width((self.width * dpr) as u32);
        self.canvas.set_height((self.height * dpr) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Draw every particle in creation order
    pub fn render(&self, field: &FieldState) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        for p in field.particles() {
            ctx.save();
            let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
            let _ = ctx.rotate(p.rot as f64);
            ctx.set_shadow_color(GLOW);
            ctx.set_shadow_blur(14.0);
            match p.shape {
                ShapeKind::Heart => trace_heart(ctx, p.radius as f64),
                ShapeKind::Petal => trace_petal(ctx, p.radius as f64),
            }
            ctx.set_fill_style_str(PALETTE[p.color % PALETTE.len()]);
            ctx.fill();
            ctx.restore();
        }
    }
}
