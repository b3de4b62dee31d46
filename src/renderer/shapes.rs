//! Path tracing for the two particle outlines
//!
//! Paths are traced around the origin; the caller positions, rotates and
//! fills them.

use web_sys::CanvasRenderingContext2d;

use crate::consts::HEART_SCALE;

/// Fixed particle palette: soft pink, rose, rose gold, cream
pub const PALETTE: [&str; 4] = [
    "rgba(242,179,198,0.70)",
    "rgba(200,90,122,0.65)",
    "rgba(216,176,140,0.55)",
    "rgba(255,243,234,0.40)",
];

/// Soft glow behind every particle
pub const GLOW: &str = "rgba(242,179,198,0.12)";

/// Classic two-Bézier heart, drawn on a 20-unit grid and scaled to `size`
pub fn trace_heart(ctx: &CanvasRenderingContext2d, size: f64) {
    let s = size * HEART_SCALE as f64 / 20.0;
    let _ = ctx.scale(s, s);
    ctx.begin_path();
    ctx.move_to(0.0, 6.0);
    ctx.bezier_curve_to(-10.0, -4.0, -18.0, 6.0, 0.0, 18.0);
    ctx.bezier_curve_to(18.0, 6.0, 10.0, -4.0, 0.0, 6.0);
    ctx.close_path();
}

/// Teardrop petal: two mirrored quadratic curves
pub fn trace_petal(ctx: &CanvasRenderingContext2d, size: f64) {
    ctx.begin_path();
    ctx.move_to(0.0, -size);
    ctx.quadratic_curve_to(size * 0.95, -size * 0.1, 0.0, size);
    ctx.quadratic_curve_to(-size * 0.95, -size * 0.1, 0.0, -size);
    ctx.close_path();
}
