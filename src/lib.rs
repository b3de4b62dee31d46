//! Petalfall - an animated single-page greeting card
//!
//! Core modules:
//! - `sim`: Deterministic core (particle field, runaway-button evasion)
//! - `renderer`: Canvas-2D drawing of the particle field
//! - `platform`: Browser/native glue (time, motion preference)
//! - `audio`: Background music control
//! - `ui`: Reveal-on-scroll, gallery carousel, celebration burst

pub mod platform;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use sim::{EvadeState, FieldState, Layout};

/// Tuning constants for the field and the evasion engine
pub mod consts {
    /// One simulated tick, in milliseconds (idealized 60fps frame)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Frame-delta clamp in ticks, so tab-resume doesn't jump the simulation
    pub const DT_MIN_TICKS: f32 = 0.25;
    pub const DT_MAX_TICKS: f32 = 2.0;

    /// Viewport area (px²) per particle
    pub const AREA_PER_PARTICLE: f32 = 35_000.0;
    /// Particle count bounds
    pub const MIN_PARTICLES: usize = 18;
    pub const MAX_PARTICLES: usize = 46;
    /// Share of particles drawn as petals (the rest are hearts)
    pub const PETAL_SHARE: f32 = 0.72;
    /// Off-screen margin before a particle wraps
    pub const WRAP_MARGIN: f32 = 24.0;
    /// Horizontal drift amplitude from the wobble oscillator
    pub const WOBBLE_DRIFT: f32 = 0.22;
    /// Number of colors in the fixed palette
    pub const PALETTE_SIZE: usize = 4;
    /// Hearts render slightly larger than their base radius
    pub const HEART_SCALE: f32 = 1.3;

    /// Particle attribute ranges at seeding time
    pub const RADIUS_MIN: f32 = 6.0;
    pub const RADIUS_MAX: f32 = 14.0;
    pub const DRIFT_X_MAX: f32 = 0.18;
    pub const FALL_SPEED_MIN: f32 = 0.25;
    pub const FALL_SPEED_MAX: f32 = 0.8;
    pub const SPIN_MAX: f32 = 0.012;
    pub const WOBBLE_SPEED_MIN: f32 = 0.006;
    pub const WOBBLE_SPEED_MAX: f32 = 0.016;

    /// Pointer distance to the decline control that triggers a dodge (px)
    pub const PROXIMITY_RADIUS: f32 = 90.0;
    /// Minimum delay between two dodges (ms)
    pub const DODGE_COOLDOWN_MS: f64 = 280.0;
    /// The relocated control keeps this margin to every viewport edge (px)
    pub const SAFE_MARGIN: f32 = 12.0;
    /// Random placements scored per dodge
    pub const DODGE_CANDIDATES: usize = 10;
    /// Candidate spread around the anchor center: fraction of the viewport,
    /// clamped to an absolute range
    pub const SPREAD_X_FRACTION: f32 = 0.38;
    pub const SPREAD_X_MIN: f32 = 180.0;
    pub const SPREAD_X_MAX: f32 = 420.0;
    pub const SPREAD_Y_FRACTION: f32 = 0.30;
    pub const SPREAD_Y_MIN: f32 = 160.0;
    pub const SPREAD_Y_MAX: f32 = 360.0;
}

/// Normalize a wall-clock frame delta to simulation ticks.
///
/// Clamped so a slow frame or a tab-resume advances the field by at most two
/// ticks and a fast frame by at least a quarter tick.
#[inline]
pub fn normalized_dt(frame_ms: f64) -> f32 {
    ((frame_ms / consts::TICK_MS) as f32).clamp(consts::DT_MIN_TICKS, consts::DT_MAX_TICKS)
}
