//! Particle field state and per-tick drift
//!
//! A fixed-size set of decorative petal/heart particles drifting down the
//! viewport. The count is derived from viewport area once at creation and
//! never changes; `resize` only moves the wrap bounds.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::consts::*;

/// Particle outline drawn by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Petal,
    Heart,
}

/// A drifting decorative particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Base drift per tick; the wobble oscillator adds on top of `vel.x`
    pub vel: Vec2,
    pub radius: f32,
    /// Rotation in radians, and its per-tick velocity
    pub rot: f32,
    pub rot_vel: f32,
    /// Phase of the horizontal wobble oscillator
    pub wobble: f32,
    pub wobble_speed: f32,
    /// Index into the renderer's fixed palette
    pub color: usize,
    pub shape: ShapeKind,
}

/// The particle field (one instance per page)
#[derive(Debug, Clone)]
pub struct FieldState {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl FieldState {
    /// Particle count for a viewport: one per 35000px² of area, clamped
    pub fn particle_count(width: f32, height: f32) -> usize {
        let n = (width * height / AREA_PER_PARTICLE).round() as usize;
        n.clamp(MIN_PARTICLES, MAX_PARTICLES)
    }

    /// Seed the field for the given viewport
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let mut rng = Pcg32::seed_from_u64(seed);

        let count = Self::particle_count(width, height);
        let particles = (0..count)
            .map(|_| {
                let shape = if rng.random::<f32>() < PETAL_SHARE {
                    ShapeKind::Petal
                } else {
                    ShapeKind::Heart
                };
                Particle {
                    pos: Vec2::new(
                        rng.random_range(0.0..width),
                        rng.random_range(-height..height),
                    ),
                    vel: Vec2::new(
                        rng.random_range(-DRIFT_X_MAX..DRIFT_X_MAX),
                        rng.random_range(FALL_SPEED_MIN..FALL_SPEED_MAX),
                    ),
                    radius: rng.random_range(RADIUS_MIN..RADIUS_MAX),
                    rot: rng.random_range(0.0..TAU),
                    rot_vel: rng.random_range(-SPIN_MAX..SPIN_MAX),
                    wobble: rng.random_range(0.0..TAU),
                    wobble_speed: rng.random_range(WOBBLE_SPEED_MIN..WOBBLE_SPEED_MAX),
                    color: rng.random_range(0..PALETTE_SIZE),
                    shape,
                }
            })
            .collect();

        Self {
            width,
            height,
            particles,
            rng,
        }
    }

    /// Move the wrap bounds to a new viewport size. Never reseeds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Advance every particle by `dt` ticks, then wrap.
    ///
    /// A particle leaving the bottom edge re-enters at the top with a fresh
    /// random x; left/right edges wrap directly to the opposite side.
    pub fn advance(&mut self, dt: f32) {
        let Self {
            width,
            height,
            particles,
            rng,
        } = self;
        let (w, h) = (*width, *height);

        for p in particles.iter_mut() {
            p.wobble += p.wobble_speed * dt;
            p.pos.x += (p.vel.x + p.wobble.sin() * WOBBLE_DRIFT) * dt;
            p.pos.y += p.vel.y * dt;
            p.rot += p.rot_vel * dt;

            if p.pos.y > h + WRAP_MARGIN {
                p.pos.y = -WRAP_MARGIN;
                p.pos.x = rng.random_range(0.0..w);
            }
            if p.pos.x < -WRAP_MARGIN {
                p.pos.x = w + WRAP_MARGIN;
            } else if p.pos.x > w + WRAP_MARGIN {
                p.pos.x = -WRAP_MARGIN;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_formula() {
        // 1280x800 -> 1024000 / 35000 = 29.26 -> 29
        assert_eq!(FieldState::particle_count(1280.0, 800.0), 29);
        // Mobile portrait: 390x844 -> 329160 / 35000 = 9.4 -> clamped up
        assert_eq!(FieldState::particle_count(390.0, 844.0), MIN_PARTICLES);
        // 4K: clamped down
        assert_eq!(FieldState::particle_count(3840.0, 2160.0), MAX_PARTICLES);
    }

    #[test]
    fn test_new_seeds_count_and_ranges() {
        let field = FieldState::new(1280.0, 800.0, 42);
        assert_eq!(field.particles().len(), 29);
        for p in field.particles() {
            assert!((0.0..1280.0).contains(&p.pos.x));
            assert!((-800.0..800.0).contains(&p.pos.y));
            assert!((RADIUS_MIN..RADIUS_MAX).contains(&p.radius));
            assert!(p.vel.x.abs() <= DRIFT_X_MAX);
            assert!((FALL_SPEED_MIN..FALL_SPEED_MAX).contains(&p.vel.y));
            assert!(p.rot_vel.abs() <= SPIN_MAX);
            assert!((WOBBLE_SPEED_MIN..WOBBLE_SPEED_MAX).contains(&p.wobble_speed));
            assert!(p.color < PALETTE_SIZE);
        }
        // Both shapes show up at this count
        let petals = field
            .particles()
            .iter()
            .filter(|p| p.shape == ShapeKind::Petal)
            .count();
        assert!(petals > 0 && petals < field.particles().len());
    }

    #[test]
    fn test_resize_keeps_particle_count() {
        let mut field = FieldState::new(1280.0, 800.0, 7);
        let before = field.particles().len();
        field.resize(390.0, 844.0);
        assert_eq!(field.particles().len(), before);
        field.resize(3840.0, 2160.0);
        assert_eq!(field.particles().len(), before);
    }

    #[test]
    fn test_wrap_bottom_reenters_at_top() {
        let mut field = FieldState::new(800.0, 600.0, 99);
        field.particles[0].pos = Vec2::new(400.0, 600.0 + WRAP_MARGIN + 1.0);
        field.advance(0.25);
        let p = &field.particles[0];
        assert_eq!(p.pos.y, -WRAP_MARGIN);
        assert!((0.0..800.0).contains(&p.pos.x));
    }

    #[test]
    fn test_wrap_horizontal_edges() {
        let mut field = FieldState::new(800.0, 600.0, 99);
        field.particles[0].pos = Vec2::new(-WRAP_MARGIN - 2.0, 100.0);
        field.particles[0].vel = Vec2::new(0.0, 0.3);
        field.particles[1].pos = Vec2::new(800.0 + WRAP_MARGIN + 2.0, 100.0);
        field.particles[1].vel = Vec2::new(0.0, 0.3);
        field.advance(0.25);
        assert_eq!(field.particles[0].pos.x, 800.0 + WRAP_MARGIN);
        assert_eq!(field.particles[1].pos.x, -WRAP_MARGIN);
    }

    #[test]
    fn test_vertical_positions_stay_in_wrap_band() {
        let mut field = FieldState::new(800.0, 600.0, 1234);
        for _ in 0..2000 {
            field.advance(2.0);
            for p in field.particles() {
                assert!(p.pos.y <= 600.0 + WRAP_MARGIN);
                assert!(p.pos.y >= -600.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_evolution() {
        let mut a = FieldState::new(1024.0, 768.0, 5555);
        let mut b = FieldState::new(1024.0, 768.0, 5555);
        for _ in 0..300 {
            a.advance(1.0);
            b.advance(1.0);
        }
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.rot, pb.rot);
        }
    }
}
