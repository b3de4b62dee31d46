//! Deterministic core module
//!
//! Both interactive engines live here. This module must be pure and
//! deterministic:
//! - Explicit time only (tick deltas and caller-supplied timestamps)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod evade;
pub mod field;
pub mod geom;

pub use evade::{EvadeState, Layout};
pub use field::{FieldState, Particle, ShapeKind};
pub use geom::{Rect, distance_to_rect};
