//! Platform glue
//!
//! Browser/native differences for:
//! - Time (performance.now vs Instant)
//! - Motion preference (prefers-reduced-motion media query)

/// Milliseconds since an arbitrary epoch, monotonic enough for cooldowns
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Whether the platform asks for reduced motion. Any lookup failure reads
/// as "no preference".
#[cfg(target_arch = "wasm32")]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn prefers_reduced_motion() -> bool {
    false
}

/// Hard precondition for the particle field: both a rendering surface and
/// full-motion consent, or the simulator never starts.
#[inline]
pub fn should_animate(reduced_motion: bool, has_surface: bool) -> bool {
    has_surface && !reduced_motion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_animate_requires_surface_and_motion() {
        assert!(should_animate(false, true));
        // Reduced motion wins even with a surface available
        assert!(!should_animate(true, true));
        // No surface is a silent no, not an error
        assert!(!should_animate(false, false));
        assert!(!should_animate(true, false));
    }
}
