//! Runaway-button evasion engine
//!
//! Tracks the decline control and relocates it away from an approaching
//! pointer once armed. The wiring layer passes a `Layout` snapshot and the
//! current time into every call, so the state itself stays free of DOM and
//! clock dependencies.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::{Rect, distance_to_rect};
use crate::consts::*;

/// Geometry snapshot taken by the wiring layer at call time
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Decline control bounds, viewport coordinates
    pub control: Rect,
    /// Region the dodge stays centered around
    pub anchor: Rect,
    /// Viewport size in CSS pixels
    pub viewport: Vec2,
}

/// Evasion controller state (one instance per page)
#[derive(Debug, Clone)]
pub struct EvadeState {
    armed: bool,
    /// Timestamp (ms) until which further dodges are dropped
    cooldown_until: f64,
    /// Center the control is pinned to, once it has dodged at least once
    override_center: Option<Vec2>,
    rng: Pcg32,
}

impl EvadeState {
    pub fn new(seed: u64) -> Self {
        Self {
            armed: false,
            cooldown_until: 0.0,
            override_center: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// One-way arming, idempotent. Triggered by the pointer first entering
    /// the question panel.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Reset to the unarmed state and restore the natural layout position
    pub fn disarm(&mut self) {
        self.armed = false;
        self.override_center = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current positional override, if the control has dodged
    pub fn override_center(&self) -> Option<Vec2> {
        self.override_center
    }

    pub fn cooldown_active(&self, now_ms: f64) -> bool {
        now_ms < self.cooldown_until
    }

    /// Viewport geometry changed; any override is stale. Armed is kept.
    pub fn on_resize(&mut self) {
        self.override_center = None;
    }

    /// Pointer or touch moved. Dodges when armed and the point comes within
    /// `PROXIMITY_RADIUS` of the control's rectangle (not its center).
    pub fn pointer_move(&mut self, p: Vec2, layout: &Layout, now_ms: f64) -> Option<Vec2> {
        if !self.armed {
            return None;
        }
        if distance_to_rect(p, &layout.control) < PROXIMITY_RADIUS {
            self.dodge_from(p, layout, now_ms)
        } else {
            None
        }
    }

    /// Relocate away from `from`: score random candidates around the anchor
    /// center and pin the control to the one farthest from the approach
    /// point. Returns the new center when a dodge fired.
    ///
    /// Also the click path: clicking the control dodges from its own center,
    /// whatever the pointer distance.
    pub fn dodge_from(&mut self, from: Vec2, layout: &Layout, now_ms: f64) -> Option<Vec2> {
        if !self.armed || self.cooldown_active(now_ms) {
            return None;
        }

        let mut best: Option<Vec2> = None;
        let mut best_score = -1.0_f32;
        for _ in 0..DODGE_CANDIDATES {
            let Some(cand) = self.candidate(layout) else {
                continue;
            };
            let score = cand.distance(from);
            // Strict comparison keeps the first-seen candidate on ties
            if score > best_score {
                best_score = score;
                best = Some(cand);
            }
        }

        // Every candidate clamped away (control larger than the viewport):
        // dodge silently does nothing
        let best = best?;
        self.override_center = Some(best);
        self.cooldown_until = now_ms + DODGE_COOLDOWN_MS;
        Some(best)
    }

    /// One random candidate center near the anchor, clamped fully on-screen
    /// with the safety margin. `None` when the control cannot fit at all.
    fn candidate(&mut self, layout: &Layout) -> Option<Vec2> {
        let center = layout.anchor.center();
        let spread_x = (layout.viewport.x * SPREAD_X_FRACTION).clamp(SPREAD_X_MIN, SPREAD_X_MAX);
        let spread_y = (layout.viewport.y * SPREAD_Y_FRACTION).clamp(SPREAD_Y_MIN, SPREAD_Y_MAX);

        let x = center.x + self.rng.random_range(-spread_x..spread_x);
        let y = center.y + self.rng.random_range(-spread_y..spread_y);

        let half_w = layout.control.width() / 2.0;
        let half_h = layout.control.height() / 2.0;
        let (lo_x, hi_x) = (SAFE_MARGIN + half_w, layout.viewport.x - SAFE_MARGIN - half_w);
        let (lo_y, hi_y) = (SAFE_MARGIN + half_h, layout.viewport.y - SAFE_MARGIN - half_h);
        if lo_x > hi_x || lo_y > hi_y {
            return None;
        }
        Some(Vec2::new(x.clamp(lo_x, hi_x), y.clamp(lo_y, hi_y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop_layout() -> Layout {
        Layout {
            control: Rect::new(600.0, 400.0, 120.0, 48.0),
            anchor: Rect::new(500.0, 380.0, 320.0, 90.0),
            viewport: Vec2::new(1280.0, 800.0),
        }
    }

    #[test]
    fn test_pointer_move_noop_while_disarmed() {
        let layout = desktop_layout();
        let mut evade = EvadeState::new(1);
        // Point right on top of the control
        let moved = evade.pointer_move(Vec2::new(660.0, 424.0), &layout, 0.0);
        assert!(moved.is_none());
        assert!(evade.override_center().is_none());
    }

    #[test]
    fn test_arm_is_one_way_and_idempotent() {
        let mut evade = EvadeState::new(1);
        evade.arm();
        assert!(evade.is_armed());
        evade.arm();
        assert!(evade.is_armed());
        evade.disarm();
        assert!(!evade.is_armed());
    }

    #[test]
    fn test_proximity_measured_against_rectangle() {
        let layout = desktop_layout();
        // 89px straight left of the control edge: inside the threshold
        let mut evade = EvadeState::new(2);
        evade.arm();
        assert!(
            evade
                .pointer_move(Vec2::new(600.0 - 89.0, 424.0), &layout, 0.0)
                .is_some()
        );
        // 90px away: outside (threshold is strict)
        let mut evade = EvadeState::new(2);
        evade.arm();
        assert!(
            evade
                .pointer_move(Vec2::new(600.0 - 90.0, 424.0), &layout, 0.0)
                .is_none()
        );
        // Inside the rectangle: distance is zero, dodges
        let mut evade = EvadeState::new(2);
        evade.arm();
        assert!(
            evade
                .pointer_move(Vec2::new(601.0, 424.0), &layout, 0.0)
                .is_some()
        );
    }

    #[test]
    fn test_dodge_lands_inside_safe_margins() {
        let layout = desktop_layout();
        for seed in 0..50 {
            let mut evade = EvadeState::new(seed);
            evade.arm();
            let center = evade
                .dodge_from(Vec2::new(660.0, 424.0), &layout, 0.0)
                .expect("dodge fires");
            let half_w = layout.control.width() / 2.0;
            let half_h = layout.control.height() / 2.0;
            assert!(center.x >= SAFE_MARGIN + half_w);
            assert!(center.x <= layout.viewport.x - SAFE_MARGIN - half_w);
            assert!(center.y >= SAFE_MARGIN + half_h);
            assert!(center.y <= layout.viewport.y - SAFE_MARGIN - half_h);
        }
    }

    #[test]
    fn test_dodge_picks_farthest_candidate() {
        let layout = desktop_layout();
        let from = Vec2::new(660.0, 424.0);
        let mut evade = EvadeState::new(77);
        evade.arm();

        // Replay the candidate stream with an identical clone
        let mut probe = evade.clone();
        let applied = evade.dodge_from(from, &layout, 0.0).unwrap();

        let mut best = None;
        let mut best_score = -1.0_f32;
        for _ in 0..DODGE_CANDIDATES {
            let cand = probe.candidate(&layout).unwrap();
            let score = cand.distance(from);
            if score > best_score {
                best_score = score;
                best = Some(cand);
            }
        }
        assert_eq!(applied, best.unwrap());
    }

    #[test]
    fn test_cooldown_drops_second_dodge() {
        let layout = desktop_layout();
        let from = Vec2::new(660.0, 424.0);
        let mut evade = EvadeState::new(3);
        evade.arm();

        assert!(evade.dodge_from(from, &layout, 1000.0).is_some());
        let pinned = evade.override_center();
        // Within the cooldown window: dropped, override untouched
        assert!(evade.dodge_from(from, &layout, 1200.0).is_none());
        assert_eq!(evade.override_center(), pinned);
        // Window elapsed: dodges again
        assert!(evade.dodge_from(from, &layout, 1280.0).is_some());
    }

    #[test]
    fn test_click_dodges_regardless_of_distance() {
        let layout = desktop_layout();
        let mut evade = EvadeState::new(4);
        evade.arm();
        // The click path feeds the control's own center; no proximity gate
        let center = layout.control.center();
        assert!(evade.dodge_from(center, &layout, 0.0).is_some());
    }

    #[test]
    fn test_resize_clears_override_keeps_armed() {
        let layout = desktop_layout();
        let mut evade = EvadeState::new(5);
        evade.arm();
        evade.dodge_from(Vec2::new(660.0, 424.0), &layout, 0.0);
        assert!(evade.override_center().is_some());

        evade.on_resize();
        assert!(evade.override_center().is_none());
        assert!(evade.is_armed());
    }

    #[test]
    fn test_disarm_clears_override() {
        let layout = desktop_layout();
        let mut evade = EvadeState::new(6);
        evade.arm();
        evade.dodge_from(Vec2::new(660.0, 424.0), &layout, 0.0);
        evade.disarm();
        assert!(evade.override_center().is_none());
        assert!(!evade.is_armed());
    }

    #[test]
    fn test_unachievable_candidates_are_a_noop() {
        // Control wider than the whole viewport: no candidate can fit
        let layout = Layout {
            control: Rect::new(0.0, 0.0, 100.0, 40.0),
            anchor: Rect::new(0.0, 0.0, 60.0, 60.0),
            viewport: Vec2::new(60.0, 60.0),
        };
        let mut evade = EvadeState::new(7);
        evade.arm();
        assert!(evade.dodge_from(Vec2::new(30.0, 30.0), &layout, 0.0).is_none());
        assert!(evade.override_center().is_none());
        // The failed attempt must not start a cooldown
        assert!(!evade.cooldown_active(1.0));
    }

    #[test]
    fn test_mobile_end_to_end_scenario() {
        // 390x844 portrait viewport
        let layout = Layout {
            control: Rect::new(205.0, 500.0, 120.0, 48.0),
            anchor: Rect::new(40.0, 470.0, 310.0, 110.0),
            viewport: Vec2::new(390.0, 844.0),
        };
        let mut evade = EvadeState::new(2024);

        // Finger enters the question panel
        evade.arm();
        assert!(evade.is_armed());

        // Finger 50px left of the control's edge: exactly one dodge
        let touch = Vec2::new(205.0 - 50.0, 524.0);
        let center = evade
            .pointer_move(touch, &layout, 10_000.0)
            .expect("first approach dodges");
        let half_w = layout.control.width() / 2.0;
        let half_h = layout.control.height() / 2.0;
        assert!(center.x >= SAFE_MARGIN + half_w && center.x <= 390.0 - SAFE_MARGIN - half_w);
        assert!(center.y >= SAFE_MARGIN + half_h && center.y <= 844.0 - SAFE_MARGIN - half_h);

        // Finger chases within the cooldown window: no second dodge
        let control_now = Rect::new(
            center.x - half_w,
            center.y - half_h,
            layout.control.width(),
            layout.control.height(),
        );
        let chased = Layout {
            control: control_now,
            ..layout
        };
        let again = Vec2::new(control_now.left - 50.0, control_now.top + 10.0);
        assert!(evade.pointer_move(again, &chased, 10_150.0).is_none());
        assert_eq!(evade.override_center(), Some(center));
    }
}
