//! Viewport-space rectangle geometry
//!
//! The evasion engine measures pointer proximity against the decline
//! control's whole rectangle, not its center, so wide controls are as hard
//! to approach from the side as from a corner.

use glam::Vec2;

/// An axis-aligned rectangle in viewport coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Check if a point lies inside (or on the edge of) the rectangle
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Distance from a point to a rectangle.
///
/// Zero inside the rectangle, otherwise the Euclidean distance to the
/// nearest edge or corner.
#[inline]
pub fn distance_to_rect(p: Vec2, rect: &Rect) -> f32 {
    let dx = (rect.left - p.x).max(p.x - rect.right).max(0.0);
    let dy = (rect.top - p.y).max(p.y - rect.bottom).max(0.0);
    Vec2::new(dx, dy).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_inside() {
        let rect = Rect::new(10.0, 10.0, 100.0, 40.0);
        assert_eq!(distance_to_rect(Vec2::new(50.0, 30.0), &rect), 0.0);
        // On the edge counts as inside
        assert_eq!(distance_to_rect(Vec2::new(10.0, 30.0), &rect), 0.0);
        assert_eq!(distance_to_rect(Vec2::new(110.0, 50.0), &rect), 0.0);
    }

    #[test]
    fn test_distance_to_nearest_edge() {
        let rect = Rect::new(10.0, 10.0, 100.0, 40.0);
        // Straight left of the rectangle: horizontal distance only
        assert_eq!(distance_to_rect(Vec2::new(0.0, 30.0), &rect), 10.0);
        // Straight below: vertical distance only
        assert_eq!(distance_to_rect(Vec2::new(60.0, 80.0), &rect), 30.0);
    }

    #[test]
    fn test_distance_to_corner() {
        let rect = Rect::new(10.0, 10.0, 100.0, 40.0);
        // 3-4-5 triangle off the top-left corner
        let d = distance_to_rect(Vec2::new(7.0, 6.0), &rect);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_accessors() {
        let rect = Rect::new(5.0, 10.0, 20.0, 30.0);
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 30.0);
        assert_eq!(rect.center(), Vec2::new(15.0, 25.0));
        assert!(rect.contains(Vec2::new(15.0, 25.0)));
        assert!(!rect.contains(Vec2::new(4.0, 25.0)));
    }
}
