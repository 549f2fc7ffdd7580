//! Axis-aligned rectangle math shared by every entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer screen-space rectangle (x/y top-left, width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test: rectangles that merely touch edges do not
    /// collide. Symmetric in its arguments.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(100, 100, 64, 64);
        let b = Rect::new(130, 130, 64, 64);
        assert!(a.overlaps(&b));

        let far = Rect::new(300, 300, 30, 30);
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_edge_touch_is_not_collision() {
        let sub = Rect::new(100, 200, 64, 64);
        // Left edge exactly on the submarine's right edge
        let touching = Rect::new(164, 200, 32, 32);
        assert!(!sub.overlaps(&touching));
        // One pixel of actual overlap
        let overlapping = Rect::new(163, 200, 32, 32);
        assert!(sub.overlaps(&overlapping));
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 10, 10);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(10, 20, 40, 60);
        let c = r.center();
        assert_eq!(c.x, 30.0);
        assert_eq!(c.y, 50.0);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -200i32..900, ay in -200i32..700, aw in 1i32..200, ah in 1i32..200,
            bx in -200i32..900, by in -200i32..700, bw in 1i32..200, bh in 1i32..200,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn shared_edge_never_overlaps(
            x in -200i32..900, y in -200i32..700, w in 1i32..200, h in 1i32..200,
            bw in 1i32..200, bh in 1i32..200, dy in -100i32..100,
        ) {
            let a = Rect::new(x, y, w, h);
            // b starts exactly where a ends horizontally
            let b = Rect::new(x + w, y + dy, bw, bh);
            prop_assert!(!a.overlaps(&b));
        }
    }
}
