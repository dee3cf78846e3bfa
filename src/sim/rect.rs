//! Integer axis-aligned rectangles
//!
//! Boxes live on the integer pixel grid; actor positions are floats and get
//! truncated into a `Rect` before every collision test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement axis. Collision is resolved one axis at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// An axis-aligned rectangle, top-left origin, y pointing down
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

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_with_top_margin(other, 0)
    }

    /// Overlap test against `other` grown upward by `margin` pixels
    pub fn overlaps_with_top_margin(&self, other: &Rect, margin: i32) -> bool {
        let other_top = other.y - margin;
        !(self.bottom() <= other_top
            || self.y >= other.bottom()
            || self.right() <= other.x
            || self.x >= other.right())
    }

    /// Same rectangle shifted by `(dx, dy)`
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}
