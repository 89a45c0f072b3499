//! Axis-aligned bounding box geometry
//!
//! Everything in the level collides as an AABB: the player, obstacles,
//! collectibles. The overlap rectangle (max of mins, min of maxes) drives
//! minimum-axis collision resolution in the physics controller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box. `x`/`y` is the top-left corner (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box for a player anchored at the feet midpoint `pos`
    pub fn from_feet(pos: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: pos.x - w / 2.0,
            y: pos.y - h,
            w,
            h,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Overlap rectangle of two boxes, if they intersect
    pub fn overlap(&self, other: &Aabb) -> Option<Aabb> {
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if min.x < max.x && min.y < max.y {
            Some(Aabb::new(min.x, min.y, max.x - min.x, max.y - min.y))
        } else {
            None
        }
    }

    /// Whether an x coordinate falls inside the horizontal span
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.w
    }
}
