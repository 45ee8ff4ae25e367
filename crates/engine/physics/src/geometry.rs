//! Geometry primitives for world collision
//!
//! Plain glam-based value types: the static world [`Triangle`], the
//! axis-aligned [`Aabb`] used for triangle bounds, and the [`Region`] a
//! spatial index node is responsible for.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A static world triangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// The three vertices in order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Same triangle with vertices relabeled (A, B, C) -> (B, C, A)
    pub fn rotated(&self) -> Self {
        Self::new(self.b, self.c, self.a)
    }

    /// Unnormalized face normal, `(B - A) x (C - A)`
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Tight bounding box around the three vertices
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.a.min(self.b).min(self.c),
            self.a.max(self.b).max(self.c),
        )
    }

    /// Point at barycentric weights `s` (towards B) and `t` (towards C)
    pub fn point_at(&self, s: f32, t: f32) -> Vec3 {
        self.a + (self.b - self.a) * s + (self.c - self.a) * t
    }
}

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Test intersection with another AABB
    ///
    /// # Returns
    /// `true` if the AABBs overlap (including touching at edges/faces)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Same overlap test with the vertical axis ignored
    pub fn intersects_xz(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Check if a point is inside the AABB (boundary inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// The cube (or column) of space an index node is responsible for
///
/// Defined by its center and a half-extent shared by every axis. Whether the
/// vertical axis participates in containment is decided by the partition
/// scheme, not by the region itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub center: Vec3,
    pub half_extent: f32,
}

impl Region {
    pub fn new(center: Vec3, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - Vec3::splat(self.half_extent)
    }

    pub fn max(&self) -> Vec3 {
        self.center + Vec3::splat(self.half_extent)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.min(), self.max())
    }

    /// Inclusive containment on all three axes
    pub fn contains(&self, point: Vec3) -> bool {
        self.aabb().contains_point(point)
    }

    /// Inclusive containment on X and Z only
    pub fn contains_xz(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.z >= min.z && point.z <= max.z
    }

    /// Child region of half the extent, shifted by `sign` half-steps per axis
    ///
    /// Each component of `sign` is -1, 0 or 1.
    pub fn child(&self, sign: Vec3) -> Region {
        let half = self.half_extent / 2.0;
        Region::new(self.center + sign * half, half)
    }
}
