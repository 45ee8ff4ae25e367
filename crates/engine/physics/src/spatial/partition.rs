//! Region subdivision schemes
//!
//! A [`Partition`] decides how a node's region splits into children and
//! which points and triangles a region accepts. [`Octants`] splits cubes
//! into eight; [`Quadrants`] collapses the vertical axis and splits
//! infinite-height columns into four.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Region, Triangle};

/// How a triangle is matched against a child region during insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrianglePlacement {
    /// A child accepts the triangle if it contains at least one vertex
    #[default]
    Vertex,
    /// A child accepts the triangle if it overlaps the triangle's bounding box
    Bounds,
}

/// Subdivision scheme for a spatial index
pub trait Partition {
    /// Number of children created by one subdivision
    const CHILD_COUNT: usize;

    /// Human readable name used in logs
    const NAME: &'static str;

    /// Inclusive point containment
    fn contains(region: &Region, point: Vec3) -> bool;

    /// Inclusive bounding-box overlap
    fn overlaps(region: &Region, bounds: &Aabb) -> bool;

    /// The `index`-th child region, `index < CHILD_COUNT`
    fn child_region(region: &Region, index: usize) -> Region;

    /// Whether a region should receive a triangle
    fn accepts(region: &Region, triangle: &Triangle, placement: TrianglePlacement) -> bool {
        match placement {
            TrianglePlacement::Vertex => triangle
                .vertices()
                .iter()
                .any(|&vertex| Self::contains(region, vertex)),
            TrianglePlacement::Bounds => Self::overlaps(region, &triangle.bounds()),
        }
    }
}

/// Octree subdivision: eight equal cubes
///
/// Child indices follow the octant bit layout x=0b100, y=0b010, z=0b001,
/// a set bit selecting the positive half of that axis:
/// 0=(x-,y-,z-) 1=(x-,y-,z+) 2=(x-,y+,z-) 3=(x-,y+,z+)
/// 4=(x+,y-,z-) 5=(x+,y-,z+) 6=(x+,y+,z-) 7=(x+,y+,z+)
#[derive(Debug, Clone, Copy, Default)]
pub struct Octants;

impl Partition for Octants {
    const CHILD_COUNT: usize = 8;
    const NAME: &'static str = "octree";

    fn contains(region: &Region, point: Vec3) -> bool {
        region.contains(point)
    }

    fn overlaps(region: &Region, bounds: &Aabb) -> bool {
        region.aabb().intersects(bounds)
    }

    fn child_region(region: &Region, index: usize) -> Region {
        let sign = |bit: usize| if index & bit != 0 { 1.0 } else { -1.0 };
        region.child(Vec3::new(sign(0b100), sign(0b010), sign(0b001)))
    }
}

/// Quadtree subdivision over X/Z: four equal columns of unbounded height
///
/// Child indices use x=0b10, z=0b01: 0=(x-,z-) 1=(x-,z+) 2=(x+,z-) 3=(x+,z+).
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadrants;

impl Partition for Quadrants {
    const CHILD_COUNT: usize = 4;
    const NAME: &'static str = "quadtree";

    fn contains(region: &Region, point: Vec3) -> bool {
        region.contains_xz(point)
    }

    fn overlaps(region: &Region, bounds: &Aabb) -> bool {
        region.aabb().intersects_xz(bounds)
    }

    fn child_region(region: &Region, index: usize) -> Region {
        let sign = |bit: usize| if index & bit != 0 { 1.0 } else { -1.0 };
        region.child(Vec3::new(sign(0b10), 0.0, sign(0b01)))
    }
}
