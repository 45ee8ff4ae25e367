//! Line segment / triangle intersection
//!
//! The narrow phase of world collision. A segment is given as an origin `P`
//! and a displacement `D` and spans `[P, P + D]`.
//!
//! Denominators are compared against exactly zero and the parametric bounds
//! are strict. Near-parallel and near-degenerate cases therefore still report
//! contacts; adding a tolerance here changes which surfaces the agent can
//! touch. Bounds are written as accepted ranges so that a NaN anywhere in
//! the computation rejects the triangle.

use glam::Vec3;

use crate::geometry::Triangle;

/// Where a segment crossed a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Contact point on the triangle's surface
    pub point: Vec3,
    /// Position along the segment in [0, 1]; `point == origin + fraction * displacement`
    pub fraction: f32,
}

/// Intersect the segment `[origin, origin + displacement]` with a triangle
///
/// Returns `None` when the triangle is degenerate, the segment is parallel to
/// the triangle's plane, the plane crossing lies outside the segment, or the
/// crossing lies outside the triangle.
pub fn segment_triangle(origin: Vec3, displacement: Vec3, triangle: &Triangle) -> Option<SegmentHit> {
    let u = triangle.b - triangle.a;
    let v = triangle.c - triangle.a;
    let uu = u.dot(u);
    let vv = v.dot(v);
    let uv = u.dot(v);

    let discriminant = uv * uv - uu * vv;
    if discriminant == 0.0 {
        return None;
    }

    let normal = u.cross(v);
    let denom = normal.dot(displacement);
    if denom == 0.0 {
        return None;
    }

    let r = normal.dot(triangle.a - origin) / denom;
    if !(0.0..=1.0).contains(&r) {
        return None;
    }
    let point = origin + displacement * r;

    let w = point - triangle.a;
    let wu = w.dot(u);
    let wv = w.dot(v);
    let s = (uv * wv - vv * wu) / discriminant;
    let t = (uv * wu - uu * wv) / discriminant;
    if !(s >= 0.0 && t >= 0.0 && s + t <= 1.0) {
        return None;
    }

    Some(SegmentHit { point, fraction: r })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, -1.0),
        )
    }

    #[test]
    fn test_vertical_segment_hits_floor() {
        let hit = segment_triangle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0), &floor())
            .expect("segment crosses the floor");

        assert!((hit.point - Vec3::ZERO).length() < 1e-6);
        assert!((hit.fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_segment_on_one_side_misses() {
        let tri = floor();
        assert!(segment_triangle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -0.5, 0.0), &tri).is_none());
        assert!(segment_triangle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 3.0, 0.0), &tri).is_none());
    }

    #[test]
    fn test_zero_displacement_misses() {
        assert!(segment_triangle(Vec3::ZERO, Vec3::ZERO, &floor()).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let repeated = Triangle::new(Vec3::ZERO, Vec3::ZERO, Vec3::X);
        assert!(segment_triangle(Vec3::new(0.1, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0), &repeated).is_none());

        let colinear = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(segment_triangle(Vec3::new(0.5, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0), &colinear).is_none());
    }

    #[test]
    fn test_parallel_segment_misses() {
        assert!(segment_triangle(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), &floor()).is_none());
    }

    #[test]
    fn test_crossing_outside_triangle_misses() {
        assert!(segment_triangle(Vec3::new(1.5, 1.0, 1.5), Vec3::new(0.0, -2.0, 0.0), &floor()).is_none());
    }

    #[test]
    fn test_segment_ending_on_plane_hits() {
        let hit = segment_triangle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), &floor());
        assert_eq!(hit.map(|h| h.fraction), Some(1.0));

        let hit = segment_triangle(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0), &floor());
        assert_eq!(hit.map(|h| h.fraction), Some(0.0));
    }

    #[test]
    fn test_cyclic_relabeling_agrees() {
        let segments = [
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0)),
            (Vec3::new(0.2, 0.5, 0.3), Vec3::new(0.1, -1.0, 0.0)),
            (Vec3::new(1.8, 1.0, 1.8), Vec3::new(0.0, -2.0, 0.0)),
            (Vec3::new(-3.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0)),
            (Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
        ];
        let labels = [floor(), floor().rotated(), floor().rotated().rotated()];

        for (origin, displacement) in segments {
            let results: Vec<bool> = labels
                .iter()
                .map(|tri| segment_triangle(origin, displacement, tri).is_some())
                .collect();
            assert!(
                results.iter().all(|&r| r == results[0]),
                "relabeling changed the result for {:?} + {:?}: {:?}",
                origin,
                displacement,
                results
            );
        }
    }

    #[test]
    fn test_wall_hit_from_front() {
        let wall = Triangle::new(
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(0.0, 2.0, 1.0),
        );
        let hit = segment_triangle(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &wall).expect("hits wall");

        assert!((hit.point.z - 1.0).abs() < 1e-6);
        assert!((hit.fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_triangle_misses() {
        let nan_vertex = Triangle::new(
            Vec3::new(-5.0, -5.0, 1.0),
            Vec3::new(5.0, -5.0, 1.0),
            Vec3::new(0.0, f32::NAN, 1.0),
        );
        assert!(segment_triangle(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), &nan_vertex).is_none());

        let infinite_vertex = Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(f32::INFINITY, 0.0, -1.0),
        );
        assert!(
            segment_triangle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0), &infinite_vertex)
                .is_none()
        );
    }

    #[test]
    fn test_non_finite_segment_misses() {
        let origin = Vec3::new(0.0, f32::NAN, 0.0);
        assert!(segment_triangle(origin, Vec3::new(0.0, -2.0, 0.0), &floor()).is_none());
    }
}
