//! Procedural testbed world
//!
//! A gently rolling terrain patch, delivered as a flat position buffer and a
//! stitched triangle strip like a decoded model would be, fenced in by four
//! walls built from unit-wide quads.

use glam::Vec3;
use walkabout_physics::{grid_strip_indices, triangles_from_flat, MeshError, Topology, Triangle};

/// Vertices per terrain row and column
pub const TERRAIN_SIZE: u32 = 33;

/// Distance from the origin to each wall
pub const FENCE: f32 = 12.0;

/// Height of the walls above y = 0
pub const WALL_HEIGHT: f32 = 4.0;

/// Terrain surface height, always within [0.75, 1.25]
pub fn terrain_height(x: f32, z: f32) -> f32 {
    1.0 + 0.25 * (x * 0.5).sin() * (z * 0.4).cos()
}

/// Row-major `[x, y, z, ...]` buffer for the terrain grid, centered on the origin
pub fn terrain_positions() -> Vec<f32> {
    let offset = (TERRAIN_SIZE - 1) as f32 / 2.0;
    let mut positions = Vec::with_capacity((TERRAIN_SIZE * TERRAIN_SIZE * 3) as usize);
    for row in 0..TERRAIN_SIZE {
        for column in 0..TERRAIN_SIZE {
            let x = column as f32 - offset;
            let z = row as f32 - offset;
            positions.extend_from_slice(&[x, terrain_height(x, z), z]);
        }
    }
    positions
}

pub fn terrain() -> Result<Vec<Triangle>, MeshError> {
    triangles_from_flat(
        &terrain_positions(),
        &grid_strip_indices(TERRAIN_SIZE, TERRAIN_SIZE),
        Topology::Strip,
    )
}

/// Vertical wall from `from` to `to` on the ground plane, one quad per unit
fn wall(from: Vec3, to: Vec3) -> Vec<Triangle> {
    let up = Vec3::Y * WALL_HEIGHT;
    let segments = (to - from).length().round().max(1.0) as usize;
    let step = (to - from) / segments as f32;

    (0..segments)
        .flat_map(|i| {
            let p0 = from + step * i as f32;
            let p1 = p0 + step;
            [
                Triangle::new(p0, p1, p0 + up),
                Triangle::new(p1, p1 + up, p0 + up),
            ]
        })
        .collect()
}

/// The four walls around the terrain
pub fn fence() -> Vec<Triangle> {
    let corners = [
        Vec3::new(-FENCE, 0.0, -FENCE),
        Vec3::new(FENCE, 0.0, -FENCE),
        Vec3::new(FENCE, 0.0, FENCE),
        Vec3::new(-FENCE, 0.0, FENCE),
    ];
    (0..corners.len())
        .flat_map(|i| wall(corners[i], corners[(i + 1) % corners.len()]))
        .collect()
}

/// Terrain followed by the fence
pub fn build_world() -> Result<Vec<Triangle>, MeshError> {
    let mut triangles = terrain()?;
    triangles.extend(fence());
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_buffer_shape() {
        let positions = terrain_positions();
        assert_eq!(positions.len(), (TERRAIN_SIZE * TERRAIN_SIZE * 3) as usize);
        assert_eq!(&positions[..3], &[-16.0, terrain_height(-16.0, -16.0), -16.0]);
    }

    #[test]
    fn test_fence_is_closed() {
        let fence = fence();
        // 24 unit quads per side
        assert_eq!(fence.len(), 4 * 24 * 2);
        for triangle in &fence {
            for v in triangle.vertices() {
                assert!(v.x.abs() <= FENCE && v.z.abs() <= FENCE);
                assert!(v.x.abs() == FENCE || v.z.abs() == FENCE);
            }
        }
    }

    #[test]
    fn test_world_contains_terrain_and_fence() {
        let world = build_world().unwrap();
        let terrain = terrain().unwrap();
        assert_eq!(world.len(), terrain.len() + fence().len());
        assert!(terrain
            .iter()
            .flat_map(|t| t.vertices())
            .all(|v| (0.75..=1.25).contains(&v.y)));
    }
}
