//! Movement collision against a static triangle world
//!
//! The pieces, from the bottom up:
//!
//! - [`geometry`]: triangles, bounding boxes and index regions
//! - [`intersect`]: the segment/triangle crossing test
//! - [`spatial`]: octree and quadtree indexes over world triangles
//! - [`mesh`]: building triangles from vertex and index buffers
//! - [`resolver`]: the per-tick movement integrator
//!
//! The index is built once from the world mesh and then only read. Agent
//! state is owned by the session and passed to the resolver each tick.

pub mod agent;
pub mod config;
pub mod geometry;
pub mod intersect;
pub mod mesh;
pub mod resolver;
pub mod spatial;

pub use agent::Agent;
pub use config::{
    AgentConfig, ConfigError, ContactPolicy, IndexConfig, MovementConfig, PartitionKind,
    SpawnConfig, WalkaboutConfig,
};
pub use geometry::{Aabb, Region, Triangle};
pub use intersect::{segment_triangle, SegmentHit};
pub use mesh::{
    grid_strip_indices, triangles_from_flat, triangles_from_indexed, MeshError, Topology,
};
pub use resolver::{MovementResolver, TickReport};
pub use spatial::{
    IndexParams, IndexStats, Octants, Octree, Partition, Quadrants, Quadtree, SpatialIndex,
    TriangleId, TrianglePlacement,
};

// Re-export for convenience
pub use glam;
