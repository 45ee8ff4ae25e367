//! Spatial index over static world triangles
//!
//! A region-subdivision tree built once when the world mesh is available and
//! queried every tick for triangles near a point. Triangles live in a flat
//! arena; nodes hold [`TriangleId`]s into it. A triangle that straddles a
//! region boundary is referenced by every child that accepts it, so a query
//! may report the same id more than once. Callers that care deduplicate.
//!
//! # Usage
//!
//! ```
//! use walkabout_physics::spatial::Octree;
//! use walkabout_physics::Triangle;
//! use glam::Vec3;
//!
//! let mut index = Octree::build(Vec3::ZERO, 16.0, 8, 4);
//! index.insert(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z));
//!
//! assert_eq!(index.query(Vec3::new(0.5, 0.0, 0.0)).len(), 1);
//! assert!(index.query(Vec3::splat(100.0)).is_empty());
//! ```

mod partition;

pub use partition::{Octants, Partition, Quadrants, TrianglePlacement};

use glam::Vec3;
use std::marker::PhantomData;

use crate::geometry::{Region, Triangle};

/// Octree over world triangles
pub type Octree = SpatialIndex<Octants>;

/// Height-collapsed quadtree over world triangles
pub type Quadtree = SpatialIndex<Quadrants>;

/// Identifies a triangle in the index arena
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TriangleId(u32);

impl TriangleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Construction parameters, fixed for the lifetime of an index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexParams {
    /// Center of the root region
    pub center: Vec3,
    /// Half-extent of the root region
    pub half_extent: f32,
    /// Triangles a leaf holds before it subdivides
    pub max_triangles: usize,
    /// Number of tree levels; nodes on the last level never subdivide
    pub max_depth: u32,
    /// Child acceptance rule used during insertion
    pub placement: TrianglePlacement,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            half_extent: 512.0,
            max_triangles: 512,
            max_depth: 8,
            placement: TrianglePlacement::Vertex,
        }
    }
}

/// Shape summary of a built index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Distinct triangles inserted
    pub triangles: usize,
    /// Total nodes including the root
    pub nodes: usize,
    /// Nodes without children
    pub leaves: usize,
    /// Deepest node level (root is 0)
    pub deepest: u32,
    /// Triangle references held across all nodes, counting replicas
    pub stored: usize,
}

#[derive(Debug, Clone)]
struct Node {
    region: Region,
    depth: u32,
    triangles: Vec<TriangleId>,
    children: Vec<Node>,
}

impl Node {
    fn new(region: Region, depth: u32) -> Self {
        Self {
            region,
            depth,
            triangles: Vec::new(),
            children: Vec::new(),
        }
    }

    fn at_depth_limit(&self, params: &IndexParams) -> bool {
        self.depth + 1 >= params.max_depth
    }

    fn insert<P: Partition>(&mut self, id: TriangleId, arena: &[Triangle], params: &IndexParams) {
        let is_leaf = self.children.is_empty();
        if (is_leaf && self.triangles.len() < params.max_triangles) || self.at_depth_limit(params) {
            self.triangles.push(id);
            return;
        }

        if is_leaf {
            self.subdivide::<P>(arena, params);
        }

        self.forward::<P>(id, arena, params);
    }

    fn forward<P: Partition>(&mut self, id: TriangleId, arena: &[Triangle], params: &IndexParams) {
        let triangle = &arena[id.index()];
        for child in &mut self.children {
            if P::accepts(&child.region, triangle, params.placement) {
                child.insert::<P>(id, arena, params);
            }
        }
    }

    fn subdivide<P: Partition>(&mut self, arena: &[Triangle], params: &IndexParams) {
        self.children = (0..P::CHILD_COUNT)
            .map(|i| Node::new(P::child_region(&self.region, i), self.depth + 1))
            .collect();

        for id in std::mem::take(&mut self.triangles) {
            self.forward::<P>(id, arena, params);
        }
    }

    fn collect<P: Partition>(&self, point: Vec3, out: &mut Vec<TriangleId>) {
        if !P::contains(&self.region, point) {
            return;
        }

        out.extend_from_slice(&self.triangles);
        for child in &self.children {
            child.collect::<P>(point, out);
        }
    }

    fn accumulate(&self, stats: &mut IndexStats) {
        stats.nodes += 1;
        stats.deepest = stats.deepest.max(self.depth);
        stats.stored += self.triangles.len();
        if self.children.is_empty() {
            stats.leaves += 1;
        }
        for child in &self.children {
            child.accumulate(stats);
        }
    }
}

/// Region-subdivision tree over static triangles
#[derive(Debug, Clone)]
pub struct SpatialIndex<P = Octants> {
    params: IndexParams,
    triangles: Vec<Triangle>,
    root: Node,
    _partition: PhantomData<P>,
}

impl<P: Partition> SpatialIndex<P> {
    /// Create an empty index covering the cube (or column) around `center`
    pub fn build(center: Vec3, half_extent: f32, max_triangles: usize, max_depth: u32) -> Self {
        Self::from_params(IndexParams {
            center,
            half_extent,
            max_triangles,
            max_depth,
            ..IndexParams::default()
        })
    }

    /// Create an empty index from explicit parameters
    pub fn from_params(params: IndexParams) -> Self {
        Self {
            params,
            triangles: Vec::new(),
            root: Node::new(Region::new(params.center, params.half_extent), 0),
            _partition: PhantomData,
        }
    }

    /// Create an index and insert every triangle from a static mesh
    pub fn from_triangles<I>(params: IndexParams, triangles: I) -> Self
    where
        I: IntoIterator<Item = Triangle>,
    {
        let mut index = Self::from_params(params);
        index.extend(triangles);

        let stats = index.stats();
        tracing::info!(
            partition = P::NAME,
            triangles = stats.triangles,
            nodes = stats.nodes,
            leaves = stats.leaves,
            deepest = stats.deepest,
            stored = stats.stored,
            "Spatial index built"
        );
        index
    }

    /// Insert one triangle
    ///
    /// Triangles whose placement test fails for every region they reach are
    /// kept in the arena but never returned by a query.
    pub fn insert(&mut self, triangle: Triangle) -> TriangleId {
        let id = TriangleId(self.triangles.len() as u32);
        self.triangles.push(triangle);
        self.root.insert::<P>(id, &self.triangles, &self.params);
        id
    }

    /// Insert every triangle from an iterator
    pub fn extend<I>(&mut self, triangles: I)
    where
        I: IntoIterator<Item = Triangle>,
    {
        for triangle in triangles {
            self.insert(triangle);
        }
    }

    /// Ids of the candidate triangles near `point`
    ///
    /// Empty when `point` lies outside the root region. Ids appear in tree
    /// order and may repeat.
    pub fn query_ids(&self, point: Vec3) -> Vec<TriangleId> {
        let mut out = Vec::new();
        self.root.collect::<P>(point, &mut out);
        out
    }

    /// Candidate triangles near `point`, with the same order and repeats as
    /// [`query_ids`](Self::query_ids)
    pub fn query(&self, point: Vec3) -> Vec<&Triangle> {
        self.query_ids(point)
            .into_iter()
            .map(|id| &self.triangles[id.index()])
            .collect()
    }

    /// Look up an inserted triangle
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Whether `point` lies inside the root region
    pub fn contains(&self, point: Vec3) -> bool {
        P::contains(&self.root.region, point)
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Walk the tree and summarize its shape
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            triangles: self.triangles.len(),
            ..IndexStats::default()
        };
        self.root.accumulate(&mut stats);
        stats
    }
}
