//! Static mesh ingestion
//!
//! Converts the flat vertex and index buffers handed over by the asset layer
//! into collision [`Triangle`]s. Visual attributes never reach this module.

use glam::Vec3;
use thiserror::Error;

use crate::geometry::Triangle;

/// Primitive topology of an index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form one triangle
    List,
    /// Each index after the second forms a triangle with the previous two
    Strip,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("vertex buffer length {0} is not a multiple of 3")]
    RaggedPositions(usize),
    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("triangle list has {0} indices, expected a multiple of 3")]
    RaggedList(usize),
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}

/// Split a flat `[x, y, z, x, y, z, ...]` buffer into vertices
///
/// Every coordinate must be finite.
pub fn vertices_from_flat(positions: &[f32]) -> Result<Vec<Vec3>, MeshError> {
    if positions.len() % 3 != 0 {
        return Err(MeshError::RaggedPositions(positions.len()));
    }
    positions
        .chunks_exact(3)
        .enumerate()
        .map(|(i, p)| {
            let vertex = Vec3::new(p[0], p[1], p[2]);
            if vertex.is_finite() {
                Ok(vertex)
            } else {
                Err(MeshError::NonFiniteVertex(i))
            }
        })
        .collect()
}

/// Assemble triangles from vertices and an index buffer
///
/// Strip triangles alternate winding so every triangle faces the same way as
/// the first. Degenerate strip triangles (repeated indices used to stitch
/// rows) are kept; they never register a contact.
pub fn triangles_from_indexed(
    vertices: &[Vec3],
    indices: &[u32],
    topology: Topology,
) -> Result<Vec<Triangle>, MeshError> {
    let vertex = |index: u32| {
        vertices
            .get(index as usize)
            .copied()
            .ok_or(MeshError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            })
    };

    match topology {
        Topology::List => {
            if indices.len() % 3 != 0 {
                return Err(MeshError::RaggedList(indices.len()));
            }
            indices
                .chunks_exact(3)
                .map(|tri| -> Result<Triangle, MeshError> {
                    Ok(Triangle::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?))
                })
                .collect()
        }
        Topology::Strip => indices
            .windows(3)
            .enumerate()
            .map(|(i, tri)| -> Result<Triangle, MeshError> {
                let (a, b, c) = (vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?);
                Ok(if i % 2 == 0 {
                    Triangle::new(a, b, c)
                } else {
                    Triangle::new(b, a, c)
                })
            })
            .collect(),
    }
}

/// Convenience wrapper taking a flat position buffer
pub fn triangles_from_flat(
    positions: &[f32],
    indices: &[u32],
    topology: Topology,
) -> Result<Vec<Triangle>, MeshError> {
    let vertices = vertices_from_flat(positions)?;
    triangles_from_indexed(&vertices, indices, topology)
}

/// Strip indices covering a row-major grid of `columns` x `rows` vertices
///
/// Rows are stitched by repeating the last index of one row and the first
/// index of the next, which keeps the winding parity of every row the same.
pub fn grid_strip_indices(columns: u32, rows: u32) -> Vec<u32> {
    if columns < 2 || rows < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(((rows - 1) * (2 * columns + 2)) as usize);
    for row in 0..rows - 1 {
        if row > 0 {
            indices.push(row * columns + columns - 1);
            indices.push(row * columns);
        }
        for column in 0..columns {
            indices.push(row * columns + column);
            indices.push((row + 1) * columns + column);
        }
    }
    indices
}
