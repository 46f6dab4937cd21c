//! Consistency checks for SmartMesh.
//!
//! Verifies that:
//! - every triangle index is local to this mesh
//! - membership lists match the triangle list exactly
//! - open vertices form a ring with distinct order indices

use std::collections::HashSet;

use super::types::{TriangleId, VertexId};
use super::SmartMesh;

/// A violated structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Triangle {triangle:?} references missing vertex {vertex:?}")]
    DanglingIndex {
        triangle: TriangleId,
        vertex: VertexId,
    },
    #[error("Vertex {vertex:?} is missing membership for triangle {triangle:?}")]
    MissingMembership {
        vertex: VertexId,
        triangle: TriangleId,
    },
    #[error("Vertex {vertex:?} lists triangle {triangle:?}, which does not use it")]
    StaleMembership {
        vertex: VertexId,
        triangle: TriangleId,
    },
    #[error("Open vertices share order index {0}")]
    DuplicateRingOrder(u32),
}

impl SmartMesh {
    /// Check every structural invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let vertex_count = self.vertices.len();

        for (t, tri) in self.triangles.iter().enumerate() {
            let triangle = TriangleId(t as u32);
            for vertex in tri.indices {
                let Some(v) = self.vertices.get(vertex.0 as usize) else {
                    return Err(ValidationError::DanglingIndex { triangle, vertex });
                };
                if !v.triangles.contains(&triangle) {
                    return Err(ValidationError::MissingMembership { vertex, triangle });
                }
            }
        }

        for (i, v) in self.vertices.iter().enumerate() {
            let vertex = VertexId(i as u32);
            for &triangle in &v.triangles {
                let uses = self
                    .triangle(triangle)
                    .is_some_and(|tri| tri.indices.contains(&vertex));
                if !uses {
                    return Err(ValidationError::StaleMembership { vertex, triangle });
                }
            }
        }

        let mut orders = HashSet::with_capacity(vertex_count);
        for v in self.vertices.iter().filter(|v| v.is_open()) {
            if !orders.insert(v.order) {
                return Err(ValidationError::DuplicateRingOrder(v.order));
            }
        }

        Ok(())
    }
}
