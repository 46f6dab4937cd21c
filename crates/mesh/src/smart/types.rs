//! Type definitions for the smart mesh data structure.

use glam::{Vec2, Vec3};

/// Type-safe vertex identifier, local to the owning [`super::SmartMesh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Type-safe triangle identifier, local to the owning [`super::SmartMesh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(pub u32);

impl VertexId {
    /// Shift this id by a merge offset.
    pub fn offset(self, by: u32) -> Self {
        Self(self.0 + by)
    }
}

/// Whether a vertex still sits on an un-joined cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryTag {
    /// Part of the frontier ring; eligible for the next stitch
    Open,
    /// Interior, or never part of a ring
    #[default]
    Closed,
}

/// Triangle classification. Only `Normal` is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangleKind {
    #[default]
    Normal,
}

/// A vertex in the smart mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Unit normal, or zero if never set
    pub normal: Vec3,
    pub uv: Vec2,
    pub tag: BoundaryTag,
    /// Position within the ring this vertex was generated in
    pub order: u32,
    /// Triangles that reference this vertex, in insertion order
    pub triangles: Vec<TriangleId>,
}

impl Vertex {
    /// A closed vertex with zero normal and uv.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            uv: Vec2::ZERO,
            tag: BoundaryTag::Closed,
            order: 0,
            triangles: Vec::new(),
        }
    }

    /// An open ring vertex at `order` within its ring.
    pub fn ring(position: Vec3, normal: Vec3, uv: Vec2, order: u32) -> Self {
        Self {
            position,
            normal,
            uv,
            tag: BoundaryTag::Open,
            order,
            triangles: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.tag == BoundaryTag::Open
    }
}

/// A triangle in the smart mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Counter-clockwise when viewed from outside
    pub indices: [VertexId; 3],
    pub kind: TriangleKind,
}

impl Triangle {
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Self {
            indices: [a, b, c],
            kind: TriangleKind::Normal,
        }
    }
}

/// Errors that can occur while building or importing a smart mesh
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),
    #[error("Triangle {triangle} references vertex {index}, but mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}
