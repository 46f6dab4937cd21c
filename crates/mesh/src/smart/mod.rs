//! Editable mesh with per-vertex adjacency and boundary tags.
//!
//! A [`SmartMesh`] is an arena of vertices and triangles addressed by integer
//! handles. Every triangle index is local to the mesh that owns it; the only
//! way two meshes are combined is [`SmartMesh::merge`], which renumbers the
//! incoming triangles by the base mesh's vertex count.

mod construction;
mod topology;
mod types;
mod validation;

use glam::{Affine3A, Vec3};

pub use types::{BoundaryTag, MeshError, Triangle, TriangleId, TriangleKind, Vertex, VertexId};
pub use validation::ValidationError;

/// Indexed mesh with boundary tags and triangle membership lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmartMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<Triangle>,
}

impl SmartMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0 as usize)
    }

    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.0 as usize)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Append a vertex. Any triangle membership it carries is discarded.
    pub fn add_vertex(&mut self, mut vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        vertex.triangles.clear();
        self.vertices.push(vertex);
        id
    }

    /// Append a triangle and register it with its three vertices.
    pub fn add_triangle(&mut self, triangle: Triangle) -> Result<TriangleId, MeshError> {
        let vertex_count = self.vertices.len();
        for index in triangle.indices {
            if index.0 as usize >= vertex_count {
                return Err(MeshError::IndexOutOfRange {
                    triangle: self.triangles.len(),
                    index: index.0,
                    vertex_count,
                });
            }
        }

        let id = TriangleId(self.triangles.len() as u32);
        self.register_membership(id, &triangle);
        self.triangles.push(triangle);
        Ok(id)
    }

    /// Set the boundary tag of one vertex. Returns false for an unknown id.
    pub fn set_tag(&mut self, id: VertexId, tag: BoundaryTag) -> bool {
        match self.vertices.get_mut(id.0 as usize) {
            Some(v) => {
                v.tag = tag;
                true
            }
            None => false,
        }
    }

    /// Append a renumbered copy of `other` to this mesh.
    ///
    /// Triangle index `i` of `other` becomes `i + self.vertex_count()` (the
    /// count before the merge). Vertex and triangle order is preserved.
    /// Returns that offset so callers can translate ids they hold into
    /// `other`.
    pub fn merge(&mut self, other: SmartMesh) -> u32 {
        let vertex_offset = self.vertices.len() as u32;
        let triangle_offset = self.triangles.len() as u32;

        self.vertices.reserve(other.vertices.len());
        for mut v in other.vertices {
            for t in &mut v.triangles {
                t.0 += triangle_offset;
            }
            self.vertices.push(v);
        }

        self.triangles.reserve(other.triangles.len());
        for mut tri in other.triangles {
            for index in &mut tri.indices {
                *index = index.offset(vertex_offset);
            }
            self.triangles.push(tri);
        }

        vertex_offset
    }

    /// Apply a rigid/affine transform to positions and normals.
    pub fn transform(&mut self, transform: &Affine3A) {
        for v in &mut self.vertices {
            v.position = transform.transform_point3(v.position);
            if v.normal != Vec3::ZERO {
                v.normal = transform.transform_vector3(v.normal).normalize_or_zero();
            }
        }
    }

    fn register_membership(&mut self, id: TriangleId, triangle: &Triangle) {
        for index in triangle.indices {
            let members = &mut self.vertices[index.0 as usize].triangles;
            // Degenerate triangles may name the same vertex twice
            if !members.contains(&id) {
                members.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec2};
    use proptest::prelude::*;

    fn smart_mesh() -> impl Strategy<Value = SmartMesh> {
        (0usize..10).prop_flat_map(|n| {
            let positions = prop::collection::vec(prop::array::uniform3(-5.0f32..5.0), n);
            let triangles = if n == 0 {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec(prop::array::uniform3(0..n as u32), 0..12).boxed()
            };
            (positions, triangles).prop_map(|(positions, triangles)| {
                let indices: Vec<u32> = triangles.into_iter().flatten().collect();
                SmartMesh::from_flat_mesh(&positions, &[], &[], &indices).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn proptest_merge_index_law(mut base in smart_mesh(), other in smart_mesh()) {
            let a = base.vertex_count() as u32;
            let base_triangles = base.triangle_count();
            let expected: Vec<[u32; 3]> = other
                .triangles()
                .iter()
                .map(|t| t.indices.map(|v| v.0 + a))
                .collect();
            let (other_vertices, other_triangles) = (other.vertex_count(), other.triangle_count());

            let offset = base.merge(other);

            prop_assert_eq!(offset, a);
            prop_assert_eq!(base.vertex_count(), a as usize + other_vertices);
            prop_assert_eq!(base.triangle_count(), base_triangles + other_triangles);
            let merged: Vec<[u32; 3]> = base.triangles()[base_triangles..]
                .iter()
                .map(|t| t.indices.map(|v| v.0))
                .collect();
            prop_assert_eq!(merged, expected);
            prop_assert!(base.validate().is_ok());
        }
    }

    fn triangle_mesh() -> SmartMesh {
        let mut mesh = SmartMesh::new();
        let a = mesh.add_vertex(Vertex::at(Vec3::ZERO));
        let b = mesh.add_vertex(Vertex::at(Vec3::X));
        let c = mesh.add_vertex(Vertex::at(Vec3::Y));
        mesh.add_triangle(Triangle::new(a, b, c)).unwrap();
        mesh
    }

    #[test]
    fn test_add_triangle_tracks_membership() {
        let mesh = triangle_mesh();
        for v in mesh.vertices() {
            assert_eq!(v.triangles, vec![TriangleId(0)]);
        }
    }

    #[test]
    fn test_add_triangle_rejects_foreign_index() {
        let mut mesh = triangle_mesh();
        let err = mesh
            .add_triangle(Triangle::new(VertexId(0), VertexId(1), VertexId(7)))
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 1,
                index: 7,
                vertex_count: 3
            }
        );
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_merge_index_law() {
        let mut base = triangle_mesh();
        base.add_vertex(Vertex::at(Vec3::Z));
        let other = triangle_mesh();
        let other_triangles: Vec<_> = other.triangles().to_vec();

        let before_vertices = base.vertex_count();
        let before_triangles = base.triangle_count();
        let offset = base.merge(other);

        assert_eq!(offset, 4);
        assert_eq!(base.vertex_count(), before_vertices + 3);
        assert_eq!(base.triangle_count(), before_triangles + 1);
        for (k, tri) in other_triangles.iter().enumerate() {
            let merged = base.triangles()[before_triangles + k];
            for j in 0..3 {
                assert_eq!(merged.indices[j].0, tri.indices[j].0 + offset);
            }
        }
        assert!(base.validate().is_ok());
    }

    #[test]
    fn test_merge_rewrites_membership() {
        let mut base = triangle_mesh();
        base.merge(triangle_mesh());
        assert_eq!(base.vertices()[3].triangles, vec![TriangleId(1)]);
        assert!(base.validate().is_ok());
    }

    #[test]
    fn test_merge_preserves_tags_and_order() {
        let mut base = SmartMesh::new();
        let mut ring = SmartMesh::new();
        for k in 0..4 {
            ring.add_vertex(Vertex::ring(Vec3::X * k as f32, Vec3::X, Vec2::ZERO, k));
        }
        base.merge(ring);
        let orders: Vec<u32> = base.vertices().iter().map(|v| v.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
        assert!(base.vertices().iter().all(Vertex::is_open));
    }

    #[test]
    fn test_transform_rotates_normals() {
        let mut mesh = SmartMesh::new();
        mesh.add_vertex(Vertex::ring(Vec3::X, Vec3::X, Vec2::ZERO, 0));
        let t = Affine3A::from_rotation_translation(
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(0.0, 0.0, 1.0),
        );
        mesh.transform(&t);
        let v = &mesh.vertices()[0];
        assert!((v.position - Vec3::new(0.0, 1.0, 1.0)).length() < 1e-5);
        assert!((v.normal - Vec3::Y).length() < 1e-5);
    }
}
