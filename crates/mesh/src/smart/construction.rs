//! Conversion between SmartMesh and the flat IndexedMesh format.

use glam::{Vec2, Vec3};

use super::types::{BoundaryTag, MeshError, Triangle, TriangleId, Vertex, VertexId};
use super::SmartMesh;
use crate::indexed::IndexedMesh;

impl SmartMesh {
    /// Build a smart mesh from flat attribute arrays.
    ///
    /// One vertex per position; normals and uvs are matched index-for-index
    /// and default to zero where the arrays are shorter than `positions`.
    /// Every vertex starts [`BoundaryTag::Closed`] with order index 0.
    pub fn from_flat_mesh(
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        uvs: &[[f32; 2]],
        indices: &[u32],
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(indices.len()));
        }

        let vertex_count = positions.len();
        if let Some((k, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                triangle: k / 3,
                index,
                vertex_count,
            });
        }

        let mut vertices: Vec<Vertex> = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| Vertex {
                position: Vec3::from_array(*pos),
                normal: normals.get(i).map_or(Vec3::ZERO, |n| Vec3::from_array(*n)),
                uv: uvs.get(i).map_or(Vec2::ZERO, |u| Vec2::from_array(*u)),
                tag: BoundaryTag::Closed,
                order: 0,
                triangles: Vec::new(),
            })
            .collect();

        let triangles: Vec<Triangle> = indices
            .chunks_exact(3)
            .enumerate()
            .map(|(k, tri)| {
                let id = TriangleId(k as u32);
                for &i in tri {
                    let members = &mut vertices[i as usize].triangles;
                    if !members.contains(&id) {
                        members.push(id);
                    }
                }
                Triangle::new(VertexId(tri[0]), VertexId(tri[1]), VertexId(tri[2]))
            })
            .collect();

        tracing::trace!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "Imported flat mesh"
        );

        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Build a smart mesh from an [`IndexedMesh`]. Vertex colors are dropped.
    pub fn from_indexed(mesh: &IndexedMesh) -> Result<Self, MeshError> {
        Self::from_flat_mesh(&mesh.positions, &mesh.normals, &mesh.uvs, &mesh.indices)
    }

    /// Export to flat arrays.
    ///
    /// Vertices and triangles keep their order, so indices round-trip
    /// exactly. Normals and uvs that were never set export as zero.
    pub fn to_indexed(&self) -> IndexedMesh {
        let mut mesh = IndexedMesh {
            positions: Vec::with_capacity(self.vertices.len()),
            normals: Vec::with_capacity(self.vertices.len()),
            uvs: Vec::with_capacity(self.vertices.len()),
            colors: Vec::new(),
            indices: Vec::with_capacity(self.triangles.len() * 3),
        };

        for v in &self.vertices {
            mesh.positions.push(v.position.to_array());
            mesh.normals.push(v.normal.to_array());
            mesh.uvs.push(v.uv.to_array());
        }
        for tri in &self.triangles {
            mesh.indices.extend(tri.indices.iter().map(|i| i.0));
        }

        mesh
    }
}
