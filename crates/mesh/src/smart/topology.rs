//! Boundary and adjacency queries for SmartMesh.

use glam::Vec3;

use super::types::{BoundaryTag, TriangleId, VertexId};
use super::SmartMesh;

impl SmartMesh {
    // ========================================================================
    // Boundary Queries
    // ========================================================================

    /// Open vertices in ring order (ascending order index, ties by id).
    ///
    /// The ring is cyclic: the successor of entry `k` is entry
    /// `(k + 1) % len`.
    pub fn open_ring(&self) -> Vec<VertexId> {
        let mut ring: Vec<VertexId> = self
            .vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.tag == BoundaryTag::Open)
            .map(|(i, _)| VertexId(i as u32))
            .collect();
        ring.sort_by_key(|id| (self.vertices[id.0 as usize].order, *id));
        ring
    }

    pub fn open_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_open()).count()
    }

    pub fn closed_count(&self) -> usize {
        self.vertices.len() - self.open_count()
    }

    /// Centroid of the open ring, or `None` if nothing is open.
    pub fn open_centroid(&self) -> Option<Vec3> {
        let (sum, count) = self
            .vertices
            .iter()
            .filter(|v| v.is_open())
            .fold((Vec3::ZERO, 0usize), |(s, n), v| (s + v.position, n + 1));
        (count > 0).then(|| sum / count as f32)
    }

    // ========================================================================
    // Adjacency Queries
    // ========================================================================

    /// Triangles using a vertex (empty for an unknown id).
    pub fn vertex_triangles(&self, id: VertexId) -> &[TriangleId] {
        self.vertex(id).map_or(&[], |v| v.triangles.as_slice())
    }

    /// Vertices sharing a triangle with `id`, sorted and deduplicated.
    pub fn vertex_neighbors(&self, id: VertexId) -> Vec<VertexId> {
        let mut neighbors: Vec<VertexId> = self
            .vertex_triangles(id)
            .iter()
            .filter_map(|t| self.triangle(*t))
            .flat_map(|tri| tri.indices)
            .filter(|v| *v != id)
            .collect();
        neighbors.sort();
        neighbors.dedup();
        neighbors
    }

    /// Unnormalized face normal (length = twice the triangle area).
    pub fn triangle_area_normal(&self, id: TriangleId) -> Vec3 {
        let Some(tri) = self.triangle(id) else {
            return Vec3::ZERO;
        };
        let [a, b, c] = tri.indices.map(|i| self.vertices[i.0 as usize].position);
        (b - a).cross(c - a)
    }

    /// Recompute vertex normals from their triangle membership lists.
    ///
    /// Each normal is the normalized, area-weighted sum of adjacent face
    /// normals. Vertices without triangles, or whose faces cancel out, keep
    /// their previous normal.
    pub fn recompute_normals(&mut self) {
        let face_normals: Vec<Vec3> = (0..self.triangles.len())
            .map(|t| self.triangle_area_normal(TriangleId(t as u32)))
            .collect();

        for v in &mut self.vertices {
            let sum: Vec3 = v.triangles.iter().map(|t| face_normals[t.0 as usize]).sum();
            let n = sum.normalize_or_zero();
            if n != Vec3::ZERO {
                v.normal = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{Triangle, Vertex};
    use super::*;
    use glam::Vec2;

    fn ring(n: u32) -> SmartMesh {
        let mut mesh = SmartMesh::new();
        // Inserted in reverse to exercise sorting by order index
        for k in (0..n).rev() {
            let angle = k as f32 / n as f32 * std::f32::consts::TAU;
            let p = Vec3::new(angle.cos(), 0.0, angle.sin());
            mesh.add_vertex(Vertex::ring(p, p, Vec2::ZERO, k));
        }
        mesh
    }

    #[test]
    fn test_open_ring_sorted_by_order() {
        let mesh = ring(5);
        let orders: Vec<u32> = mesh
            .open_ring()
            .iter()
            .map(|id| mesh.vertex(*id).unwrap().order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_open_ring_skips_closed() {
        let mut mesh = ring(4);
        mesh.set_tag(VertexId(0), BoundaryTag::Closed);
        assert_eq!(mesh.open_ring().len(), 3);
        assert_eq!(mesh.open_count(), 3);
        assert_eq!(mesh.closed_count(), 1);
    }

    #[test]
    fn test_open_centroid() {
        let mesh = ring(8);
        let c = mesh.open_centroid().unwrap();
        assert!(c.length() < 1e-5);
        assert!(SmartMesh::new().open_centroid().is_none());
    }

    #[test]
    fn test_neighbors_and_normals() {
        let mut mesh = SmartMesh::new();
        let a = mesh.add_vertex(Vertex::at(Vec3::ZERO));
        let b = mesh.add_vertex(Vertex::at(Vec3::X));
        let c = mesh.add_vertex(Vertex::at(Vec3::Y));
        let lonely = mesh.add_vertex(Vertex::at(Vec3::Z));
        mesh.add_triangle(Triangle::new(a, b, c)).unwrap();

        assert_eq!(mesh.vertex_neighbors(a), vec![b, c]);
        assert!(mesh.vertex_neighbors(lonely).is_empty());

        mesh.recompute_normals();
        assert!((mesh.vertex(a).unwrap().normal - Vec3::Z).length() < 1e-6);
        assert_eq!(mesh.vertex(lonely).unwrap().normal, Vec3::ZERO);
    }
}
