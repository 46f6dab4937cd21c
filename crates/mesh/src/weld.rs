//! Vertex welding for composited meshes.
//!
//! Positionally coincident vertices (within `threshold`) are folded into the
//! first one encountered, using a cubic bucket grid so each vertex only
//! compares against its own and the 26 neighbouring buckets. Triangles that
//! collapse after remapping are dropped and normals are rebuilt from the
//! welded topology.

use std::collections::HashMap;

use glam::Vec3;

use crate::indexed::IndexedMesh;
use crate::smart::{MeshError, SmartMesh};

/// Welded mesh plus bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldResult {
    pub mesh: IndexedMesh,
    /// For each input vertex, its index in the welded mesh
    pub remap: Vec<u32>,
    /// Input vertices folded into an earlier one
    pub merged: usize,
    /// Triangles removed because two corners became the same vertex
    pub dropped_triangles: usize,
}

fn bucket_of(p: Vec3, step: f32) -> [i64; 3] {
    let q = (p / step).floor();
    [q.x as i64, q.y as i64, q.z as i64]
}

/// Weld vertices of `mesh` closer than `threshold`.
///
/// `bucket_step` is the grid cell size; it is raised to `threshold` if
/// smaller so the neighbour search stays exhaustive. Attributes of the first
/// vertex in each cluster are kept.
pub fn weld(mesh: &IndexedMesh, threshold: f32, bucket_step: f32) -> Result<WeldResult, MeshError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles(mesh.indices.len()));
    }
    let vertex_count = mesh.positions.len();
    if let Some((k, &index)) = mesh
        .indices
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

    let step = bucket_step.max(threshold).max(f32::EPSILON);
    let threshold_sq = threshold * threshold;

    let mut buckets: HashMap<[i64; 3], Vec<u32>> = HashMap::new();
    let mut kept: Vec<usize> = Vec::new();
    let mut remap: Vec<u32> = Vec::with_capacity(vertex_count);

    for (i, pos) in mesh.positions.iter().enumerate() {
        let p = Vec3::from_array(*pos);
        let [bx, by, bz] = bucket_of(p, step);

        let mut found: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = buckets.get(&[bx + dx, by + dy, bz + dz]) else {
                        continue;
                    };
                    for &c in candidates {
                        let q = Vec3::from_array(mesh.positions[kept[c as usize]]);
                        if p.distance_squared(q) < threshold_sq && found.is_none_or(|f| c < f) {
                            found = Some(c);
                        }
                    }
                }
            }
        }

        let target = match found {
            Some(c) => c,
            None => {
                let new_index = kept.len() as u32;
                kept.push(i);
                buckets.entry([bx, by, bz]).or_default().push(new_index);
                new_index
            }
        };
        remap.push(target);
    }

    let mut indices = Vec::with_capacity(mesh.indices.len());
    let mut dropped_triangles = 0;
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| remap[i as usize]);
        if a == b || b == c || a == c {
            dropped_triangles += 1;
        } else {
            indices.extend([a, b, c]);
        }
    }

    let pick = |attr: &[[f32; 3]]| -> Vec<[f32; 3]> {
        kept.iter().map(|&i| attr.get(i).copied().unwrap_or([0.0; 3])).collect()
    };
    let positions = pick(&mesh.positions);
    let uvs: Vec<[f32; 2]> = if mesh.uvs.is_empty() {
        Vec::new()
    } else {
        kept.iter()
            .map(|&i| mesh.uvs.get(i).copied().unwrap_or([0.0; 2]))
            .collect()
    };
    let colors: Vec<[f32; 4]> = if mesh.colors.is_empty() {
        Vec::new()
    } else {
        kept.iter()
            .map(|&i| mesh.colors.get(i).copied().unwrap_or([1.0; 4]))
            .collect()
    };

    let mut smart = SmartMesh::from_flat_mesh(&positions, &pick(&mesh.normals), &uvs, &indices)?;
    smart.recompute_normals();
    let mut welded = smart.to_indexed();
    if uvs.is_empty() {
        welded.uvs.clear();
    }
    welded.colors = colors;

    let merged = vertex_count - kept.len();
    tracing::debug!(
        merged,
        dropped_triangles,
        vertices = kept.len(),
        "Welded mesh"
    );

    Ok(WeldResult {
        mesh: welded,
        remap,
        merged,
        dropped_triangles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles sharing an edge, with the shared vertices duplicated.
    fn split_quad() -> IndexedMesh {
        IndexedMesh::from_flat(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![],
            vec![],
            vec![0, 1, 2, 3, 4, 5],
        )
    }

    #[test]
    fn test_weld_merges_duplicates() {
        let result = weld(&split_quad(), 1e-4, 0.01).unwrap();
        assert_eq!(result.merged, 2);
        assert_eq!(result.mesh.vertex_count(), 4);
        assert_eq!(result.remap, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(result.mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(result.dropped_triangles, 0);
    }

    #[test]
    fn test_weld_rebuilds_normals() {
        let result = weld(&split_quad(), 1e-4, 0.01).unwrap();
        for n in &result.mesh.normals {
            assert!((Vec3::from_array(*n) - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_weld_across_bucket_boundary() {
        // Points straddle a cell boundary at x = 0.01
        let mesh = IndexedMesh::from_flat(
            vec![[0.009_999, 0.0, 0.0], [0.010_001, 0.0, 0.0]],
            vec![],
            vec![],
            vec![],
        );
        let result = weld(&mesh, 1e-4, 0.01).unwrap();
        assert_eq!(result.mesh.vertex_count(), 1);
    }

    #[test]
    fn test_weld_drops_collapsed_triangles() {
        let mesh = IndexedMesh::from_flat(
            vec![[0.0, 0.0, 0.0], [0.0, 0.0, 0.000_01], [1.0, 0.0, 0.0]],
            vec![],
            vec![],
            vec![0, 1, 2],
        );
        let result = weld(&mesh, 1e-3, 0.01).unwrap();
        assert_eq!(result.dropped_triangles, 1);
        assert!(result.mesh.indices.is_empty());
    }

    #[test]
    fn test_weld_keeps_distant_vertices() {
        let result = weld(&split_quad(), 1e-4, 0.0).unwrap();
        assert_eq!(result.mesh.vertex_count(), 4);
        let far = IndexedMesh::from_flat(
            vec![[0.0; 3], [0.5, 0.0, 0.0]],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(weld(&far, 0.1, 0.1).unwrap().merged, 0);
    }

    #[test]
    fn test_weld_rejects_bad_indices() {
        let mut mesh = split_quad();
        mesh.indices.push(0);
        assert_eq!(
            weld(&mesh, 1e-4, 0.01).unwrap_err(),
            MeshError::IndexCountNotTriangles(7)
        );
    }
}
