//! Boundary stitching: joining a new ring to the open frontier of a mesh.
//!
//! The previous frontier (`ring A`, already inside the running mesh) and the
//! incoming ring (`ring B`, still in its own index space) must have the same
//! cardinality `n`. Each vertex of A is paired with its nearest vertex of B,
//! which recovers the rotation between two independently oriented rings, and
//! a quad is emitted between edge `(a[i], a[i+1])` and edge
//! `(b[m], b[m+1])` where `m` is the match of `a[i]`. The result is exactly
//! `2n` triangles.
//!
//! Matching is a brute-force O(n²) nearest-point scan. It is an
//! approximation of true rotational alignment: under a large twist between
//! consecutive rings two vertices of A can pick the same partner, producing
//! overlapping quads. [`StitchReport::consistent_rotation`] reports when that
//! happened; the triangles are emitted regardless.

use glam::Vec3;

use crate::smart::{BoundaryTag, SmartMesh, Triangle, VertexId};

/// Why a stitch was refused. The target mesh is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StitchError {
    #[error("Topology mismatch: boundary has {boundary} vertices, ring has {ring}")]
    TopologyMismatch { boundary: usize, ring: usize },
    #[error("Cannot stitch an empty boundary")]
    EmptyBoundary,
    #[error("Boundary vertex {0:?} does not exist in the target mesh")]
    UnknownVertex(VertexId),
}

/// Outcome of a successful stitch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchReport {
    /// Offset added to the incoming ring's local ids during the merge
    pub vertex_offset: u32,
    /// Number of band triangles emitted (always twice the ring size)
    pub triangles_added: usize,
    /// Former frontier, now closed
    pub closed: Vec<VertexId>,
    /// New frontier in ring order, as ids of the merged mesh
    pub boundary: Vec<VertexId>,
    /// Whether every match was the same cyclic shift of its predecessor
    pub consistent_rotation: bool,
}

/// For each point of `from`, the index of the nearest point of `to`.
///
/// Ties resolve to the lowest index. Returns an empty vector if `to` is
/// empty.
pub fn nearest_matches(from: &[Vec3], to: &[Vec3]) -> Vec<usize> {
    if to.is_empty() {
        return Vec::new();
    }
    from.iter()
        .map(|p| {
            let mut best = 0;
            let mut best_distance = f32::INFINITY;
            for (j, q) in to.iter().enumerate() {
                let d = p.distance_squared(*q);
                if d < best_distance {
                    best_distance = d;
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// Whether `matches[i] == (matches[0] + i) % n` for every `i`.
fn is_cyclic_shift(matches: &[usize]) -> bool {
    let n = matches.len();
    let Some(&start) = matches.first() else {
        return true;
    };
    matches
        .iter()
        .enumerate()
        .all(|(i, &m)| m == (start + i) % n)
}

/// Stitch `ring` onto `boundary` (ids of open vertices in `mesh`, in ring
/// order).
///
/// On success, `ring` has been merged into `mesh`, `2n` triangles join the
/// two rings, every vertex of `boundary` is closed, and the ring's open
/// vertices form the new frontier. On failure `mesh` is unchanged.
pub fn stitch_ring(
    mesh: &mut SmartMesh,
    boundary: &[VertexId],
    ring: SmartMesh,
) -> Result<StitchReport, StitchError> {
    let ring_hot = ring.open_ring();
    let n = boundary.len();

    if n != ring_hot.len() {
        return Err(StitchError::TopologyMismatch {
            boundary: n,
            ring: ring_hot.len(),
        });
    }
    if n == 0 {
        return Err(StitchError::EmptyBoundary);
    }

    let mut from = Vec::with_capacity(n);
    for id in boundary {
        let v = mesh.vertex(*id).ok_or(StitchError::UnknownVertex(*id))?;
        from.push(v.position);
    }
    let to: Vec<Vec3> = ring_hot
        .iter()
        .filter_map(|id| ring.vertex(*id).map(|v| v.position))
        .collect();

    let matches = nearest_matches(&from, &to);
    let consistent_rotation = is_cyclic_shift(&matches);

    let vertex_offset = mesh.merge(ring);
    let new_boundary: Vec<VertexId> = ring_hot.iter().map(|id| id.offset(vertex_offset)).collect();

    let mut triangles_added = 0;
    for (i, &m) in matches.iter().enumerate() {
        let a0 = boundary[i];
        let a1 = boundary[(i + 1) % n];
        let b0 = new_boundary[m];
        let b1 = new_boundary[(m + 1) % n];

        for tri in [Triangle::new(a0, b0, b1), Triangle::new(a0, b1, a1)] {
            // Every id was checked above or produced by the merge
            if let Err(e) = mesh.add_triangle(tri) {
                tracing::error!("Stitch emitted invalid triangle: {e}");
                continue;
            }
            triangles_added += 1;
        }
    }

    for id in boundary {
        mesh.set_tag(*id, BoundaryTag::Closed);
    }

    if consistent_rotation {
        tracing::debug!(ring = n, triangles = triangles_added, "Stitched ring");
    } else {
        tracing::debug!(
            ring = n,
            triangles = triangles_added,
            "Stitched ring with inconsistent rotation, band may overlap"
        );
    }

    Ok(StitchReport {
        vertex_offset,
        triangles_added,
        closed: boundary.to_vec(),
        boundary: new_boundary,
        consistent_rotation,
    })
}

/// Stitch the open boundary of `other` onto the open boundary of `base`.
pub fn join_open_boundaries(
    base: &mut SmartMesh,
    other: SmartMesh,
) -> Result<StitchReport, StitchError> {
    let boundary = base.open_ring();
    stitch_ring(base, &boundary, other)
}
