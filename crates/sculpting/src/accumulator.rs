//! Ordered segments of one gesture, merged into a single running mesh.
//!
//! The accumulator owns the running mesh and the current open boundary,
//! tracked by merged-mesh ids. Segments are appended only: once merged, a
//! segment's vertices are never edited again except for the closing of its
//! open ring by the next stitch.

use std::ops::Range;

use smart_mesh::{SmartMesh, StitchError, StitchReport, VertexId, stitch_ring};

/// Where one segment landed in the running mesh.
///
/// Spans are contiguous and in order, so concatenating them reproduces the
/// running mesh exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpan {
    pub vertices: Range<u32>,
    /// The segment's own triangles followed by any band triangles that
    /// stitched it to the previous boundary
    pub triangles: Range<u32>,
    pub stitched: bool,
}

/// Result of a successful [`StrokeAccumulator::extend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Index of the new segment
    pub segment: usize,
    pub span: SegmentSpan,
    /// Present unless this was the first segment
    pub stitch: Option<StitchReport>,
}

/// One continuous gesture under construction.
#[derive(Debug, Clone, Default)]
pub struct StrokeAccumulator {
    mesh: SmartMesh,
    segments: Vec<SegmentSpan>,
    boundary: Vec<VertexId>,
}

impl StrokeAccumulator {
    /// Empty accumulator with no open boundary.
    pub fn begin() -> Self {
        Self::default()
    }

    /// Append a segment.
    ///
    /// With no open boundary yet, the segment is merged as-is and its open
    /// vertices become the boundary. Otherwise it is stitched to the current
    /// boundary first. A failed stitch leaves the accumulator unchanged.
    pub fn extend(&mut self, segment: SmartMesh) -> Result<Extension, StitchError> {
        let vertex_start = self.mesh.vertex_count() as u32;
        let triangle_start = self.mesh.triangle_count() as u32;

        let stitch = if self.boundary.is_empty() {
            let ring = segment.open_ring();
            let offset = self.mesh.merge(segment);
            self.boundary = ring.into_iter().map(|id| id.offset(offset)).collect();
            None
        } else {
            let report = stitch_ring(&mut self.mesh, &self.boundary, segment)?;
            self.boundary = report.boundary.clone();
            Some(report)
        };

        let span = SegmentSpan {
            vertices: vertex_start..self.mesh.vertex_count() as u32,
            triangles: triangle_start..self.mesh.triangle_count() as u32,
            stitched: stitch.is_some(),
        };
        self.segments.push(span.clone());

        tracing::trace!(
            segment = self.segments.len() - 1,
            boundary = self.boundary.len(),
            triangles = self.mesh.triangle_count(),
            "Extended stroke"
        );

        Ok(Extension {
            segment: self.segments.len() - 1,
            span,
            stitch,
        })
    }

    /// Current frontier in ring order, as ids of [`Self::mesh`].
    pub fn open_boundary(&self) -> &[VertexId] {
        &self.boundary
    }

    pub fn segments(&self) -> &[SegmentSpan] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The running mesh.
    pub fn mesh(&self) -> &SmartMesh {
        &self.mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Consume the accumulator and return the merged mesh.
    ///
    /// An accumulator that never received a segment yields an empty mesh.
    pub fn finalize(self) -> SmartMesh {
        self.mesh
    }
}
