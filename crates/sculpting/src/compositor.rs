//! Flattening strokes into renderable meshes.
//!
//! Colors mark each vertex's boundary tag at render time so the stitching
//! frontier is visible. Rendering never changes topology.

use smart_mesh::{BoundaryTag, IndexedMesh, SmartMesh, weld};
use tubebrush_config::{FeedbackPalette, SculptConfig, WeldConfig};

use crate::accumulator::StrokeAccumulator;
use crate::gallery::Gallery;
use crate::types::SculptError;

#[derive(Debug, Clone, Default)]
pub struct Compositor {
    palette: FeedbackPalette,
    weld: WeldConfig,
}

impl Compositor {
    pub fn new(palette: FeedbackPalette, weld: WeldConfig) -> Self {
        Self { palette, weld }
    }

    pub fn from_config(config: &SculptConfig) -> Self {
        Self::new(config.palette, config.weld)
    }

    pub fn palette(&self) -> &FeedbackPalette {
        &self.palette
    }

    /// Flatten one mesh, coloring vertices by tag.
    pub fn render(&self, mesh: &SmartMesh) -> IndexedMesh {
        let mut out = mesh.to_indexed();
        out.colors = mesh
            .vertices()
            .iter()
            .map(|v| match v.tag {
                BoundaryTag::Open => self.palette.open,
                BoundaryTag::Closed => self.palette.closed,
            })
            .collect();
        out
    }

    /// Flatten a gesture still under construction.
    pub fn render_accumulator(&self, accumulator: &StrokeAccumulator) -> IndexedMesh {
        self.render(accumulator.mesh())
    }

    /// Merge every finished stroke into one mesh in world space.
    ///
    /// When welding is enabled, coincident vertices across strokes are
    /// folded together after the layer transform is applied.
    pub fn render_gallery(&self, gallery: &Gallery) -> Result<IndexedMesh, SculptError> {
        let mut merged = SmartMesh::new();
        for stroke in gallery.strokes() {
            merged.merge(stroke.mesh.clone());
        }
        merged.transform(&gallery.transform().to_affine());

        let rendered = self.render(&merged);
        if !self.weld.enabled || rendered.is_empty() {
            return Ok(rendered);
        }

        let welded = weld(&rendered, self.weld.threshold, self.weld.bucket_step)?;
        tracing::debug!(
            merged = welded.merged,
            dropped = welded.dropped_triangles,
            "Welded gallery"
        );
        Ok(welded.mesh)
    }
}
