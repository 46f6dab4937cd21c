//! Finished strokes and the transform of the layer that holds them.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::FinishedStroke;

/// Uniform scale, rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    pub scale: f32,
    pub rotation: Quat,
    pub translation: Vec3,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LayerTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }

    /// Map a world-space affine into layer space.
    pub fn to_local(&self) -> Affine3A {
        self.to_affine().inverse()
    }
}

/// Every stroke finished so far, in completion order.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    strokes: Vec<FinishedStroke>,
    transform: LayerTransform,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished stroke. Empty strokes (released before the cap was
    /// placed) are skipped and `false` is returned.
    pub fn add(&mut self, stroke: FinishedStroke) -> bool {
        if stroke.is_empty() {
            tracing::debug!(stroke = stroke.id, "Skipping empty stroke");
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    /// Remove and return the most recent stroke.
    pub fn undo_last(&mut self) -> Option<FinishedStroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[FinishedStroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn total_triangles(&self) -> usize {
        self.strokes.iter().map(|s| s.mesh.triangle_count()).sum()
    }

    pub fn transform(&self) -> &LayerTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: LayerTransform) {
        self.transform = transform;
    }
}
