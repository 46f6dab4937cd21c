//! Core sculpting types.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use smart_mesh::{GeneratorError, MeshError, SmartMesh, StitchError};
use tubebrush_config::ConfigError;

/// Which controller drives a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

/// One frame of controller input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerSample {
    /// World-space position of the brush tip
    pub position: Vec3,
    /// Whether the draw trigger is held
    pub trigger: bool,
}

impl ControllerSample {
    pub fn new(position: Vec3, trigger: bool) -> Self {
        Self { position, trigger }
    }

    /// Sample with the trigger held.
    pub fn held(position: Vec3) -> Self {
        Self::new(position, true)
    }

    /// Sample with the trigger released.
    pub fn released(position: Vec3) -> Self {
        Self::new(position, false)
    }
}

/// A completed gesture, ready for the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedStroke {
    /// Per-session gesture counter
    pub id: u64,
    /// Fully merged mesh of every segment
    pub mesh: SmartMesh,
    /// Number of segments (cap plus rings) merged into `mesh`
    pub segment_count: usize,
}

impl FinishedStroke {
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

/// Errors surfaced by the sculpting layer
#[derive(Debug, thiserror::Error)]
pub enum SculptError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Generator failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Stitch failed: {0}")]
    Stitch(#[from] StitchError),

    #[error("Mesh import failed: {0}")]
    Mesh(#[from] MeshError),
}
