//! Shared configuration for the tube brush
//!
//! This crate provides the single source of truth for brush geometry,
//! drawing thresholds, feedback colors, and composition settings shared by
//! the mesh core, the drawing sessions, and the demo binary.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default vertices around each ring
pub const DEFAULT_LONGITUDE_SEGMENTS: u32 = 24;

/// Default latitude bands in the starting cap
pub const DEFAULT_LATITUDE_SEGMENTS: u32 = 16;

/// Default cap and ring radius in world units
pub const DEFAULT_RADIUS: f32 = 0.125;

/// Default distance from the anchor before the cap is placed
pub const DEFAULT_START_THRESHOLD: f32 = 0.01;

/// Default distance between successive rings
pub const DEFAULT_EXTRUSION_THRESHOLD: f32 = 0.1;

/// Smallest segment count that still forms a ring
pub const MIN_SEGMENTS: u32 = 3;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be at least {MIN_SEGMENTS}, got {value}")]
    TooFewSegments { field: &'static str, value: u32 },
}

/// Geometry and distance thresholds for one drawing tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Vertices per ring; also the cap's longitude count
    pub longitude_segments: u32,
    /// Latitude bands between the cap pole and its equator
    pub latitude_segments: u32,
    /// Radius of the starting hemisphere cap
    pub cap_radius: f32,
    /// Radius of every extruded ring
    pub ring_radius: f32,
    /// Distance from the anchor that triggers cap placement
    pub start_threshold: f32,
    /// Distance from the last ring that triggers the next one.
    /// Smaller values give smoother but heavier tubes.
    pub extrusion_threshold: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            longitude_segments: DEFAULT_LONGITUDE_SEGMENTS,
            latitude_segments: DEFAULT_LATITUDE_SEGMENTS,
            cap_radius: DEFAULT_RADIUS,
            ring_radius: DEFAULT_RADIUS,
            start_threshold: DEFAULT_START_THRESHOLD,
            extrusion_threshold: DEFAULT_EXTRUSION_THRESHOLD,
        }
    }
}

impl BrushConfig {
    /// Reject values that would make a generator fail mid-gesture.
    pub fn validate(&self) -> Result<(), ConfigError> {
        segments("longitude_segments", self.longitude_segments)?;
        segments("latitude_segments", self.latitude_segments)?;
        positive("cap_radius", self.cap_radius)?;
        positive("ring_radius", self.ring_radius)?;
        positive("start_threshold", self.start_threshold)?;
        positive("extrusion_threshold", self.extrusion_threshold)?;
        Ok(())
    }
}

/// Debug colors marking the stitching frontier (linear RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackPalette {
    /// Vertices still on an open boundary
    pub open: [f32; 4],
    /// Interior vertices
    pub closed: [f32; 4],
}

impl Default for FeedbackPalette {
    fn default() -> Self {
        Self {
            open: [1.0, 0.55, 0.0, 1.0],
            closed: [0.85, 0.85, 0.85, 1.0],
        }
    }
}

/// Post-composition vertex welding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldConfig {
    pub enabled: bool,
    /// Vertices closer than this are merged
    pub threshold: f32,
    /// Edge length of the spatial bucket grid
    pub bucket_step: f32,
}

impl Default for WeldConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 0.001,
            bucket_step: 0.01,
        }
    }
}

impl WeldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled {
            positive("weld.threshold", self.threshold)?;
            positive("weld.bucket_step", self.bucket_step)?;
        }
        Ok(())
    }
}

/// Complete configuration for a sculpting studio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct SculptConfig {
    pub brush: BrushConfig,
    pub palette: FeedbackPalette,
    pub weld: WeldConfig,
    /// Rebuild normals from topology when a gesture is finalized
    pub recompute_normals: bool,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            brush: BrushConfig::default(),
            palette: FeedbackPalette::default(),
            weld: WeldConfig::default(),
            recompute_normals: true,
        }
    }
}

impl SculptConfig {
    /// Parse JSON, filling missing fields with defaults, then validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.brush.validate()?;
        self.weld.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn segments(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value >= MIN_SEGMENTS {
        Ok(())
    } else {
        Err(ConfigError::TooFewSegments { field, value })
    }
}
