//! Tube sculpting from controller input.
//!
//! This crate turns hand-held controller paths into tube meshes:
//! - A hemisphere cap is placed when a gesture leaves its anchor
//! - Rings are extruded along the path and stitched onto the open end
//! - Finished gestures are collected into a transformable gallery
//!
//! # Architecture
//!
//! Geometry lives in `smart_mesh`; this crate drives it from input.
//!
//! ## Key Components
//!
//! - **Types**: Controller samples, finished strokes, and errors
//! - **Accumulator**: The running mesh and open boundary of one gesture
//! - **Session**: Idle/Drawing state machine fed by one controller
//! - **Compositor**: Flattens strokes into colored render meshes
//! - **Gallery**: Finished strokes plus the layer transform
//! - **Navigate**: Two-handed grab of the whole layer
//! - **Studio**: Two independent sessions sharing one gallery

pub mod accumulator;
pub mod compositor;
pub mod gallery;
pub mod navigate;
pub mod session;
pub mod studio;
pub mod types;

pub use accumulator::{Extension, SegmentSpan, StrokeAccumulator};
pub use compositor::Compositor;
pub use gallery::{Gallery, LayerTransform};
pub use navigate::{GrabInput, MIN_LAYER_SCALE, WorldGrab};
pub use session::{DrawingSession, SessionEvent, SessionState};
pub use studio::Studio;
pub use types::{ControllerSample, FinishedStroke, Hand, SculptError};
