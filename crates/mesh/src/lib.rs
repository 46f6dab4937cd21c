//! Incremental indexed-mesh construction for tube strokes.
//!
//! This crate provides the geometry core of the tube brush:
//! - [`IndexedMesh`] - flat attribute arrays + `u32` indices for the renderer
//! - [`SmartMesh`] - editable mesh with boundary tags and triangle membership
//! - [`primitives`] - hemisphere cap and ring generators
//! - [`stitch`] - joins a new ring to the open boundary of a mesh
//! - [`weld`] - merges coincident vertices after composition
//!
//! The `bevy` feature adds conversion between [`IndexedMesh`] and Bevy's
//! `Mesh`.

#[cfg(feature = "bevy")]
pub mod bevy_mesh;
pub mod indexed;
pub mod primitives;
pub mod smart;
pub mod stitch;
pub mod weld;

#[cfg(feature = "bevy")]
pub use bevy_mesh::BevyMeshError;
pub use indexed::{IndexedMesh, RenderVertex};
pub use primitives::{GeneratorError, hemisphere_cap, placement, ring};
pub use smart::{
    BoundaryTag, MeshError, SmartMesh, Triangle, TriangleId, TriangleKind, ValidationError,
    Vertex, VertexId,
};
pub use stitch::{StitchError, StitchReport, join_open_boundaries, stitch_ring};
pub use weld::{WeldResult, weld};
