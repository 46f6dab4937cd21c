//! Cross-section generators for tube strokes.
//!
//! Both generators work in a local frame whose +Y axis is the drawing
//! direction: rings lie in the XZ plane, and the hemisphere cap bulges
//! toward -Y with its equator in the XZ plane. Vertex `k` of any ring sits at
//! angle `k / segments * TAU` measured from +X toward +Z, so a cap equator
//! and a ring generated with the same segment count line up one-to-one
//! before orientation.
//!
//! Generators are pure and deterministic: identical arguments produce
//! bit-identical geometry.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Affine3A, Quat, Vec2, Vec3};

use crate::smart::{BoundaryTag, SmartMesh, Triangle, Vertex, VertexId};

/// Smallest accepted segment count for either direction.
pub const MIN_SEGMENTS: u32 = 3;

/// Parameter errors raised before any geometry is produced
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    #[error("Radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("{which} segment count must be at least {MIN_SEGMENTS}, got {count}")]
    TooFewSegments { which: &'static str, count: u32 },
}

fn check_radius(radius: f32) -> Result<(), GeneratorError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(GeneratorError::InvalidRadius(radius))
    }
}

fn check_segments(which: &'static str, count: u32) -> Result<(), GeneratorError> {
    if count >= MIN_SEGMENTS {
        Ok(())
    } else {
        Err(GeneratorError::TooFewSegments { which, count })
    }
}

/// Point on the unit circle for ring vertex `k` of `segments`.
fn ring_direction(k: u32, segments: u32) -> Vec3 {
    let phi = k as f32 / segments as f32 * TAU;
    Vec3::new(phi.cos(), 0.0, phi.sin())
}

/// Generate a capped half-sphere.
///
/// Layout: vertex 0 is the pole at `(0, -radius, 0)`, followed by
/// `latitude_segments` rows of `longitude_segments` vertices each, from the
/// row nearest the pole down to the equator. Triangles are a fan around the
/// pole followed by two triangles per cell for each band.
///
/// The equator row (the last `longitude_segments` vertices) is tagged
/// [`BoundaryTag::Open`] with order indices `0..longitude_segments`; every
/// other vertex is closed.
pub fn hemisphere_cap(
    radius: f32,
    longitude_segments: u32,
    latitude_segments: u32,
) -> Result<SmartMesh, GeneratorError> {
    check_radius(radius)?;
    check_segments("Longitude", longitude_segments)?;
    check_segments("Latitude", latitude_segments)?;

    let lon = longitude_segments;
    let lat = latitude_segments;
    let mut mesh = SmartMesh::with_capacity(
        1 + (lat * lon) as usize,
        (lon + 2 * lon * (lat - 1)) as usize,
    );

    let pole = mesh.add_vertex(Vertex {
        normal: Vec3::NEG_Y,
        uv: Vec2::new(0.5, 0.0),
        ..Vertex::at(Vec3::new(0.0, -radius, 0.0))
    });

    for i in 1..=lat {
        let theta = FRAC_PI_2 * i as f32 / lat as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        let tag = if i == lat {
            BoundaryTag::Open
        } else {
            BoundaryTag::Closed
        };
        for k in 0..lon {
            let dir = ring_direction(k, lon);
            let normal = Vec3::new(sin_t * dir.x, -cos_t, sin_t * dir.z);
            mesh.add_vertex(Vertex {
                position: normal * radius,
                normal,
                uv: Vec2::new(k as f32 / lon as f32, i as f32 / lat as f32),
                tag,
                order: k,
                triangles: Vec::new(),
            });
        }
    }

    let row = |i: u32, k: u32| VertexId(1 + (i - 1) * lon + k % lon);

    // Pole fan
    for k in 0..lon {
        push_triangle(&mut mesh, pole, row(1, k), row(1, k + 1));
    }

    // Quad strips through the latitude bands
    for i in 1..lat {
        for k in 0..lon {
            let (a0, a1) = (row(i, k), row(i, k + 1));
            let (b0, b1) = (row(i + 1, k), row(i + 1, k + 1));
            push_triangle(&mut mesh, a0, b0, b1);
            push_triangle(&mut mesh, a0, b1, a1);
        }
    }

    tracing::trace!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Generated hemisphere cap"
    );

    Ok(mesh)
}

/// Generate a flat ring of `longitude_segments` open vertices in the XZ plane.
///
/// The ring has no triangles; it is a boundary contour meant to be stitched
/// to an existing open boundary.
pub fn ring(radius: f32, longitude_segments: u32) -> Result<SmartMesh, GeneratorError> {
    check_radius(radius)?;
    check_segments("Longitude", longitude_segments)?;

    let mut mesh = SmartMesh::with_capacity(longitude_segments as usize, 0);
    for k in 0..longitude_segments {
        let dir = ring_direction(k, longitude_segments);
        mesh.add_vertex(Vertex::ring(
            dir * radius,
            dir,
            Vec2::new(k as f32 / longitude_segments as f32, 0.0),
            k,
        ));
    }

    Ok(mesh)
}

/// Transform that maps the generator frame onto `center`, with local +Y
/// pointing along `direction`.
///
/// A zero direction leaves the orientation unchanged.
pub fn placement(center: Vec3, direction: Vec3) -> Affine3A {
    let rotation = match direction.try_normalize() {
        Some(dir) => Quat::from_rotation_arc(Vec3::Y, dir),
        None => Quat::IDENTITY,
    };
    Affine3A::from_rotation_translation(rotation, center)
}

// Generator indices are always in range
fn push_triangle(mesh: &mut SmartMesh, a: VertexId, b: VertexId, c: VertexId) {
    if let Err(e) = mesh.add_triangle(Triangle::new(a, b, c)) {
        tracing::error!("Generator produced invalid triangle: {e}");
    }
}
