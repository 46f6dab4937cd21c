//! Conversion between IndexedMesh and Bevy's `Mesh`.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;

use crate::indexed::IndexedMesh;

/// Errors converting a Bevy mesh into an IndexedMesh
#[derive(Debug, thiserror::Error)]
pub enum BevyMeshError {
    #[error("Mesh has no position attribute")]
    NoPositions,
    #[error("Mesh has no indices")]
    NoIndices,
}

impl IndexedMesh {
    /// Build a triangle-list Bevy mesh for the renderer.
    ///
    /// Missing normals and uvs are filled with zeros; vertex colors are only
    /// inserted when present.
    pub fn to_bevy_mesh(&self) -> Mesh {
        let count = self.positions.len();
        let normals = if self.normals.len() == count {
            self.normals.clone()
        } else {
            vec![[0.0; 3]; count]
        };
        let uvs = if self.uvs.len() == count {
            self.uvs.clone()
        } else {
            vec![[0.0; 2]; count]
        };

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        if self.colors.len() == count {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone());
        }
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }

    /// Read positions, normals, uvs, colors, and indices from a Bevy mesh.
    pub fn from_bevy_mesh(mesh: &Mesh) -> Result<Self, BevyMeshError> {
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|attr| attr.as_float3())
            .ok_or(BevyMeshError::NoPositions)?
            .to_vec();

        let normals = mesh
            .attribute(Mesh::ATTRIBUTE_NORMAL)
            .and_then(|attr| attr.as_float3())
            .map(|n| n.to_vec())
            .unwrap_or_default();

        let uvs = match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(v)) => v.clone(),
            _ => Vec::new(),
        };

        let colors = match mesh.attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(v)) => v.clone(),
            _ => Vec::new(),
        };

        let indices: Vec<u32> = match mesh.indices() {
            Some(Indices::U16(idx)) => idx.iter().map(|&i| i as u32).collect(),
            Some(Indices::U32(idx)) => idx.to_vec(),
            None => return Err(BevyMeshError::NoIndices),
        };

        Ok(Self {
            positions,
            normals,
            uvs,
            colors,
            indices,
        })
    }
}
