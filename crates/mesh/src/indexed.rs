//! Flat vertex-array + index-array mesh handed to the renderer.

use glam::Vec3;

/// Interleaved vertex for GPU upload (64 bytes, `bytemuck`-castable).
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct RenderVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    /// Padding to a 16-byte multiple
    pub _padding: [f32; 4],
}

/// Plain triangle-list mesh: parallel attribute arrays plus `u32` indices.
///
/// `normals`, `uvs`, and `colors` are either empty or the same length as
/// `positions`; [`IndexedMesh::interleaved`] fills gaps with zero normals
/// and uvs and opaque white.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from flat attribute arrays with no vertex colors.
    pub fn from_flat(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        uvs: Vec<[f32; 2]>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            positions,
            normals,
            uvs,
            colors: Vec::new(),
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete index triples.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate complete index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Append another mesh, offsetting its indices by this mesh's vertex count.
    ///
    /// Attribute arrays that are empty on one side are padded so the result
    /// stays parallel.
    pub fn append(&mut self, other: &IndexedMesh) {
        let offset = self.positions.len() as u32;
        let before = self.positions.len();
        let incoming = other.positions.len();

        pad_attribute(&mut self.normals, before, &other.normals, incoming, [0.0; 3]);
        pad_attribute(&mut self.uvs, before, &other.uvs, incoming, [0.0; 2]);
        pad_attribute(&mut self.colors, before, &other.colors, incoming, [1.0; 4]);

        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Interleave attributes for a single vertex buffer upload.
    pub fn interleaved(&self) -> Vec<RenderVertex> {
        (0..self.positions.len())
            .map(|i| RenderVertex {
                position: self.positions[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0; 3]),
                uv: self.uvs.get(i).copied().unwrap_or([0.0; 2]),
                color: self.colors.get(i).copied().unwrap_or([1.0; 4]),
                _padding: [0.0; 4],
            })
            .collect()
    }
}

fn pad_attribute<T: Copy>(
    ours: &mut Vec<T>,
    our_len: usize,
    theirs: &[T],
    their_len: usize,
    fill: T,
) {
    if ours.is_empty() && theirs.is_empty() {
        return;
    }
    ours.resize(our_len, fill);
    if theirs.len() == their_len {
        ours.extend_from_slice(theirs);
    } else {
        ours.extend(std::iter::repeat_n(fill, their_len));
    }
}
