use crate::coords::ColorRgba;

/// Reusable vertex/index storage in the host's layout: separate position, UV and color
/// streams plus 32-bit indices.
///
/// Rebuilt every frame. Capacity only grows.
#[derive(Debug, Default)]
pub struct HostMesh {
    pub(crate) positions: Vec<[f32; 2]>,
    pub(crate) uvs: Vec<[f32; 2]>,
    pub(crate) colors: Vec<[f32; 4]>,
    pub(crate) indices: Vec<u32>,
}

impl HostMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the mesh and makes room for the given totals.
    pub(crate) fn reset(&mut self, vertices: usize, indices: usize) {
        self.positions.clear();
        self.uvs.clear();
        self.colors.clear();
        self.indices.clear();

        self.positions.reserve(vertices);
        self.uvs.reserve(vertices);
        self.colors.reserve(vertices);
        self.indices.reserve(indices);
    }

    pub(crate) fn push_vertex(&mut self, pos: [f32; 2], uv: [f32; 2], color: ColorRgba) {
        self.positions.push(pos);
        self.uvs.push(uv);
        self.colors.push(color.to_array());
    }

    /// Positions in normalized device coordinates.
    pub fn positions(&self) -> &[[f32; 2]] {
        &self.positions
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// RGBA in `[0, 1]`.
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Indices are relative to each batch's `base_vertex`.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn vertex_capacity(&self) -> usize {
        self.positions.capacity()
    }

    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}
