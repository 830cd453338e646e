use crate::texture::TextureId;

/// One vertex as emitted by the GUI.
///
/// `col` is packed RGBA: R in bits 0..8, G in 8..16, B in 16..24, A in 24..32.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub col: u32,
}

impl DrawVert {
    pub fn new(pos: [f32; 2], uv: [f32; 2], rgba: [u8; 4]) -> Self {
        Self {
            pos,
            uv,
            col: u32::from_le_bytes(rgba),
        }
    }
}

/// One draw batch inside a list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    /// Number of indices to draw.
    pub elem_count: u32,
    /// First index, relative to the list's index buffer.
    pub idx_offset: u32,
    /// Added to every index of the batch, relative to the list's vertex buffer.
    pub vtx_offset: u32,
    /// `[x1, y1, x2, y2]` in GUI display space.
    pub clip_rect: [f32; 4],
    pub texture_id: TextureId,
}

/// Vertex/index buffers plus the batches drawing from them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub vtx: Vec<DrawVert>,
    pub idx: Vec<u32>,
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    fn clear(&mut self) {
        self.vtx.clear();
        self.idx.clear();
        self.cmds.clear();
    }
}

/// A frame of GUI output.
///
/// Reused across frames: `clear()` keeps every buffer's capacity and `push_list()` recycles
/// list slots, so a warmed-up instance refills without allocating.
#[derive(Debug, Clone)]
pub struct DrawData {
    lists: Vec<DrawList>,
    used: usize,

    /// Top-left of the GUI display space.
    pub display_pos: [f32; 2],
    /// Size of the GUI display space, in GUI units.
    pub display_size: [f32; 2],
    /// GUI units to framebuffer pixels.
    pub framebuffer_scale: [f32; 2],
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            used: 0,
            display_pos: [0.0, 0.0],
            display_size: [0.0, 0.0],
            framebuffer_scale: [1.0, 1.0],
        }
    }
}

impl DrawData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all lists while retaining their allocations.
    pub fn clear(&mut self) {
        for list in &mut self.lists[..self.used] {
            list.clear();
        }
        self.used = 0;
    }

    /// Appends an empty list (a recycled one when available) and returns it for filling.
    pub fn push_list(&mut self) -> &mut DrawList {
        if self.used == self.lists.len() {
            self.lists.push(DrawList::default());
        }
        let list = &mut self.lists[self.used];
        self.used += 1;
        list
    }

    pub fn lists(&self) -> &[DrawList] {
        &self.lists[..self.used]
    }

    pub fn total_vtx_count(&self) -> usize {
        self.lists().iter().map(|l| l.vtx.len()).sum()
    }

    pub fn total_idx_count(&self) -> usize {
        self.lists().iter().map(|l| l.idx.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_vtx_count() == 0 || self.total_idx_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_rgba_little_endian() {
        let v = DrawVert::new([0.0; 2], [0.0; 2], [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(v.col, 0x4433_2211);
    }

    #[test]
    fn clear_recycles_lists() {
        let mut dd = DrawData::new();
        dd.push_list().vtx.extend([DrawVert::new([0.0; 2], [0.0; 2], [0; 4]); 32]);
        let cap = dd.lists()[0].vtx.capacity();

        dd.clear();
        assert!(dd.lists().is_empty());
        assert!(dd.is_empty());

        let list = dd.push_list();
        assert!(list.vtx.is_empty());
        assert_eq!(list.vtx.capacity(), cap);
    }
}
