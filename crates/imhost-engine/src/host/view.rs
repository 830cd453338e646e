/// Host-assigned identity of a render view (camera, window, viewport).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ViewId(pub u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewKind {
    /// A view the player/user actually looks at.
    Game,
    /// Editor scene preview or thumbnail; never gets the overlay unless designated.
    EditorPreview,
}

/// One render view the host is about to draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewInfo {
    pub id: ViewId,
    pub kind: ViewKind,
    /// Render target size in physical pixels.
    pub pixel_size: [f32; 2],
    /// Physical pixels per logical unit.
    pub scale_factor: f32,
    /// Logical frame counter shared by every view drawn in the same frame.
    pub frame_index: u64,
}

impl ViewInfo {
    pub fn game(id: ViewId, pixel_size: [f32; 2], scale_factor: f32, frame_index: u64) -> Self {
        Self {
            id,
            kind: ViewKind::Game,
            pixel_size,
            scale_factor,
            frame_index,
        }
    }

    /// GUI display size (logical units) and framebuffer scale for this view.
    ///
    /// A non-positive or non-finite scale is treated as 1.
    pub fn display_metrics(&self) -> ([f32; 2], [f32; 2]) {
        let s = if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        (
            [self.pixel_size[0] / s, self.pixel_size[1] / s],
            [s, s],
        )
    }
}
