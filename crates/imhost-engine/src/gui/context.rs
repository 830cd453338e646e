use anyhow::Result;

use super::draw_data::DrawData;
use super::key::{GuiKey, GuiMouseButton};
use crate::texture::TextureId;

/// RGBA8 pixels of the GUI font atlas, row-major, tightly packed.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAtlasPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl FontAtlasPixels {
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.rgba.len() == self.width as usize * self.height as usize * 4
    }
}

/// Input queue of an immediate-mode GUI.
///
/// Positions are in GUI display space (top-left origin, logical units).
pub trait GuiInputSink {
    fn add_mouse_pos(&mut self, pos: [f32; 2]);
    fn add_mouse_button(&mut self, button: GuiMouseButton, down: bool);
    /// Wheel movement in lines; +y scrolls up.
    fn add_mouse_wheel(&mut self, delta: [f32; 2]);
    fn add_key(&mut self, key: GuiKey, down: bool);
    /// Analog key (stick direction); `value` in `[0, 1]`.
    fn add_key_analog(&mut self, key: GuiKey, down: bool, value: f32);
    fn add_char(&mut self, c: char);
}

/// An immediate-mode GUI context as driven by `OverlayHost`.
///
/// `Ui` is the per-frame building handle handed to registered callbacks.
pub trait ImmediateGui: GuiInputSink {
    type Ui;

    /// Makes this context current. Called once at the start of every frame cycle.
    fn activate(&mut self);

    /// Seconds since the previous frame; always strictly positive.
    fn set_delta_time(&mut self, dt: f32);

    /// Display size in GUI units and the GUI-to-framebuffer scale.
    fn set_display(&mut self, size: [f32; 2], framebuffer_scale: [f32; 2]);

    /// Font atlas pixels when the atlas changed since the last `set_font_texture`.
    fn font_atlas(&mut self) -> Option<FontAtlasPixels>;

    /// Records the texture handle under which the atlas was uploaded.
    fn set_font_texture(&mut self, id: TextureId);

    fn new_frame(&mut self) -> &mut Self::Ui;

    /// Ends the frame and writes its output into `out`, reusing `out`'s buffers.
    fn render_into(&mut self, out: &mut DrawData);

    /// Destroys the native context.
    fn destroy(self) -> Result<()>
    where
        Self: Sized;
}
