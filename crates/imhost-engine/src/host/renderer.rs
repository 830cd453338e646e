use std::hash::Hash;

use anyhow::Result;

use crate::gui::FontAtlasPixels;
use crate::translate::TranslatedFrame;

/// The host rendering pipeline as seen by `OverlayHost`.
pub trait HostRenderer {
    /// Native texture handle; registered in the overlay's texture registry.
    type Texture: Clone + Eq + Hash;

    /// Uploads RGBA8 pixels (the GUI font atlas) and returns the native texture.
    fn create_texture(&mut self, pixels: &FontAtlasPixels) -> Result<Self::Texture>;

    /// Draws one translated frame.
    ///
    /// Positions are already in normalized device coordinates; scissors are in framebuffer
    /// pixels in the origin convention the translator was configured with.
    fn submit(&mut self, frame: &TranslatedFrame<'_, Self::Texture>) -> Result<()>;
}
