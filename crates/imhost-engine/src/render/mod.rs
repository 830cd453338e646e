//! GPU rendering subsystem.
//!
//! `OverlayRenderer` draws translated GUI frames with wgpu; `WgpuHost` adapts it to the
//! `HostRenderer` contract for one frame.
//!
//! Convention:
//! - mesh positions are already in NDC; the pipeline applies no transform
//! - scissors are physical pixels, top-left origin

mod ctx;
mod overlay;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use overlay::{OverlayRenderer, WgpuHost};
pub use texture::GpuTexture;
