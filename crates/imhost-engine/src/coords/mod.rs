//! Coordinate and geometry types shared by the translator, the input bridge and renderers.
//!
//! Canonical GUI space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The translator maps GUI space to framebuffer pixels through a [`DisplayTransform`] and
//! from there to normalized device coordinates (+Y up, origin at the center).

mod color;
mod rect;
mod scissor;
mod transform;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use scissor::{ScissorOrigin, ScissorRect};
pub use transform::DisplayTransform;
pub use vec2::Vec2;
pub use viewport::Viewport;
