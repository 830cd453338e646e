//! Window + runtime loop.
//!
//! Owns the `winit` event loop, the window and its GPU surface, feeds window events into
//! the input subsystem and runs the overlay on top of the application's scene every frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
