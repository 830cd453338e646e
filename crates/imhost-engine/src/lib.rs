//! imhost engine crate.
//!
//! Hosts an immediate-mode GUI as an overlay: drives the GUI context once per frame,
//! bridges host input into it, translates its draw data into host draw batches and
//! renders them with wgpu. The windowing runtime and device layer are included for
//! standalone use.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;

pub mod texture;
pub mod gui;
pub mod translate;
pub mod bridge;
pub mod host;
