//! GPU device + surface management.
//!
//! Creates the wgpu device/queue, configures the window surface and hands out
//! per-frame encoders and views.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
