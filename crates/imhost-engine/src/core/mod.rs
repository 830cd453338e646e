//! Contract between the runtime and the application hosting the overlay.
//!
//! The runtime owns the window, GPU and overlay; the application only draws its scene and
//! may veto the frame loop through `AppControl`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
