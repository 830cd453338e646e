//! GUI context lifecycle and per-frame orchestration.
//!
//! `OverlayHost` owns one immediate-mode context and drives it through a frame:
//! timing, display metrics, input, font atlas upload, user callbacks, translation and
//! submission to a `HostRenderer`.

mod callbacks;
mod config;
mod overlay;
mod renderer;
mod view;

pub use callbacks::{CallbackId, CallbackList};
pub use config::{OverlayConfig, ViewPolicy};
pub use overlay::{FrameOutcome, OverlayHost, SkipReason};
pub use renderer::HostRenderer;
pub use view::{ViewId, ViewInfo, ViewKind};
