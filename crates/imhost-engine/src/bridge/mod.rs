//! Host input → GUI input queue.
//!
//! `InputBridge` samples the engine's input state once per frame and forwards only the
//! changes to a `GuiInputSink`.

mod config;
mod input_bridge;

pub use config::{BridgeConfig, PointerOrigin, TextInputMode};
pub use input_bridge::{InputBridge, InputSample};
