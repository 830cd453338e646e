//! Boundary to the immediate-mode GUI library.
//!
//! The engine never talks to a GUI library directly: `ImmediateGui` is the context,
//! `GuiInputSink` its input queue and `DrawData` an owned copy of its per-frame output.
//! The `imgui` feature provides an implementation on top of Dear ImGui.

mod context;
mod draw_data;
mod key;

#[cfg(feature = "imgui")]
mod imgui_backend;

pub use context::{FontAtlasPixels, GuiInputSink, ImmediateGui};
pub use draw_data::{DrawCmd, DrawData, DrawList, DrawVert};
pub use key::{GuiKey, GuiMouseButton};

#[cfg(feature = "imgui")]
pub use imgui_backend::ImguiContext;
