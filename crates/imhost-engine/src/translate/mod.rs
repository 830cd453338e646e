//! Draw-data translation.
//!
//! Turns one frame of GUI `DrawData` into a host-renderable mesh in normalized device
//! coordinates plus a list of scissored, textured index ranges.

mod config;
mod mesh;
mod translator;

pub use config::{ColorPolicy, TranslatorConfig};
pub use mesh::HostMesh;
pub use translator::{DrawBatch, TranslatedFrame, Translator};
