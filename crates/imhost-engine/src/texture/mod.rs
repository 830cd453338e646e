//! Texture handle bookkeeping.
//!
//! The GUI only sees opaque numeric handles; the host owns the actual GPU resources.
//! `TextureRegistry` is the bijection between the two.

mod registry;

pub use registry::{TextureId, TextureRegistry};
