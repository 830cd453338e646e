use crate::coords::ScissorOrigin;

/// How GUI vertex colors are written to the mesh.
///
/// GUI colors are authored in gamma (sRGB) space. Which policy is right depends on the
/// render target: an sRGB target re-encodes on write and wants `Linear`, a UNORM target
/// wants `Gamma`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorPolicy {
    /// Channels copied as `byte / 255`.
    Gamma,
    /// RGB decoded from sRGB to linear, alpha copied.
    Linear,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TranslatorConfig {
    pub color: ColorPolicy,
    pub scissor_origin: ScissorOrigin,
}

impl TranslatorConfig {
    pub fn new(color: ColorPolicy) -> Self {
        Self {
            color,
            scissor_origin: ScissorOrigin::TopLeft,
        }
    }

    pub fn with_scissor_origin(mut self, origin: ScissorOrigin) -> Self {
        self.scissor_origin = origin;
        self
    }
}
