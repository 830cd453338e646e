/// Where the host measures pointer coordinates from.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PointerOrigin {
    /// Y grows downwards (winit and most windowing systems). Passed through.
    #[default]
    TopLeft,
    /// Y grows upwards; flipped against the window height.
    BottomLeft,
}

/// Source of GUI text input.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextInputMode {
    /// Committed text from the platform (layout and IME aware).
    #[default]
    CharacterStream,
    /// Rebuilds ASCII letters, digits and space from key presses, for hosts without a
    /// text stream.
    KeyCodeFallback,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BridgeConfig {
    pub pointer_origin: PointerOrigin,
    pub text_mode: TextInputMode,

    /// When set, a missing gamepad snapshot means "disconnected" and held gamepad keys are
    /// released. When unset, gamepad input is ignored.
    pub gamepad_expected: bool,

    /// Pixel wheel deltas are divided by this to get lines.
    pub pixels_per_line: f32,

    /// Stick deflection below this is reported as zero; the rest is rescaled to `[0, 1]`.
    pub stick_dead_zone: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            pointer_origin: PointerOrigin::TopLeft,
            text_mode: TextInputMode::CharacterStream,
            gamepad_expected: false,
            pixels_per_line: 20.0,
            stick_dead_zone: 0.2,
        }
    }
}
