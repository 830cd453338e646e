use std::collections::HashSet;

/// Gamepad button identifier, named by position (Xbox / PlayStation agnostic).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GamepadButton {
    Start,
    Back,
    FaceLeft,
    FaceRight,
    FaceUp,
    FaceDown,
    DpadLeft,
    DpadRight,
    DpadUp,
    DpadDown,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    LeftStick,
    RightStick,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 16] = [
        GamepadButton::Start,
        GamepadButton::Back,
        GamepadButton::FaceLeft,
        GamepadButton::FaceRight,
        GamepadButton::FaceUp,
        GamepadButton::FaceDown,
        GamepadButton::DpadLeft,
        GamepadButton::DpadRight,
        GamepadButton::DpadUp,
        GamepadButton::DpadDown,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::LeftTrigger,
        GamepadButton::RightTrigger,
        GamepadButton::LeftStick,
        GamepadButton::RightStick,
    ];
}

/// Snapshot of one connected gamepad.
///
/// The windowing layer has no gamepad source; hosts fill this from their own backend
/// (gilrs, a console SDK, ...) once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub buttons_down: HashSet<GamepadButton>,

    /// Left stick, each axis in `[-1, 1]`, +y up.
    pub left_stick: [f32; 2],

    /// Right stick, each axis in `[-1, 1]`, +y up.
    pub right_stick: [f32; 2],
}

impl GamepadState {
    pub fn button_down(&self, b: GamepadButton) -> bool {
        self.buttons_down.contains(&b)
    }
}
