use crate::input::{GamepadButton, Key, MouseButton};

/// Mouse buttons as the GUI knows them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GuiMouseButton {
    Left,
    Right,
    Middle,
    Extra1,
    Extra2,
}

impl GuiMouseButton {
    pub const ALL: [GuiMouseButton; 5] = [
        GuiMouseButton::Left,
        GuiMouseButton::Right,
        GuiMouseButton::Middle,
        GuiMouseButton::Extra1,
        GuiMouseButton::Extra2,
    ];

    /// The host button this GUI button listens to.
    pub fn host_button(self) -> MouseButton {
        match self {
            GuiMouseButton::Left => MouseButton::Left,
            GuiMouseButton::Right => MouseButton::Right,
            GuiMouseButton::Middle => MouseButton::Middle,
            GuiMouseButton::Extra1 => MouseButton::Back,
            GuiMouseButton::Extra2 => MouseButton::Forward,
        }
    }
}

/// Keys the GUI input queue understands.
///
/// `Mod*` are the combined modifier states; the side-specific keys are separate entries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GuiKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftSuper,
    RightCtrl,
    RightShift,
    RightAlt,
    RightSuper,
    Menu,
    Alpha0, Alpha1, Alpha2, Alpha3, Alpha4,
    Alpha5, Alpha6, Alpha7, Alpha8, Alpha9,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Keypad0, Keypad1, Keypad2, Keypad3, Keypad4,
    Keypad5, Keypad6, Keypad7, Keypad8, Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,

    GamepadStart,
    GamepadBack,
    GamepadFaceLeft,
    GamepadFaceRight,
    GamepadFaceUp,
    GamepadFaceDown,
    GamepadDpadLeft,
    GamepadDpadRight,
    GamepadDpadUp,
    GamepadDpadDown,
    GamepadL1,
    GamepadR1,
    GamepadL2,
    GamepadR2,
    GamepadL3,
    GamepadR3,
    GamepadLStickLeft,
    GamepadLStickRight,
    GamepadLStickUp,
    GamepadLStickDown,
    GamepadRStickLeft,
    GamepadRStickRight,
    GamepadRStickUp,
    GamepadRStickDown,

    ModCtrl,
    ModShift,
    ModAlt,
    ModSuper,
}

impl GuiKey {
    /// Maps a host keyboard key. `None` for keys the GUI has no slot for.
    pub fn from_key(key: Key) -> Option<GuiKey> {
        let k = match key {
            Key::Escape => GuiKey::Escape,
            Key::Enter => GuiKey::Enter,
            Key::Tab => GuiKey::Tab,
            Key::Backspace => GuiKey::Backspace,
            Key::Space => GuiKey::Space,

            Key::Insert => GuiKey::Insert,
            Key::Delete => GuiKey::Delete,
            Key::Home => GuiKey::Home,
            Key::End => GuiKey::End,
            Key::PageUp => GuiKey::PageUp,
            Key::PageDown => GuiKey::PageDown,

            Key::ArrowUp => GuiKey::UpArrow,
            Key::ArrowDown => GuiKey::DownArrow,
            Key::ArrowLeft => GuiKey::LeftArrow,
            Key::ArrowRight => GuiKey::RightArrow,

            Key::CapsLock => GuiKey::CapsLock,
            Key::ScrollLock => GuiKey::ScrollLock,
            Key::NumLock => GuiKey::NumLock,
            Key::PrintScreen => GuiKey::PrintScreen,
            Key::Pause => GuiKey::Pause,
            Key::ContextMenu => GuiKey::Menu,

            Key::ShiftLeft => GuiKey::LeftShift,
            Key::ShiftRight => GuiKey::RightShift,
            Key::ControlLeft => GuiKey::LeftCtrl,
            Key::ControlRight => GuiKey::RightCtrl,
            Key::AltLeft => GuiKey::LeftAlt,
            Key::AltRight => GuiKey::RightAlt,
            Key::MetaLeft => GuiKey::LeftSuper,
            Key::MetaRight => GuiKey::RightSuper,

            Key::A => GuiKey::A,
            Key::B => GuiKey::B,
            Key::C => GuiKey::C,
            Key::D => GuiKey::D,
            Key::E => GuiKey::E,
            Key::F => GuiKey::F,
            Key::G => GuiKey::G,
            Key::H => GuiKey::H,
            Key::I => GuiKey::I,
            Key::J => GuiKey::J,
            Key::K => GuiKey::K,
            Key::L => GuiKey::L,
            Key::M => GuiKey::M,
            Key::N => GuiKey::N,
            Key::O => GuiKey::O,
            Key::P => GuiKey::P,
            Key::Q => GuiKey::Q,
            Key::R => GuiKey::R,
            Key::S => GuiKey::S,
            Key::T => GuiKey::T,
            Key::U => GuiKey::U,
            Key::V => GuiKey::V,
            Key::W => GuiKey::W,
            Key::X => GuiKey::X,
            Key::Y => GuiKey::Y,
            Key::Z => GuiKey::Z,

            Key::Digit0 => GuiKey::Alpha0,
            Key::Digit1 => GuiKey::Alpha1,
            Key::Digit2 => GuiKey::Alpha2,
            Key::Digit3 => GuiKey::Alpha3,
            Key::Digit4 => GuiKey::Alpha4,
            Key::Digit5 => GuiKey::Alpha5,
            Key::Digit6 => GuiKey::Alpha6,
            Key::Digit7 => GuiKey::Alpha7,
            Key::Digit8 => GuiKey::Alpha8,
            Key::Digit9 => GuiKey::Alpha9,

            Key::F1 => GuiKey::F1,
            Key::F2 => GuiKey::F2,
            Key::F3 => GuiKey::F3,
            Key::F4 => GuiKey::F4,
            Key::F5 => GuiKey::F5,
            Key::F6 => GuiKey::F6,
            Key::F7 => GuiKey::F7,
            Key::F8 => GuiKey::F8,
            Key::F9 => GuiKey::F9,
            Key::F10 => GuiKey::F10,
            Key::F11 => GuiKey::F11,
            Key::F12 => GuiKey::F12,

            Key::Apostrophe => GuiKey::Apostrophe,
            Key::Comma => GuiKey::Comma,
            Key::Minus => GuiKey::Minus,
            Key::Period => GuiKey::Period,
            Key::Slash => GuiKey::Slash,
            Key::Semicolon => GuiKey::Semicolon,
            Key::Equal => GuiKey::Equal,
            Key::BracketLeft => GuiKey::LeftBracket,
            Key::Backslash => GuiKey::Backslash,
            Key::BracketRight => GuiKey::RightBracket,
            Key::Backquote => GuiKey::GraveAccent,

            Key::Numpad0 => GuiKey::Keypad0,
            Key::Numpad1 => GuiKey::Keypad1,
            Key::Numpad2 => GuiKey::Keypad2,
            Key::Numpad3 => GuiKey::Keypad3,
            Key::Numpad4 => GuiKey::Keypad4,
            Key::Numpad5 => GuiKey::Keypad5,
            Key::Numpad6 => GuiKey::Keypad6,
            Key::Numpad7 => GuiKey::Keypad7,
            Key::Numpad8 => GuiKey::Keypad8,
            Key::Numpad9 => GuiKey::Keypad9,
            Key::NumpadDecimal => GuiKey::KeypadDecimal,
            Key::NumpadDivide => GuiKey::KeypadDivide,
            Key::NumpadMultiply => GuiKey::KeypadMultiply,
            Key::NumpadSubtract => GuiKey::KeypadSubtract,
            Key::NumpadAdd => GuiKey::KeypadAdd,
            Key::NumpadEnter => GuiKey::KeypadEnter,
            Key::NumpadEqual => GuiKey::KeypadEqual,

            Key::Unknown(_) => return None,
        };
        Some(k)
    }

    pub fn from_gamepad(button: GamepadButton) -> GuiKey {
        match button {
            GamepadButton::Start => GuiKey::GamepadStart,
            GamepadButton::Back => GuiKey::GamepadBack,
            GamepadButton::FaceLeft => GuiKey::GamepadFaceLeft,
            GamepadButton::FaceRight => GuiKey::GamepadFaceRight,
            GamepadButton::FaceUp => GuiKey::GamepadFaceUp,
            GamepadButton::FaceDown => GuiKey::GamepadFaceDown,
            GamepadButton::DpadLeft => GuiKey::GamepadDpadLeft,
            GamepadButton::DpadRight => GuiKey::GamepadDpadRight,
            GamepadButton::DpadUp => GuiKey::GamepadDpadUp,
            GamepadButton::DpadDown => GuiKey::GamepadDpadDown,
            GamepadButton::LeftShoulder => GuiKey::GamepadL1,
            GamepadButton::RightShoulder => GuiKey::GamepadR1,
            GamepadButton::LeftTrigger => GuiKey::GamepadL2,
            GamepadButton::RightTrigger => GuiKey::GamepadR2,
            GamepadButton::LeftStick => GuiKey::GamepadL3,
            GamepadButton::RightStick => GuiKey::GamepadR3,
        }
    }

    pub fn is_gamepad(self) -> bool {
        matches!(
            self,
            GuiKey::GamepadStart
                | GuiKey::GamepadBack
                | GuiKey::GamepadFaceLeft
                | GuiKey::GamepadFaceRight
                | GuiKey::GamepadFaceUp
                | GuiKey::GamepadFaceDown
                | GuiKey::GamepadDpadLeft
                | GuiKey::GamepadDpadRight
                | GuiKey::GamepadDpadUp
                | GuiKey::GamepadDpadDown
                | GuiKey::GamepadL1
                | GuiKey::GamepadR1
                | GuiKey::GamepadL2
                | GuiKey::GamepadR2
                | GuiKey::GamepadL3
                | GuiKey::GamepadR3
                | GuiKey::GamepadLStickLeft
                | GuiKey::GamepadLStickRight
                | GuiKey::GamepadLStickUp
                | GuiKey::GamepadLStickDown
                | GuiKey::GamepadRStickLeft
                | GuiKey::GamepadRStickRight
                | GuiKey::GamepadRStickUp
                | GuiKey::GamepadRStickDown
        )
    }
}
