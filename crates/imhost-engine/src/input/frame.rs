use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, MouseWheelDelta, TextEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, pointer position).
/// `InputFrame` provides events, transition sets and accumulated deltas for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Text committed this frame.
    pub text: Vec<TextEvent>,

    /// Wheel movement in lines, summed over the frame.
    pub wheel_lines: [f32; 2],

    /// Wheel movement in logical pixels, summed over the frame.
    pub wheel_pixels: [f32; 2],

    /// Pointer left the surface at some point this frame.
    pub pointer_left: bool,

    /// Last focus change reported this frame.
    pub focus_changed: Option<bool>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.text.clear();
        self.wheel_lines = [0.0; 2];
        self.wheel_pixels = [0.0; 2];
        self.pointer_left = false;
        self.focus_changed = None;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub(crate) fn accumulate_wheel(&mut self, delta: MouseWheelDelta) {
        match delta {
            MouseWheelDelta::Line { x, y } => {
                self.wheel_lines[0] += x;
                self.wheel_lines[1] += y;
            }
            MouseWheelDelta::Pixel { x, y } => {
                self.wheel_pixels[0] += x;
                self.wheel_pixels[1] += y;
            }
        }
    }

    /// Characters committed this frame, in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.iter().flat_map(|t| t.text.chars())
    }
}
