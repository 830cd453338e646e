use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state as reported by the platform.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while the pointer is outside the surface.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                frame.focus_changed = Some(*f);
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                    for button in self.buttons_down.drain() {
                        frame.buttons_released.insert(button);
                    }
                    self.modifiers = Modifiers::default();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                frame.pointer_left = true;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.accumulate_wheel(*delta);
            }

            InputEvent::Text(t) => frame.text.push(t.clone()),
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Modifier state combined from the platform flags and the held modifier keys.
    pub fn effective_modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.modifiers.shift
                || self.key_down(Key::ShiftLeft)
                || self.key_down(Key::ShiftRight),
            ctrl: self.modifiers.ctrl
                || self.key_down(Key::ControlLeft)
                || self.key_down(Key::ControlRight),
            alt: self.modifiers.alt || self.key_down(Key::AltLeft) || self.key_down(Key::AltRight),
            meta: self.modifiers.meta
                || self.key_down(Key::MetaLeft)
                || self.key_down(Key::MetaRight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseWheelDelta, TextEvent};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn press_release_records_transitions_once() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::A, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::A, KeyState::Pressed));
        assert!(st.key_down(Key::A));
        assert_eq!(fr.keys_pressed.len(), 1);

        st.apply_event(&mut fr, key(Key::A, KeyState::Released));
        assert!(!st.key_down(Key::A));
        assert!(fr.keys_released.contains(&Key::A));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::ShiftLeft, KeyState::Pressed));
        fr.clear();
        st.apply_event(&mut fr, InputEvent::Focused(false));

        assert!(st.keys_down.is_empty());
        assert!(fr.keys_released.contains(&Key::ShiftLeft));
        assert_eq!(fr.focus_changed, Some(false));
    }

    #[test]
    fn wheel_is_summed_and_text_collected() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let m = Modifiers::default();

        st.apply_event(&mut fr, InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 }, modifiers: m });
        st.apply_event(&mut fr, InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: 2.0 }, modifiers: m });
        st.apply_event(&mut fr, InputEvent::MouseWheel { delta: MouseWheelDelta::Pixel { x: 4.0, y: 0.0 }, modifiers: m });
        st.apply_event(&mut fr, InputEvent::Text(TextEvent { text: "hi".into() }));

        assert_eq!(fr.wheel_lines, [0.0, 3.0]);
        assert_eq!(fr.wheel_pixels, [4.0, 0.0]);
        assert_eq!(fr.chars().collect::<String>(), "hi");
    }

    #[test]
    fn effective_modifiers_or_keys_and_flags() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::ControlRight, KeyState::Pressed));
        let m = st.effective_modifiers();
        assert!(m.ctrl);
        assert!(!m.shift);
    }
}
