use std::collections::{HashMap, HashSet};

use super::config::{BridgeConfig, PointerOrigin, TextInputMode};
use crate::gui::{GuiInputSink, GuiKey, GuiMouseButton};
use crate::input::{
    GamepadButton, GamepadState, InputEvent, InputFrame, InputState, Key, KeyState, Modifiers,
};

/// Pointer position the GUI reads as "no pointer".
const POINTER_ABSENT: [f32; 2] = [-f32::MAX, -f32::MAX];

/// Everything the bridge reads for one frame.
#[derive(Debug, Copy, Clone)]
pub struct InputSample<'a> {
    pub state: &'a InputState,
    pub frame: &'a InputFrame,
    /// `None` when no gamepad is connected.
    pub gamepad: Option<&'a GamepadState>,
    /// Window height in the same units as pointer positions.
    pub window_height: f32,
}

impl<'a> InputSample<'a> {
    pub fn new(state: &'a InputState, frame: &'a InputFrame, window_height: f32) -> Self {
        Self {
            state,
            frame,
            gamepad: None,
            window_height,
        }
    }

    pub fn with_gamepad(mut self, gamepad: Option<&'a GamepadState>) -> Self {
        self.gamepad = gamepad;
        self
    }
}

/// Edge-triggered forwarder from host input to a GUI input queue.
///
/// Remembers what it last told the GUI and emits an event only when the host state differs,
/// so held keys produce one press and one release no matter how many frames they span.
#[derive(Debug, Default)]
pub struct InputBridge {
    config: BridgeConfig,

    pointer_sent: Option<[f32; 2]>,
    buttons_sent: HashSet<GuiMouseButton>,
    keys_sent: HashSet<Key>,
    mods_sent: Modifiers,
    pad_sent: HashSet<GuiKey>,
    analog_sent: HashMap<GuiKey, f32>,
}

impl InputBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Forwards one frame of host input.
    pub fn sample(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        if input.frame.focus_changed == Some(false) {
            log::debug!("input bridge: focus lost, releasing tracked input");
            self.release_all(sink);
        }

        self.sample_pointer(input, sink);
        self.sample_buttons(input, sink);
        self.sample_wheel(input, sink);
        self.sample_modifiers(input, sink);
        self.sample_keys(input, sink);
        self.sample_text(input, sink);

        if self.config.gamepad_expected {
            match input.gamepad {
                Some(pad) => self.sample_gamepad(pad, sink),
                None => self.release_gamepad(sink),
            }
        }
    }

    /// Sends a release for everything currently reported as held.
    pub fn release_all(&mut self, sink: &mut dyn GuiInputSink) {
        for button in self.buttons_sent.drain() {
            sink.add_mouse_button(button, false);
        }
        for key in self.keys_sent.drain() {
            if let Some(gk) = GuiKey::from_key(key) {
                sink.add_key(gk, false);
            }
        }
        let mods = std::mem::take(&mut self.mods_sent);
        for (gk, down) in modifier_keys(mods) {
            if down {
                sink.add_key(gk, false);
            }
        }
        self.release_gamepad(sink);
    }

    /// Forgets all tracked state without emitting anything.
    ///
    /// Used when the GUI context is torn down: the next context starts with nothing held.
    pub fn reset(&mut self) {
        self.pointer_sent = None;
        self.buttons_sent.clear();
        self.keys_sent.clear();
        self.mods_sent = Modifiers::default();
        self.pad_sent.clear();
        self.analog_sent.clear();
    }

    fn sample_pointer(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        let pos = match input.state.pointer_pos {
            Some((x, y)) => match self.config.pointer_origin {
                PointerOrigin::TopLeft => [x, y],
                PointerOrigin::BottomLeft => [x, input.window_height - y],
            },
            None => POINTER_ABSENT,
        };

        if self.pointer_sent != Some(pos) {
            sink.add_mouse_pos(pos);
            self.pointer_sent = Some(pos);
        }
    }

    fn sample_buttons(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        for button in GuiMouseButton::ALL {
            let host = button.host_button();
            let held = input.state.button_down(host);

            // Pressed and released within one frame still counts as a click.
            let pressed = held || input.frame.buttons_pressed.contains(&host);
            if pressed && self.buttons_sent.insert(button) {
                sink.add_mouse_button(button, true);
            }
            if !held && self.buttons_sent.remove(&button) {
                sink.add_mouse_button(button, false);
            }
        }
    }

    fn sample_wheel(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        let ppl = self.config.pixels_per_line;
        let [lx, ly] = input.frame.wheel_lines;
        let [px, py] = input.frame.wheel_pixels;

        let (mut x, mut y) = (lx, ly);
        if ppl > 0.0 {
            x += px / ppl;
            y += py / ppl;
        }

        if x != 0.0 || y != 0.0 {
            sink.add_mouse_wheel([x, y]);
        }
    }

    fn sample_modifiers(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        let now = input.state.effective_modifiers();
        if now == self.mods_sent {
            return;
        }
        for ((gk, was), (_, is)) in modifier_keys(self.mods_sent).into_iter().zip(modifier_keys(now)) {
            if was != is {
                sink.add_key(gk, is);
            }
        }
        self.mods_sent = now;
    }

    fn sample_keys(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        let state = input.state;
        let frame = input.frame;

        for &key in state.keys_down.iter().chain(frame.keys_pressed.iter()) {
            let Some(gk) = GuiKey::from_key(key) else {
                continue;
            };
            if self.keys_sent.insert(key) {
                sink.add_key(gk, true);
            }
        }

        self.keys_sent.retain(|key| {
            if state.key_down(*key) {
                return true;
            }
            if let Some(gk) = GuiKey::from_key(*key) {
                sink.add_key(gk, false);
            }
            false
        });
    }

    fn sample_text(&mut self, input: &InputSample<'_>, sink: &mut dyn GuiInputSink) {
        match self.config.text_mode {
            TextInputMode::CharacterStream => {
                for c in input.frame.chars() {
                    sink.add_char(c);
                }
            }
            TextInputMode::KeyCodeFallback => {
                for ev in &input.frame.events {
                    let InputEvent::Key {
                        key,
                        state: KeyState::Pressed,
                        modifiers,
                        ..
                    } = ev
                    else {
                        continue;
                    };
                    let Some(c) = key.ascii() else {
                        continue;
                    };
                    let shift = modifiers.shift || input.state.effective_modifiers().shift;
                    sink.add_char(if shift { c.to_ascii_uppercase() } else { c });
                }
            }
        }
    }

    fn sample_gamepad(&mut self, pad: &GamepadState, sink: &mut dyn GuiInputSink) {
        for button in GamepadButton::ALL {
            let gk = GuiKey::from_gamepad(button);
            let down = pad.button_down(button);
            if down && self.pad_sent.insert(gk) {
                sink.add_key(gk, true);
            } else if !down && self.pad_sent.remove(&gk) {
                sink.add_key(gk, false);
            }
        }

        let [lx, ly] = pad.left_stick;
        let [rx, ry] = pad.right_stick;
        let directions = [
            (GuiKey::GamepadLStickLeft, -lx),
            (GuiKey::GamepadLStickRight, lx),
            (GuiKey::GamepadLStickUp, ly),
            (GuiKey::GamepadLStickDown, -ly),
            (GuiKey::GamepadRStickLeft, -rx),
            (GuiKey::GamepadRStickRight, rx),
            (GuiKey::GamepadRStickUp, ry),
            (GuiKey::GamepadRStickDown, -ry),
        ];

        for (gk, raw) in directions {
            let value = apply_dead_zone(raw, self.config.stick_dead_zone);
            let last = self.analog_sent.get(&gk).copied().unwrap_or(0.0);
            if value == last {
                continue;
            }
            sink.add_key_analog(gk, value > 0.0, value);
            if value > 0.0 {
                self.analog_sent.insert(gk, value);
            } else {
                self.analog_sent.remove(&gk);
            }
        }
    }

    fn release_gamepad(&mut self, sink: &mut dyn GuiInputSink) {
        if self.pad_sent.is_empty() && self.analog_sent.is_empty() {
            return;
        }
        log::debug!("input bridge: gamepad gone, releasing {} keys", self.pad_sent.len() + self.analog_sent.len());
        for gk in self.pad_sent.drain() {
            sink.add_key(gk, false);
        }
        for (gk, _) in self.analog_sent.drain() {
            sink.add_key_analog(gk, false, 0.0);
        }
    }
}

fn modifier_keys(m: Modifiers) -> [(GuiKey, bool); 4] {
    [
        (GuiKey::ModCtrl, m.ctrl),
        (GuiKey::ModShift, m.shift),
        (GuiKey::ModAlt, m.alt),
        (GuiKey::ModSuper, m.meta),
    ]
}

fn apply_dead_zone(v: f32, dead_zone: f32) -> f32 {
    if !v.is_finite() || v <= dead_zone {
        return 0.0;
    }
    let span = 1.0 - dead_zone;
    if span <= 0.0 {
        return 1.0;
    }
    ((v - dead_zone) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent, TextEvent};

    #[derive(Debug, Clone, PartialEq)]
    enum Ev {
        Pos([f32; 2]),
        Button(GuiMouseButton, bool),
        Wheel([f32; 2]),
        Key(GuiKey, bool),
        Analog(GuiKey, bool, f32),
        Char(char),
    }

    #[derive(Default)]
    struct Recorder(Vec<Ev>);

    impl GuiInputSink for Recorder {
        fn add_mouse_pos(&mut self, pos: [f32; 2]) {
            self.0.push(Ev::Pos(pos));
        }
        fn add_mouse_button(&mut self, button: GuiMouseButton, down: bool) {
            self.0.push(Ev::Button(button, down));
        }
        fn add_mouse_wheel(&mut self, delta: [f32; 2]) {
            self.0.push(Ev::Wheel(delta));
        }
        fn add_key(&mut self, key: GuiKey, down: bool) {
            self.0.push(Ev::Key(key, down));
        }
        fn add_key_analog(&mut self, key: GuiKey, down: bool, value: f32) {
            self.0.push(Ev::Analog(key, down, value));
        }
        fn add_char(&mut self, c: char) {
            self.0.push(Ev::Char(c));
        }
    }

    /// Host-side input for a test: applies events, then samples one frame.
    struct Host {
        state: InputState,
        frame: InputFrame,
    }

    impl Host {
        fn new() -> Self {
            Self {
                state: InputState::default(),
                frame: InputFrame::default(),
            }
        }

        fn push(&mut self, ev: InputEvent) {
            self.state.apply_event(&mut self.frame, ev);
        }

        fn key(&mut self, key: Key, state: KeyState, modifiers: Modifiers) {
            self.push(InputEvent::Key { key, state, modifiers, code: 0, repeat: false });
        }

        fn button(&mut self, button: MouseButton, state: MouseButtonState) {
            let (x, y) = self.state.pointer_pos.unwrap_or((0.0, 0.0));
            self.push(InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers: Modifiers::default(),
            }));
        }

        fn frame(&mut self, bridge: &mut InputBridge, pad: Option<&GamepadState>) -> Vec<Ev> {
            let mut rec = Recorder::default();
            let sample = InputSample::new(&self.state, &self.frame, 600.0).with_gamepad(pad);
            bridge.sample(&sample, &mut rec);
            self.frame.clear();
            rec.0
        }
    }

    fn without_pointer(evs: Vec<Ev>) -> Vec<Ev> {
        evs.into_iter().filter(|e| !matches!(e, Ev::Pos(_))).collect()
    }

    #[test]
    fn bottom_left_origin_flips_y() {
        let mut bridge = InputBridge::new(BridgeConfig {
            pointer_origin: PointerOrigin::BottomLeft,
            ..BridgeConfig::default()
        });
        let mut host = Host::new();

        host.push(InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 0.0 }));
        assert_eq!(host.frame(&mut bridge, None), vec![Ev::Pos([10.0, 600.0])]);

        host.push(InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 600.0 }));
        assert_eq!(host.frame(&mut bridge, None), vec![Ev::Pos([10.0, 0.0])]);
    }

    #[test]
    fn top_left_origin_passes_through_and_dedups() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();

        host.push(InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 }));
        assert_eq!(host.frame(&mut bridge, None), vec![Ev::Pos([10.0, 20.0])]);
        assert!(host.frame(&mut bridge, None).is_empty());
    }

    #[test]
    fn pointer_leave_reports_absent() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();

        host.push(InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 1.0 }));
        host.frame(&mut bridge, None);
        host.push(InputEvent::PointerLeft);
        assert_eq!(host.frame(&mut bridge, None), vec![Ev::Pos(POINTER_ABSENT)]);
    }

    #[test]
    fn held_key_is_reported_once() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();
        let m = Modifiers::default();

        host.key(Key::Tab, KeyState::Pressed, m);
        assert_eq!(without_pointer(host.frame(&mut bridge, None)), vec![Ev::Key(GuiKey::Tab, true)]);
        assert!(without_pointer(host.frame(&mut bridge, None)).is_empty());

        host.key(Key::Tab, KeyState::Released, m);
        assert_eq!(without_pointer(host.frame(&mut bridge, None)), vec![Ev::Key(GuiKey::Tab, false)]);
    }

    #[test]
    fn click_within_one_frame_is_not_lost() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();

        host.button(MouseButton::Left, MouseButtonState::Pressed);
        host.button(MouseButton::Left, MouseButtonState::Released);
        assert_eq!(
            without_pointer(host.frame(&mut bridge, None)),
            vec![
                Ev::Button(GuiMouseButton::Left, true),
                Ev::Button(GuiMouseButton::Left, false)
            ]
        );
    }

    #[test]
    fn modifiers_combine_sides_and_flags() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();

        host.key(Key::ShiftRight, KeyState::Pressed, Modifiers::default());
        let evs = without_pointer(host.frame(&mut bridge, None));
        assert_eq!(evs[0], Ev::Key(GuiKey::ModShift, true));
        assert!(evs.contains(&Ev::Key(GuiKey::RightShift, true)));

        // Platform flag alone is enough for the combined state.
        host.push(InputEvent::ModifiersChanged(Modifiers { ctrl: true, ..Modifiers::default() }));
        let evs = without_pointer(host.frame(&mut bridge, None));
        assert_eq!(evs, vec![Ev::Key(GuiKey::ModCtrl, true)]);
    }

    #[test]
    fn wheel_pixels_become_lines() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();
        let m = Modifiers::default();

        host.push(InputEvent::MouseWheel { delta: crate::input::MouseWheelDelta::Line { x: 0.0, y: 1.0 }, modifiers: m });
        host.push(InputEvent::MouseWheel { delta: crate::input::MouseWheelDelta::Pixel { x: 0.0, y: 40.0 }, modifiers: m });
        assert_eq!(without_pointer(host.frame(&mut bridge, None)), vec![Ev::Wheel([0.0, 3.0])]);
    }

    #[test]
    fn character_stream_forwards_text() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();
        host.push(InputEvent::Text(TextEvent { text: "hé".into() }));
        assert_eq!(
            without_pointer(host.frame(&mut bridge, None)),
            vec![Ev::Char('h'), Ev::Char('é')]
        );
    }

    #[test]
    fn key_code_fallback_rebuilds_ascii() {
        let mut bridge = InputBridge::new(BridgeConfig {
            text_mode: TextInputMode::KeyCodeFallback,
            ..BridgeConfig::default()
        });
        let mut host = Host::new();
        let shift = Modifiers { shift: true, ..Modifiers::default() };

        host.key(Key::A, KeyState::Pressed, shift);
        host.key(Key::Digit1, KeyState::Pressed, Modifiers::default());
        host.key(Key::Comma, KeyState::Pressed, Modifiers::default());
        host.push(InputEvent::Text(TextEvent { text: "ignored".into() }));

        let chars: Vec<_> = host
            .frame(&mut bridge, None)
            .into_iter()
            .filter_map(|e| match e {
                Ev::Char(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(chars, vec!['A', '1']);
    }

    #[test]
    fn gamepad_disconnect_releases_once() {
        let mut bridge = InputBridge::new(BridgeConfig {
            gamepad_expected: true,
            ..BridgeConfig::default()
        });
        let mut host = Host::new();

        let mut pad = GamepadState::default();
        pad.buttons_down.insert(GamepadButton::FaceDown);
        let evs = without_pointer(host.frame(&mut bridge, Some(&pad)));
        assert_eq!(evs, vec![Ev::Key(GuiKey::GamepadFaceDown, true)]);

        let evs = without_pointer(host.frame(&mut bridge, None));
        assert_eq!(evs, vec![Ev::Key(GuiKey::GamepadFaceDown, false)]);

        assert!(without_pointer(host.frame(&mut bridge, None)).is_empty());
    }

    #[test]
    fn gamepad_ignored_unless_expected() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();
        let mut pad = GamepadState::default();
        pad.buttons_down.insert(GamepadButton::Start);
        assert!(without_pointer(host.frame(&mut bridge, Some(&pad))).is_empty());
    }

    #[test]
    fn stick_dead_zone_and_rescale() {
        let mut bridge = InputBridge::new(BridgeConfig {
            gamepad_expected: true,
            stick_dead_zone: 0.2,
            ..BridgeConfig::default()
        });
        let mut host = Host::new();

        let mut pad = GamepadState::default();
        pad.left_stick = [0.1, 0.0];
        assert!(without_pointer(host.frame(&mut bridge, Some(&pad))).is_empty());

        pad.left_stick = [1.0, 0.0];
        assert_eq!(
            without_pointer(host.frame(&mut bridge, Some(&pad))),
            vec![Ev::Analog(GuiKey::GamepadLStickRight, true, 1.0)]
        );

        pad.left_stick = [0.0, 0.0];
        assert_eq!(
            without_pointer(host.frame(&mut bridge, Some(&pad))),
            vec![Ev::Analog(GuiKey::GamepadLStickRight, false, 0.0)]
        );
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();

        host.key(Key::A, KeyState::Pressed, Modifiers::default());
        host.button(MouseButton::Right, MouseButtonState::Pressed);
        host.frame(&mut bridge, None);

        host.push(InputEvent::Focused(false));
        let evs = without_pointer(host.frame(&mut bridge, None));
        assert!(evs.contains(&Ev::Key(GuiKey::A, false)));
        assert!(evs.contains(&Ev::Button(GuiMouseButton::Right, false)));
        assert_eq!(evs.len(), 2);
    }

    #[test]
    fn reset_forgets_without_emitting() {
        let mut bridge = InputBridge::default();
        let mut host = Host::new();
        host.key(Key::A, KeyState::Pressed, Modifiers::default());
        host.frame(&mut bridge, None);

        bridge.reset();
        // Still held on the host: a fresh context gets a fresh press.
        let evs = without_pointer(host.frame(&mut bridge, None));
        assert_eq!(evs, vec![Ev::Key(GuiKey::A, true)]);
    }
}
