use anyhow::Result;
use imgui::{DrawCmd as ImDrawCmd, DrawCmdParams};

use super::context::{FontAtlasPixels, GuiInputSink, ImmediateGui};
use super::draw_data::{DrawCmd, DrawData, DrawVert};
use super::key::{GuiKey, GuiMouseButton};
use crate::texture::TextureId;

/// Dear ImGui context behind the `ImmediateGui` boundary.
pub struct ImguiContext {
    ctx: imgui::Context,
    fonts_dirty: bool,
}

impl ImguiContext {
    /// Creates a context with no ini persistence and the default font.
    pub fn new() -> Result<Self> {
        let mut ctx = imgui::Context::create();
        ctx.set_ini_filename(None::<std::path::PathBuf>);

        let io = ctx.io_mut();
        io.backend_flags
            .insert(imgui::BackendFlags::RENDERER_HAS_VTX_OFFSET);

        ctx.fonts()
            .add_font(&[imgui::FontSource::DefaultFontData { config: None }]);

        Ok(Self {
            ctx,
            fonts_dirty: true,
        })
    }

    /// Style access. Does not touch the font atlas.
    pub fn style_mut(&mut self) -> &mut imgui::Style {
        self.ctx.style_mut()
    }

    /// Font atlas access; the atlas is rebuilt and re-uploaded before the next frame.
    pub fn fonts_mut(&mut self) -> &mut imgui::FontAtlas {
        self.fonts_dirty = true;
        self.ctx.fonts()
    }
}

impl GuiInputSink for ImguiContext {
    fn add_mouse_pos(&mut self, pos: [f32; 2]) {
        self.ctx.io_mut().add_mouse_pos_event(pos);
    }

    fn add_mouse_button(&mut self, button: GuiMouseButton, down: bool) {
        self.ctx
            .io_mut()
            .add_mouse_button_event(map_mouse_button(button), down);
    }

    fn add_mouse_wheel(&mut self, delta: [f32; 2]) {
        self.ctx.io_mut().add_mouse_wheel_event(delta);
    }

    fn add_key(&mut self, key: GuiKey, down: bool) {
        self.ctx.io_mut().add_key_event(map_key(key), down);
    }

    fn add_key_analog(&mut self, key: GuiKey, down: bool, value: f32) {
        self.ctx
            .io_mut()
            .add_key_analog_event(map_key(key), down, value);
    }

    fn add_char(&mut self, c: char) {
        self.ctx.io_mut().add_input_character(c);
    }
}

impl ImmediateGui for ImguiContext {
    type Ui = imgui::Ui;

    fn activate(&mut self) {
        // imgui-rs keeps the created context current until it is dropped.
    }

    fn set_delta_time(&mut self, dt: f32) {
        self.ctx.io_mut().delta_time = dt;
    }

    fn set_display(&mut self, size: [f32; 2], framebuffer_scale: [f32; 2]) {
        let io = self.ctx.io_mut();
        io.display_size = size;
        io.display_framebuffer_scale = framebuffer_scale;
    }

    fn font_atlas(&mut self) -> Option<FontAtlasPixels> {
        if !self.fonts_dirty {
            return None;
        }
        let tex = self.ctx.fonts().build_rgba32_texture();
        Some(FontAtlasPixels {
            width: tex.width,
            height: tex.height,
            rgba: tex.data.to_vec(),
        })
    }

    fn set_font_texture(&mut self, id: TextureId) {
        self.ctx.fonts().tex_id = imgui::TextureId::new(id.get());
        self.fonts_dirty = false;
    }

    fn new_frame(&mut self) -> &mut imgui::Ui {
        self.ctx.new_frame()
    }

    fn render_into(&mut self, out: &mut DrawData) {
        out.clear();

        let dd = self.ctx.render();
        out.display_pos = dd.display_pos;
        out.display_size = dd.display_size;
        out.framebuffer_scale = dd.framebuffer_scale;

        for src in dd.draw_lists() {
            let dst = out.push_list();

            dst.vtx.extend(
                src.vtx_buffer()
                    .iter()
                    .map(|v| DrawVert::new(v.pos, v.uv, v.col)),
            );
            dst.idx.extend(src.idx_buffer().iter().map(|&i| u32::from(i)));

            for cmd in src.commands() {
                match cmd {
                    ImDrawCmd::Elements {
                        count,
                        cmd_params:
                            DrawCmdParams {
                                clip_rect,
                                texture_id,
                                vtx_offset,
                                idx_offset,
                            },
                    } => dst.cmds.push(DrawCmd {
                        elem_count: count as u32,
                        idx_offset: idx_offset as u32,
                        vtx_offset: vtx_offset as u32,
                        clip_rect,
                        texture_id: TextureId(texture_id.id()),
                    }),
                    // No custom render-state or user callbacks are installed.
                    ImDrawCmd::ResetRenderState | ImDrawCmd::RawCallback { .. } => {
                        log::trace!("imgui: skipping non-geometry draw command");
                    }
                }
            }
        }
    }

    fn destroy(self) -> Result<()> {
        drop(self.ctx);
        Ok(())
    }
}

fn map_mouse_button(b: GuiMouseButton) -> imgui::MouseButton {
    match b {
        GuiMouseButton::Left => imgui::MouseButton::Left,
        GuiMouseButton::Right => imgui::MouseButton::Right,
        GuiMouseButton::Middle => imgui::MouseButton::Middle,
        GuiMouseButton::Extra1 => imgui::MouseButton::Extra1,
        GuiMouseButton::Extra2 => imgui::MouseButton::Extra2,
    }
}

fn map_key(k: GuiKey) -> imgui::Key {
    use imgui::Key as K;
    match k {
        GuiKey::Tab => K::Tab,
        GuiKey::LeftArrow => K::LeftArrow,
        GuiKey::RightArrow => K::RightArrow,
        GuiKey::UpArrow => K::UpArrow,
        GuiKey::DownArrow => K::DownArrow,
        GuiKey::PageUp => K::PageUp,
        GuiKey::PageDown => K::PageDown,
        GuiKey::Home => K::Home,
        GuiKey::End => K::End,
        GuiKey::Insert => K::Insert,
        GuiKey::Delete => K::Delete,
        GuiKey::Backspace => K::Backspace,
        GuiKey::Space => K::Space,
        GuiKey::Enter => K::Enter,
        GuiKey::Escape => K::Escape,
        GuiKey::LeftCtrl => K::LeftCtrl,
        GuiKey::LeftShift => K::LeftShift,
        GuiKey::LeftAlt => K::LeftAlt,
        GuiKey::LeftSuper => K::LeftSuper,
        GuiKey::RightCtrl => K::RightCtrl,
        GuiKey::RightShift => K::RightShift,
        GuiKey::RightAlt => K::RightAlt,
        GuiKey::RightSuper => K::RightSuper,
        GuiKey::Menu => K::Menu,
        GuiKey::Alpha0 => K::Alpha0,
        GuiKey::Alpha1 => K::Alpha1,
        GuiKey::Alpha2 => K::Alpha2,
        GuiKey::Alpha3 => K::Alpha3,
        GuiKey::Alpha4 => K::Alpha4,
        GuiKey::Alpha5 => K::Alpha5,
        GuiKey::Alpha6 => K::Alpha6,
        GuiKey::Alpha7 => K::Alpha7,
        GuiKey::Alpha8 => K::Alpha8,
        GuiKey::Alpha9 => K::Alpha9,
        GuiKey::A => K::A,
        GuiKey::B => K::B,
        GuiKey::C => K::C,
        GuiKey::D => K::D,
        GuiKey::E => K::E,
        GuiKey::F => K::F,
        GuiKey::G => K::G,
        GuiKey::H => K::H,
        GuiKey::I => K::I,
        GuiKey::J => K::J,
        GuiKey::K => K::K,
        GuiKey::L => K::L,
        GuiKey::M => K::M,
        GuiKey::N => K::N,
        GuiKey::O => K::O,
        GuiKey::P => K::P,
        GuiKey::Q => K::Q,
        GuiKey::R => K::R,
        GuiKey::S => K::S,
        GuiKey::T => K::T,
        GuiKey::U => K::U,
        GuiKey::V => K::V,
        GuiKey::W => K::W,
        GuiKey::X => K::X,
        GuiKey::Y => K::Y,
        GuiKey::Z => K::Z,
        GuiKey::F1 => K::F1,
        GuiKey::F2 => K::F2,
        GuiKey::F3 => K::F3,
        GuiKey::F4 => K::F4,
        GuiKey::F5 => K::F5,
        GuiKey::F6 => K::F6,
        GuiKey::F7 => K::F7,
        GuiKey::F8 => K::F8,
        GuiKey::F9 => K::F9,
        GuiKey::F10 => K::F10,
        GuiKey::F11 => K::F11,
        GuiKey::F12 => K::F12,
        GuiKey::Apostrophe => K::Apostrophe,
        GuiKey::Comma => K::Comma,
        GuiKey::Minus => K::Minus,
        GuiKey::Period => K::Period,
        GuiKey::Slash => K::Slash,
        GuiKey::Semicolon => K::Semicolon,
        GuiKey::Equal => K::Equal,
        GuiKey::LeftBracket => K::LeftBracket,
        GuiKey::Backslash => K::Backslash,
        GuiKey::RightBracket => K::RightBracket,
        GuiKey::GraveAccent => K::GraveAccent,
        GuiKey::CapsLock => K::CapsLock,
        GuiKey::ScrollLock => K::ScrollLock,
        GuiKey::NumLock => K::NumLock,
        GuiKey::PrintScreen => K::PrintScreen,
        GuiKey::Pause => K::Pause,
        GuiKey::Keypad0 => K::Keypad0,
        GuiKey::Keypad1 => K::Keypad1,
        GuiKey::Keypad2 => K::Keypad2,
        GuiKey::Keypad3 => K::Keypad3,
        GuiKey::Keypad4 => K::Keypad4,
        GuiKey::Keypad5 => K::Keypad5,
        GuiKey::Keypad6 => K::Keypad6,
        GuiKey::Keypad7 => K::Keypad7,
        GuiKey::Keypad8 => K::Keypad8,
        GuiKey::Keypad9 => K::Keypad9,
        GuiKey::KeypadDecimal => K::KeypadDecimal,
        GuiKey::KeypadDivide => K::KeypadDivide,
        GuiKey::KeypadMultiply => K::KeypadMultiply,
        GuiKey::KeypadSubtract => K::KeypadSubtract,
        GuiKey::KeypadAdd => K::KeypadAdd,
        GuiKey::KeypadEnter => K::KeypadEnter,
        GuiKey::KeypadEqual => K::KeypadEqual,
        GuiKey::GamepadStart => K::GamepadStart,
        GuiKey::GamepadBack => K::GamepadBack,
        GuiKey::GamepadFaceLeft => K::GamepadFaceLeft,
        GuiKey::GamepadFaceRight => K::GamepadFaceRight,
        GuiKey::GamepadFaceUp => K::GamepadFaceUp,
        GuiKey::GamepadFaceDown => K::GamepadFaceDown,
        GuiKey::GamepadDpadLeft => K::GamepadDpadLeft,
        GuiKey::GamepadDpadRight => K::GamepadDpadRight,
        GuiKey::GamepadDpadUp => K::GamepadDpadUp,
        GuiKey::GamepadDpadDown => K::GamepadDpadDown,
        GuiKey::GamepadL1 => K::GamepadL1,
        GuiKey::GamepadR1 => K::GamepadR1,
        GuiKey::GamepadL2 => K::GamepadL2,
        GuiKey::GamepadR2 => K::GamepadR2,
        GuiKey::GamepadL3 => K::GamepadL3,
        GuiKey::GamepadR3 => K::GamepadR3,
        GuiKey::GamepadLStickLeft => K::GamepadLStickLeft,
        GuiKey::GamepadLStickRight => K::GamepadLStickRight,
        GuiKey::GamepadLStickUp => K::GamepadLStickUp,
        GuiKey::GamepadLStickDown => K::GamepadLStickDown,
        GuiKey::GamepadRStickLeft => K::GamepadRStickLeft,
        GuiKey::GamepadRStickRight => K::GamepadRStickRight,
        GuiKey::GamepadRStickUp => K::GamepadRStickUp,
        GuiKey::GamepadRStickDown => K::GamepadRStickDown,
        GuiKey::ModCtrl => K::ModCtrl,
        GuiKey::ModShift => K::ModShift,
        GuiKey::ModAlt => K::ModAlt,
        GuiKey::ModSuper => K::ModSuper,
    }
}
