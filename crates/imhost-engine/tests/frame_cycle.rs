//! Full overlay frame cycles against a scripted GUI and a recording host.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow, bail};

use imhost_engine::bridge::InputSample;
use imhost_engine::gui::{
    DrawCmd, DrawData, DrawVert, FontAtlasPixels, GuiInputSink, GuiKey, GuiMouseButton,
    ImmediateGui,
};
use imhost_engine::host::{
    FrameOutcome, HostRenderer, OverlayConfig, OverlayHost, SkipReason, ViewId, ViewInfo, ViewKind,
};
use imhost_engine::input::{InputEvent, InputFrame, InputState, PointerMoveEvent};
use imhost_engine::texture::TextureId;
use imhost_engine::translate::TranslatedFrame;

/// What the scripted GUI observed, shared with the test body.
#[derive(Debug, Default)]
struct Probe {
    created: usize,
    destroyed: usize,
    dts: Vec<f32>,
    display: Option<([f32; 2], [f32; 2])>,
    font_texture: Option<TextureId>,
    mouse: Vec<[f32; 2]>,
}

/// Per-frame UI handle: callbacks queue quads, each drawn with the given texture.
#[derive(Default)]
struct QuadUi {
    quads: Vec<([f32; 4], TextureId)>,
}

struct ScriptedGui {
    probe: Rc<RefCell<Probe>>,
    ui: QuadUi,
    atlas_pending: bool,
    font: TextureId,
}

impl ScriptedGui {
    fn new(probe: Rc<RefCell<Probe>>) -> Self {
        probe.borrow_mut().created += 1;
        Self {
            probe,
            ui: QuadUi::default(),
            atlas_pending: true,
            font: TextureId::NONE,
        }
    }
}

impl GuiInputSink for ScriptedGui {
    fn add_mouse_pos(&mut self, pos: [f32; 2]) {
        self.probe.borrow_mut().mouse.push(pos);
    }
    fn add_mouse_button(&mut self, _button: GuiMouseButton, _down: bool) {}
    fn add_mouse_wheel(&mut self, _delta: [f32; 2]) {}
    fn add_key(&mut self, _key: GuiKey, _down: bool) {}
    fn add_key_analog(&mut self, _key: GuiKey, _down: bool, _value: f32) {}
    fn add_char(&mut self, _c: char) {}
}

impl ImmediateGui for ScriptedGui {
    type Ui = QuadUi;

    fn activate(&mut self) {}

    fn set_delta_time(&mut self, dt: f32) {
        self.probe.borrow_mut().dts.push(dt);
    }

    fn set_display(&mut self, size: [f32; 2], framebuffer_scale: [f32; 2]) {
        self.probe.borrow_mut().display = Some((size, framebuffer_scale));
    }

    fn font_atlas(&mut self) -> Option<FontAtlasPixels> {
        self.atlas_pending.then(|| FontAtlasPixels {
            width: 2,
            height: 2,
            rgba: vec![255; 16],
        })
    }

    fn set_font_texture(&mut self, id: TextureId) {
        self.atlas_pending = false;
        self.font = id;
        self.probe.borrow_mut().font_texture = Some(id);
    }

    fn new_frame(&mut self) -> &mut QuadUi {
        self.ui.quads.clear();
        &mut self.ui
    }

    fn render_into(&mut self, out: &mut DrawData) {
        out.clear();
        out.display_pos = [0.0, 0.0];
        if let Some((size, scale)) = self.probe.borrow().display {
            out.display_size = size;
            out.framebuffer_scale = scale;
        }
        if self.ui.quads.is_empty() {
            return;
        }

        let list = out.push_list();
        for &([x0, y0, x1, y1], texture_id) in &self.ui.quads {
            let base = list.vtx.len() as u32;
            let idx_offset = list.idx.len() as u32;
            let white = [255, 255, 255, 255];
            list.vtx.extend([
                DrawVert::new([x0, y0], [0.0, 0.0], white),
                DrawVert::new([x1, y0], [1.0, 0.0], white),
                DrawVert::new([x1, y1], [1.0, 1.0], white),
                DrawVert::new([x0, y1], [0.0, 1.0], white),
            ]);
            list.idx.extend([0, 1, 2, 0, 2, 3].map(|i| base + i));
            list.cmds.push(DrawCmd {
                elem_count: 6,
                idx_offset,
                vtx_offset: 0,
                clip_rect: [x0, y0, x1, y1],
                texture_id,
            });
        }
    }

    fn destroy(self) -> Result<()> {
        self.probe.borrow_mut().destroyed += 1;
        Ok(())
    }
}

/// Records submissions as `(texture, index_count)` per batch.
#[derive(Default)]
struct RecordingHost {
    next_texture: u32,
    created: Vec<u32>,
    frames: Vec<Vec<(u32, u32)>>,
    fail_submit: bool,
}

impl HostRenderer for RecordingHost {
    type Texture = u32;

    fn create_texture(&mut self, pixels: &FontAtlasPixels) -> Result<u32> {
        assert!(pixels.is_valid());
        self.next_texture += 1;
        let tex = 100 + self.next_texture;
        self.created.push(tex);
        Ok(tex)
    }

    fn submit(&mut self, frame: &TranslatedFrame<'_, u32>) -> Result<()> {
        if self.fail_submit {
            bail!("device lost");
        }
        self.frames.push(
            frame
                .batches()
                .iter()
                .map(|b| (b.texture, b.index_count))
                .collect(),
        );
        Ok(())
    }
}

struct Rig {
    probe: Rc<RefCell<Probe>>,
    overlay: OverlayHost<ScriptedGui, u32>,
    host: RecordingHost,
    state: InputState,
    frame: InputFrame,
}

impl Rig {
    fn new() -> Self {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let for_factory = Rc::clone(&probe);
        let overlay = OverlayHost::new(OverlayConfig::default(), move || {
            Ok(ScriptedGui::new(Rc::clone(&for_factory)))
        });
        Self {
            probe,
            overlay,
            host: RecordingHost::default(),
            state: InputState::default(),
            frame: InputFrame::default(),
        }
    }

    fn draw_font_quad(&mut self) {
        self.overlay.register_callback(|ui: &mut QuadUi| {
            ui.quads.push(([10.0, 10.0, 110.0, 60.0], TextureId::NONE));
            Ok(())
        });
    }

    fn run(&mut self, view: &ViewInfo) -> FrameOutcome {
        let sample = InputSample::new(&self.state, &self.frame, 600.0);
        let outcome = self.overlay.render_view(view, &sample, &mut self.host);
        self.frame.clear();
        outcome
    }
}

fn game_view(frame_index: u64) -> ViewInfo {
    ViewInfo::game(ViewId(1), [800.0, 600.0], 1.0, frame_index)
}

#[test]
fn first_frame_uploads_font_atlas_and_draws() {
    let mut rig = Rig::new();
    rig.draw_font_quad();

    assert_eq!(rig.run(&game_view(0)), FrameOutcome::Rendered { batches: 1 });

    let font = rig.overlay.font_texture();
    assert!(!font.is_none());
    assert_eq!(rig.probe.borrow().font_texture, Some(font));
    assert_eq!(rig.overlay.registry().resolve(font), Some(&101));
    assert_eq!(rig.host.frames, vec![vec![(101, 6)]]);

    let probe = rig.probe.borrow();
    assert_eq!(probe.created, 1);
    assert!(probe.dts[0] > 0.0);
    assert_eq!(probe.display, Some(([800.0, 600.0], [1.0, 1.0])));
}

#[test]
fn atlas_is_uploaded_once() {
    let mut rig = Rig::new();
    rig.draw_font_quad();

    for i in 0..3 {
        rig.run(&game_view(i));
    }
    assert_eq!(rig.host.created, vec![101]);
    assert_eq!(rig.overlay.registry().len(), 1);
}

#[test]
fn user_textures_resolve_through_the_registry() {
    let mut rig = Rig::new();
    let image = rig.overlay.register_texture(&7);
    rig.overlay.register_callback(move |ui: &mut QuadUi| {
        ui.quads.push(([0.0, 0.0, 50.0, 50.0], TextureId::NONE));
        ui.quads.push(([60.0, 0.0, 110.0, 50.0], image));
        Ok(())
    });

    assert_eq!(rig.run(&game_view(0)), FrameOutcome::Rendered { batches: 2 });
    assert_eq!(rig.host.frames[0], vec![(101, 6), (7, 6)]);

    assert_eq!(rig.overlay.release_texture(image), Some(7));
    rig.run(&game_view(1));
    // The released id falls back to the font atlas.
    assert_eq!(rig.host.frames[1], vec![(101, 6), (101, 6)]);
}

#[test]
fn font_atlas_cannot_be_released() {
    let mut rig = Rig::new();
    rig.draw_font_quad();
    rig.run(&game_view(0));

    let font = rig.overlay.font_texture();
    assert_eq!(rig.overlay.release_texture(font), None);
    assert_eq!(rig.overlay.registry().resolve(font), Some(&101));
}

#[test]
fn releasing_the_null_handle_is_a_no_op() {
    let mut rig = Rig::new();
    rig.overlay.register_texture(&9);

    // Before the first frame the font atlas handle is also NONE.
    assert!(rig.overlay.font_texture().is_none());
    assert_eq!(rig.overlay.release_texture(TextureId::NONE), None);
    assert_eq!(rig.overlay.registry().len(), 1);

    rig.draw_font_quad();
    rig.run(&game_view(0));
    assert_eq!(rig.overlay.release_texture(TextureId::NONE), None);
    assert_eq!(rig.overlay.registry().len(), 2);
}

#[test]
fn one_draw_per_logical_frame() {
    let mut rig = Rig::new();
    rig.draw_font_quad();

    assert!(matches!(rig.run(&game_view(5)), FrameOutcome::Rendered { .. }));
    assert_eq!(
        rig.run(&game_view(5)),
        FrameOutcome::Skipped(SkipReason::AlreadyRendered)
    );
    assert!(matches!(rig.run(&game_view(6)), FrameOutcome::Rendered { .. }));
    assert_eq!(rig.host.frames.len(), 2);
}

#[test]
fn preview_views_are_rejected() {
    let mut rig = Rig::new();
    rig.draw_font_quad();

    let preview = ViewInfo {
        kind: ViewKind::EditorPreview,
        ..game_view(0)
    };
    assert_eq!(
        rig.run(&preview),
        FrameOutcome::Skipped(SkipReason::ViewRejected)
    );
    // A rejected view neither creates the context nor claims the frame.
    assert_eq!(rig.probe.borrow().created, 0);
    assert!(matches!(rig.run(&game_view(0)), FrameOutcome::Rendered { .. }));
}

#[test]
fn nothing_to_draw_without_callbacks() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.run(&game_view(0)),
        FrameOutcome::Skipped(SkipReason::NothingToDraw)
    );
    assert!(rig.overlay.is_active());
    assert!(rig.host.frames.is_empty());
}

#[test]
fn failing_callbacks_do_not_stop_the_frame() {
    let mut rig = Rig::new();
    rig.overlay
        .register_callback(|_ui: &mut QuadUi| Err(anyhow!("widget state corrupt")));
    rig.overlay.register_callback(|_ui: &mut QuadUi| {
        panic!("callback bug")
    });
    rig.draw_font_quad();

    assert_eq!(rig.run(&game_view(0)), FrameOutcome::Rendered { batches: 1 });
    assert_eq!(rig.run(&game_view(1)), FrameOutcome::Rendered { batches: 1 });
}

#[test]
fn unregistered_callbacks_stop_running() {
    let mut rig = Rig::new();
    let id = rig.overlay.register_callback(|ui: &mut QuadUi| {
        ui.quads.push(([0.0, 0.0, 10.0, 10.0], TextureId::NONE));
        Ok(())
    });

    assert!(matches!(rig.run(&game_view(0)), FrameOutcome::Rendered { .. }));
    assert!(rig.overlay.unregister_callback(id));
    assert!(!rig.overlay.unregister_callback(id));
    assert_eq!(
        rig.run(&game_view(1)),
        FrameOutcome::Skipped(SkipReason::NothingToDraw)
    );
}

#[test]
fn context_creation_is_retried() {
    let probe = Rc::new(RefCell::new(Probe::default()));
    let for_factory = Rc::clone(&probe);
    let mut attempts = 0;
    let mut overlay: OverlayHost<ScriptedGui, u32> =
        OverlayHost::new(OverlayConfig::default(), move || {
            attempts += 1;
            if attempts == 1 {
                bail!("no GPU context yet");
            }
            Ok(ScriptedGui::new(Rc::clone(&for_factory)))
        });
    overlay.register_callback(|ui: &mut QuadUi| {
        ui.quads.push(([0.0, 0.0, 10.0, 10.0], TextureId::NONE));
        Ok(())
    });

    let (state, frame) = (InputState::default(), InputFrame::default());
    let sample = InputSample::new(&state, &frame, 600.0);
    let mut host = RecordingHost::default();

    assert_eq!(
        overlay.render_view(&game_view(0), &sample, &mut host),
        FrameOutcome::Skipped(SkipReason::ContextUnavailable)
    );
    assert!(!overlay.is_active());

    assert!(matches!(
        overlay.render_view(&game_view(1), &sample, &mut host),
        FrameOutcome::Rendered { .. }
    ));
    assert_eq!(probe.borrow().created, 1);
}

#[test]
fn submit_failure_is_reported_and_recovers() {
    let mut rig = Rig::new();
    rig.draw_font_quad();

    rig.host.fail_submit = true;
    assert_eq!(rig.run(&game_view(0)), FrameOutcome::Failed);

    rig.host.fail_submit = false;
    assert!(matches!(rig.run(&game_view(1)), FrameOutcome::Rendered { .. }));
}

#[test]
fn pointer_reaches_the_gui_once_per_change() {
    let mut rig = Rig::new();
    rig.draw_font_quad();

    rig.run(&game_view(0));
    rig.state.apply_event(
        &mut rig.frame,
        InputEvent::PointerMoved(PointerMoveEvent { x: 40.0, y: 30.0 }),
    );
    rig.run(&game_view(1));
    rig.run(&game_view(2));

    let probe = rig.probe.borrow();
    let mouse = &probe.mouse;
    assert_eq!(mouse.first(), Some(&[-f32::MAX, -f32::MAX]));
    assert_eq!(mouse.last(), Some(&[40.0, 30.0]));
    assert_eq!(mouse.len(), 2);
}

#[test]
fn teardown_is_idempotent() {
    let mut rig = Rig::new();
    rig.draw_font_quad();
    rig.overlay.register_texture(&9);
    rig.run(&game_view(0));
    assert_eq!(rig.overlay.registry().len(), 2);

    rig.overlay.teardown();
    assert!(rig.overlay.registry().is_empty());
    assert!(!rig.overlay.is_active());
    assert!(rig.overlay.font_texture().is_none());

    rig.overlay.teardown();
    assert!(rig.overlay.registry().is_empty());
    assert_eq!(rig.probe.borrow().destroyed, 1);
}

#[test]
fn frame_after_teardown_starts_a_fresh_context() {
    let mut rig = Rig::new();
    rig.draw_font_quad();
    rig.run(&game_view(0));
    rig.overlay.teardown();

    // Same frame index as before teardown: the guard was reset.
    assert!(matches!(rig.run(&game_view(0)), FrameOutcome::Rendered { .. }));
    assert_eq!(rig.probe.borrow().created, 2);
    assert_eq!(rig.host.created, vec![101, 102]);
    assert!(rig.probe.borrow().dts.iter().all(|dt| *dt > 0.0));
}

#[test]
fn drop_destroys_the_context() {
    let mut rig = Rig::new();
    rig.draw_font_quad();
    rig.run(&game_view(0));

    let probe = Rc::clone(&rig.probe);
    drop(rig);
    assert_eq!(probe.borrow().destroyed, 1);
}
