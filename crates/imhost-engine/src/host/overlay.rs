use std::hash::Hash;
use std::panic::{AssertUnwindSafe, catch_unwind};

use anyhow::{Result, bail};

use super::callbacks::{CallbackId, CallbackList, panic_message};
use super::config::OverlayConfig;
use super::renderer::HostRenderer;
use super::view::ViewInfo;
use crate::bridge::{InputBridge, InputSample};
use crate::gui::{DrawData, FontAtlasPixels, ImmediateGui};
use crate::texture::{TextureId, TextureRegistry};
use crate::time::FrameClock;
use crate::translate::Translator;

/// Why `render_view` did not draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// The view policy does not select this view.
    ViewRejected,
    /// The overlay already ran for this logical frame.
    AlreadyRendered,
    /// The GUI context could not be created; retried next frame.
    ContextUnavailable,
    /// The GUI produced no visible geometry.
    NothingToDraw,
}

/// Result of one `render_view` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Rendered { batches: usize },
    Skipped(SkipReason),
    /// The host rejected the submission. Logged; the next frame proceeds normally.
    Failed,
}

type Factory<G> = Box<dyn FnMut() -> Result<G>>;

/// Owns an immediate-mode GUI context and drives it once per logical frame.
///
/// The context is created lazily by the factory on the first accepted frame and destroyed
/// by `teardown()` (or on drop). Nothing here returns errors to the frame loop: failures
/// are logged and reported through `FrameOutcome`.
pub struct OverlayHost<G, T>
where
    G: ImmediateGui,
{
    config: OverlayConfig,
    factory: Factory<G>,
    gui: Option<G>,

    clock: FrameClock,
    bridge: InputBridge,
    translator: Translator<T>,
    registry: TextureRegistry<T>,
    callbacks: CallbackList<G::Ui>,

    draw_data: DrawData,
    font_texture: TextureId,
    last_frame: Option<u64>,
}

impl<G, T> OverlayHost<G, T>
where
    G: ImmediateGui,
    T: Clone + Eq + Hash,
{
    pub fn new(config: OverlayConfig, factory: impl FnMut() -> Result<G> + 'static) -> Self {
        Self {
            clock: FrameClock::with_clamps(config.dt_min, config.dt_max),
            bridge: InputBridge::new(config.bridge),
            translator: Translator::new(config.translator),
            registry: TextureRegistry::new(),
            callbacks: CallbackList::new(),
            factory: Box::new(factory),
            gui: None,
            draw_data: DrawData::new(),
            font_texture: TextureId::NONE,
            last_frame: None,
            config,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Adds a UI callback, run every frame between `new_frame` and `render`.
    pub fn register_callback(
        &mut self,
        f: impl FnMut(&mut G::Ui) -> Result<()> + 'static,
    ) -> CallbackId {
        self.callbacks.register(f)
    }

    pub fn unregister_callback(&mut self, id: CallbackId) -> bool {
        self.callbacks.unregister(id)
    }

    /// Makes a host texture drawable by the GUI; pass the returned id to image widgets.
    pub fn register_texture(&mut self, texture: &T) -> TextureId {
        self.registry.get_or_create(texture)
    }

    pub fn release_texture(&mut self, id: TextureId) -> Option<T> {
        if id.is_none() {
            return None;
        }
        if id == self.font_texture {
            log::warn!("overlay: refusing to release the font atlas texture");
            return None;
        }
        self.registry.remove(id)
    }

    pub fn registry(&self) -> &TextureRegistry<T> {
        &self.registry
    }

    /// Handle of the uploaded font atlas, `TextureId::NONE` before the first upload.
    pub fn font_texture(&self) -> TextureId {
        self.font_texture
    }

    pub fn is_active(&self) -> bool {
        self.gui.is_some()
    }

    /// Runs one overlay frame for `view` and submits it to `host`.
    pub fn render_view<R>(
        &mut self,
        view: &ViewInfo,
        input: &InputSample<'_>,
        host: &mut R,
    ) -> FrameOutcome
    where
        R: HostRenderer<Texture = T>,
    {
        if !self.config.view_policy.accepts(view) {
            log::trace!("overlay: view {:?} rejected by policy", view.id);
            return FrameOutcome::Skipped(SkipReason::ViewRejected);
        }
        if self.last_frame == Some(view.frame_index) {
            log::trace!("overlay: frame {} already rendered", view.frame_index);
            return FrameOutcome::Skipped(SkipReason::AlreadyRendered);
        }
        self.last_frame = Some(view.frame_index);

        if !self.ensure_context() {
            return FrameOutcome::Skipped(SkipReason::ContextUnavailable);
        }
        let Some(gui) = self.gui.as_mut() else {
            return FrameOutcome::Skipped(SkipReason::ContextUnavailable);
        };

        gui.activate();

        let ft = self.clock.tick();
        gui.set_delta_time(ft.dt);

        let (display_size, fb_scale) = view.display_metrics();
        gui.set_display(display_size, fb_scale);

        self.bridge.sample(input, &mut *gui);

        if let Some(atlas) = gui.font_atlas() {
            match upload_font_atlas(host, &mut self.registry, self.font_texture, &atlas) {
                Ok(id) => {
                    gui.set_font_texture(id);
                    self.font_texture = id;
                }
                Err(e) => log::warn!("overlay: font atlas upload failed: {e:#}"),
            }
        }

        let ui = gui.new_frame();
        self.callbacks.invoke_all(ui);
        gui.render_into(&mut self.draw_data);

        let frame = self
            .translator
            .translate(&self.draw_data, &self.registry, self.font_texture);

        if frame.is_empty() {
            return FrameOutcome::Skipped(SkipReason::NothingToDraw);
        }

        let batches = frame.batches().len();
        match host.submit(&frame) {
            Ok(()) => FrameOutcome::Rendered { batches },
            Err(e) => {
                log::warn!("overlay: submit failed: {e:#}");
                FrameOutcome::Failed
            }
        }
    }

    /// Destroys the context and forgets every per-context resource.
    ///
    /// Safe to call any number of times. Destruction failures are logged, never propagated.
    /// Registered callbacks survive; a later `render_view` creates a fresh context.
    pub fn teardown(&mut self) {
        if let Some(gui) = self.gui.take() {
            match catch_unwind(AssertUnwindSafe(move || gui.destroy())) {
                Ok(Ok(())) => log::info!("overlay: GUI context destroyed"),
                Ok(Err(e)) => log::warn!("overlay: GUI context destroy failed: {e:#}"),
                Err(payload) => log::warn!(
                    "overlay: GUI context destroy panicked: {}",
                    panic_message(&*payload)
                ),
            }
        }

        self.registry.clear();
        self.bridge.reset();
        self.draw_data.clear();
        self.font_texture = TextureId::NONE;
        self.last_frame = None;
    }

    fn ensure_context(&mut self) -> bool {
        if self.gui.is_some() {
            return true;
        }

        let factory = &mut self.factory;
        match catch_unwind(AssertUnwindSafe(|| factory())) {
            Ok(Ok(gui)) => {
                log::info!("overlay: GUI context created");
                self.gui = Some(gui);
                self.clock.reset();
                true
            }
            Ok(Err(e)) => {
                log::warn!("overlay: GUI context creation failed: {e:#}");
                false
            }
            Err(payload) => {
                log::warn!(
                    "overlay: GUI context creation panicked: {}",
                    panic_message(&*payload)
                );
                false
            }
        }
    }
}

impl<G, T> Drop for OverlayHost<G, T>
where
    G: ImmediateGui,
{
    fn drop(&mut self) {
        if let Some(gui) = self.gui.take() {
            if let Err(e) = catch_unwind(AssertUnwindSafe(move || gui.destroy()))
                .unwrap_or_else(|_| Err(anyhow::anyhow!("destroy panicked")))
            {
                log::warn!("overlay: GUI context destroy failed on drop: {e:#}");
            }
        }
    }
}

fn upload_font_atlas<R>(
    host: &mut R,
    registry: &mut TextureRegistry<R::Texture>,
    previous: TextureId,
    atlas: &FontAtlasPixels,
) -> Result<TextureId>
where
    R: HostRenderer,
{
    if !atlas.is_valid() {
        bail!(
            "font atlas {}x{} with {} bytes is not tightly packed RGBA8",
            atlas.width,
            atlas.height,
            atlas.rgba.len()
        );
    }

    let texture = host.create_texture(atlas)?;
    if !previous.is_none() {
        registry.remove(previous);
    }
    let id = registry.get_or_create(&texture);
    log::debug!("overlay: font atlas {}x{} uploaded as {:?}", atlas.width, atlas.height, id);
    Ok(id)
}
