use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::bridge::InputSample;
use crate::coords::{ColorRgba, Viewport};
use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::gui::ImmediateGui;
use crate::host::{FrameOutcome, OverlayHost, ViewId, ViewInfo};
use crate::input::platform::winit::apply_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::{GpuTexture, OverlayRenderer, RenderCtx, RenderTarget, WgpuHost};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "imhost".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Runs one window with an overlay drawn over the application's scene.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `overlay` every frame until the window closes.
    ///
    /// The overlay is torn down before the window and its GPU resources go away.
    pub fn run<A, G>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        overlay: OverlayHost<G, GpuTexture>,
        app: A,
    ) -> Result<()>
    where
        A: App,
        G: ImmediateGui,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState {
            config,
            gpu_init,
            app,
            overlay,
            renderer: OverlayRenderer::new(),
            surface: None,
            frame_index: 0,
            last_outcome: None,
            exiting: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct Surface {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A, G>
where
    G: ImmediateGui,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    overlay: OverlayHost<G, GpuTexture>,
    renderer: OverlayRenderer,
    surface: Option<Surface>,

    /// Logical frame counter handed to the overlay's once-per-frame guard.
    frame_index: u64,
    last_outcome: Option<FrameOutcome>,
    exiting: bool,
}

impl<A, G> RuntimeState<A, G>
where
    A: App,
    G: ImmediateGui,
{
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let surface = SurfaceTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        surface.with_window(|w| {
            log::info!("runtime: window {:?} open", w.id());
            w.request_redraw();
        });
        self.surface = Some(surface);
        Ok(())
    }

    /// Tears the overlay down while the device is still alive, then drops the window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exiting {
            log::info!("runtime: shutting down");
            self.overlay.teardown();
            self.surface = None;
            self.exiting = true;
        }
        event_loop.exit();
    }

    fn redraw(&mut self, window_id: WindowId) -> AppControl {
        let Self {
            app,
            overlay,
            renderer,
            surface,
            frame_index,
            last_outcome,
            ..
        } = self;
        let Some(surface) = surface.as_mut() else {
            return AppControl::Continue;
        };

        let index = *frame_index;
        *frame_index += 1;

        surface.with_mut(|f| {
            let time = f.clock.tick();
            let win = WindowCtx {
                id: window_id,
                window: f.window,
            };
            let (_, logical_h) = win.logical_size();
            let (pw, ph) = win.physical_size();
            let scale = win.scale_factor();

            let mut frame = match f.gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    log::debug!("runtime: surface error {err:?}");
                    f.input_frame.clear();
                    return match f.gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => {
                            log::error!("runtime: fatal surface error");
                            AppControl::Exit
                        }
                        _ => AppControl::Continue,
                    };
                }
            };
            clear_pass(&mut frame, app.clear_color());

            let rctx = RenderCtx::new(
                f.gpu.device(),
                f.gpu.queue(),
                f.gpu.surface_format(),
                Viewport::new(pw / scale, ph / scale),
                scale,
            );

            let control = {
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);

                let control = app.on_frame(&mut FrameCtx {
                    window: win,
                    input: f.input_state,
                    input_frame: f.input_frame,
                    time,
                    render: &rctx,
                    target: &mut target,
                });

                let gamepad = app.gamepad();
                let view = ViewInfo::game(ViewId(u64::from(window_id)), [pw, ph], scale, index);
                let sample = InputSample::new(f.input_state, f.input_frame, logical_h)
                    .with_gamepad(gamepad.as_ref());
                let outcome = overlay.render_view(
                    &view,
                    &sample,
                    &mut WgpuHost::new(renderer, &rctx, &mut target),
                );

                if *last_outcome != Some(outcome) {
                    log::debug!("runtime: overlay {outcome:?}");
                    *last_outcome = Some(outcome);
                }
                control
            };

            f.window.pre_present_notify();
            f.gpu.submit(frame);
            f.input_frame.clear();
            control
        })
    }
}

impl<A, G> ApplicationHandler for RuntimeState<A, G>
where
    A: App,
    G: ImmediateGui,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() || self.exiting {
            return;
        }
        if let Err(e) = self.open(event_loop) {
            log::error!("runtime: {e:#}");
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        // Immediate-mode GUIs redraw every frame.
        if let Some(surface) = &self.surface {
            surface.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.with_mut(|f| {
            apply_window_event(f.window, f.input_state, f.input_frame, &event);
        });

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.with_mut(|f| {
                        f.gpu.resize(f.window.inner_size());
                        f.window.request_redraw();
                    });
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw(window_id) == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }
}

fn clear_pass(frame: &mut GpuFrame, color: ColorRgba) {
    let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("imhost clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: color.r as f64,
                    g: color.g as f64,
                    b: color.b as f64,
                    a: color.a as f64,
                }),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
