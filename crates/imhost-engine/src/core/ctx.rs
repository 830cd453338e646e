use winit::window::{Window, WindowId};

use crate::input::{InputFrame, InputState};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

/// The window being drawn.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        (logi.width as f32, logi.height as f32)
    }

    /// Physical window size as `(width, height)`.
    pub fn physical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        (phys.width as f32, phys.height as f32)
    }

    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }
}

/// Per-frame context passed to `App::on_frame`.
///
/// The target is already cleared; whatever the app records here ends up under the overlay.
/// `'r` is the borrow of the device and of the frame's encoder.
pub struct FrameCtx<'a, 'r> {
    pub window: WindowCtx<'a>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub render: &'a RenderCtx<'r>,
    pub target: &'a mut RenderTarget<'r>,
}
