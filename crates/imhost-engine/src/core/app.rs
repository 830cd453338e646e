use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::coords::ColorRgba;
use crate::input::GamepadState;

/// Returned by app hooks to keep the window open or shut it down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The host application under the overlay.
///
/// Every hook has a default, so an overlay-only tool implements nothing. Per frame the
/// runtime clears to `clear_color`, calls `on_frame` to draw the scene, then draws the
/// overlay on top and presents.
pub trait App {
    fn clear_color(&self) -> ColorRgba {
        ColorRgba::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Sees every window event after the input subsystem has recorded it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Draws the host scene into the frame's target.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Gamepad snapshot for this frame; `None` when no pad is connected.
    fn gamepad(&mut self) -> Option<GamepadState> {
        None
    }
}
