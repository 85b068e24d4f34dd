use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// What the application wants the event loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The contract between an application and the runtime's event loop.
///
/// Only [`on_frame`](App::on_frame) is required; the other hooks have
/// do-nothing defaults.
pub trait App {
    /// Raw window events, delivered before the runtime's own handling.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// One call per redraw of a window. Drawing happens through
    /// [`FrameCtx::render`].
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The device behind the window is going away, on suspend or exit.
    /// Anything holding GPU objects must release them here; they are
    /// rebuilt lazily against the next device.
    fn on_device_lost(&mut self) {}
}
