use anyhow::Result;

use crate::animation::{FrameRequest, FrameScheduler};
use crate::coords::{Vec2, Viewport};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime translates window and GPU lifecycle into these calls. All
/// coordinates are logical pixels.
pub trait App {
    /// Called once the window and its GPU surface exist.
    ///
    /// `viewport` is `None` when no drawing surface could be created; the
    /// app is expected to refuse to start and return an error.
    fn on_surface_ready(
        &mut self,
        viewport: Option<Viewport>,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<()>;

    /// Called when the drawable area changes size.
    fn on_resize(&mut self, viewport: Viewport, scheduler: &mut dyn FrameScheduler) {
        let _ = (viewport, scheduler);
    }

    fn on_pointer_moved(&mut self, pos: Vec2) {
        let _ = pos;
    }

    /// Called before the runtime shuts down. Outstanding frames must be cancelled.
    fn on_stop(&mut self, scheduler: &mut dyn FrameScheduler);

    /// Called for each frame request the app made and did not cancel.
    fn on_frame(&mut self, request: FrameRequest, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
