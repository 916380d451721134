//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the app driving the node field. It keeps winit and wgpu details out of the
//! app and gives it one consistent per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};

pub(crate) use ctx::logical_viewport;
