//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! turns window lifecycle into `core::App` calls.

mod runtime;

pub use runtime::{RedrawScheduler, Runtime, RuntimeConfig};
