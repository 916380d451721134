//! nodefield engine crate.
//!
//! The node field simulation (`graph`, `animation`) is plain data + math and
//! draws through the `surface::Surface` trait. The platform + GPU runtime
//! pieces (`window`, `device`, `render`, `core`) put it on screen.

pub mod animation;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod graph;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod surface;
pub mod time;
pub mod window;
