//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.
//! - All lines are drawn before all circles; within a shape kind, draw-list
//!   order is kept, since instances of one draw call blend in order.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
