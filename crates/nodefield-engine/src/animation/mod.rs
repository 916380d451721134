//! Animation loop: owns the node field and drives it once per scheduled frame.

mod engine;
mod schedule;

pub use engine::AnimationEngine;
pub use schedule::{FrameRequest, FrameScheduler, QueuedScheduler};
