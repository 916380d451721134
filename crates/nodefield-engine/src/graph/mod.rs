//! Node field simulation: the animated proximity graph.
//!
//! One frame is `NodeField::step` → `compute_edges` → `render_frame`.
//! Everything here is deterministic given the random source handed to
//! `NodeField::populate`.

pub mod config;
pub mod field;
pub mod node;
pub mod palette;
pub mod proximity;
pub mod render;

pub use config::FieldConfig;
pub use field::{NodeField, node_count};
pub use node::Node;
pub use palette::Rgb;
pub use proximity::{Edge, compute_edges, link_opacity, proximity_edges};
pub use render::{NodeAppearance, render_frame};
