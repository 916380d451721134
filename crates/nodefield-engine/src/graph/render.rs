use crate::coords::Vec2;
use crate::paint::{Color, Paint, RadialGradient};
use crate::surface::Surface;

use super::config::FieldConfig;
use super::node::Node;
use super::proximity::Edge;

/// How a node looks this frame, after pulse and pointer emphasis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeAppearance {
    /// May exceed 1.0 near the pointer; clamped when turned into a color.
    pub opacity: f32,
    pub radius: f32,
    /// Pointer proximity factor in [0, 1]; 0 outside the pointer radius.
    pub proximity: f32,
}

impl NodeAppearance {
    pub fn of(node: &Node, pointer: Vec2, config: &FieldConfig) -> Self {
        let pulse = node.phase.sin() as f32 * config.pulse_amplitude + config.pulse_base;
        let mut opacity = node.base_opacity * pulse;
        let mut radius = node.radius;
        let mut proximity = 0.0;

        let d = node.pos.distance(pointer);
        if d < config.pointer_radius {
            proximity = (config.pointer_radius - d) / config.pointer_radius;
            opacity += proximity * config.pointer_opacity_boost;
            radius += proximity * config.pointer_radius_boost;
        }

        Self {
            opacity,
            radius,
            proximity,
        }
    }
}

/// Draws one frame of the field.
///
/// Paint order: clear, every edge, then each node as glow followed by its
/// disc. Later nodes cover earlier ones and their glows.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    nodes: &[Node],
    edges: &[Edge],
    pointer: Vec2,
    config: &FieldConfig,
) {
    surface.clear();

    for edge in edges {
        let (Some(a), Some(b)) = (nodes.get(edge.a), nodes.get(edge.b)) else {
            log::debug!("skipping edge {}-{} outside node set", edge.a, edge.b);
            continue;
        };
        surface.draw_line(
            a.pos,
            b.pos,
            Color::from_straight(1.0, 1.0, 1.0, edge.opacity),
            config.link_width,
        );
    }

    for node in nodes {
        let look = NodeAppearance::of(node, pointer, config);
        let glow_radius = look.radius * config.glow_scale;

        let glow = RadialGradient::fade(
            node.pos,
            glow_radius,
            node.color.with_alpha(look.opacity * config.glow_alpha),
            Color::transparent(),
        );
        surface.fill_circle(node.pos, glow_radius, Paint::RadialGradient(glow));
        surface.fill_circle(node.pos, look.radius, Paint::solid(node.color.with_alpha(look.opacity)));
    }
}
