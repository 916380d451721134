use super::config::FieldConfig;
use super::node::Node;

/// A link between two nodes that are close enough this frame.
///
/// Indices refer to the node slice the edge was computed from, with `a < b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

/// Link opacity for two nodes `distance` apart, or `None` when they are not linked.
///
/// Linear falloff: `link_max_opacity` at zero distance, 0 at `link_distance`.
#[inline]
pub fn link_opacity(distance: f32, config: &FieldConfig) -> Option<f32> {
    if distance < config.link_distance {
        Some((1.0 - distance / config.link_distance) * config.link_max_opacity)
    } else {
        None
    }
}

/// Rebuilds `out` with every linked pair, in `(a, b)` lexicographic order.
///
/// Brute force over all pairs. The node count is bounded by surface area, so
/// this stays cheap at display sizes.
pub fn compute_edges(nodes: &[Node], config: &FieldConfig, out: &mut Vec<Edge>) {
    out.clear();

    for (a, na) in nodes.iter().enumerate() {
        for (offset, nb) in nodes[a + 1..].iter().enumerate() {
            let distance = na.pos.distance(nb.pos);
            if let Some(opacity) = link_opacity(distance, config) {
                out.push(Edge {
                    a,
                    b: a + 1 + offset,
                    distance,
                    opacity,
                });
            }
        }
    }
}

/// Allocating form of [`compute_edges`].
pub fn proximity_edges(nodes: &[Node], config: &FieldConfig) -> Vec<Edge> {
    let mut out = Vec::new();
    compute_edges(nodes, config, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Viewport};
    use crate::graph::field::NodeField;
    use crate::graph::palette::WHITE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn still(x: f32, y: f32) -> Node {
        Node {
            pos: Vec2::new(x, y),
            vel: Vec2::zero(),
            radius: 2.0,
            base_opacity: 0.5,
            phase: 0.0,
            color: WHITE,
        }
    }

    #[test]
    fn pair_at_distance_100_is_linked() {
        let cfg = FieldConfig::default();
        let edges = proximity_edges(&[still(0.0, 0.0), still(60.0, 80.0)], &cfg);

        assert_eq!(edges.len(), 1);
        let e = edges[0];
        assert_eq!((e.a, e.b), (0, 1));
        assert_eq!(e.distance, 100.0);
        assert!((e.opacity - 0.133_333).abs() < 1e-5);
    }

    #[test]
    fn threshold_is_exclusive() {
        let cfg = FieldConfig::default();
        assert!(proximity_edges(&[still(0.0, 0.0), still(150.0, 0.0)], &cfg).is_empty());
        assert_eq!(proximity_edges(&[still(0.0, 0.0), still(149.5, 0.0)], &cfg).len(), 1);
    }

    #[test]
    fn coincident_nodes_get_max_opacity() {
        let cfg = FieldConfig::default();
        let edges = proximity_edges(&[still(5.0, 5.0), still(5.0, 5.0)], &cfg);
        assert_eq!(edges[0].opacity, 0.4);
    }

    #[test]
    fn edges_match_brute_force_definition() {
        let cfg = FieldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let field = NodeField::populate(Viewport::new(600.0, 400.0), &cfg, &mut rng);
        let nodes = field.nodes();
        let edges = proximity_edges(nodes, &cfg);

        let mut expected = 0;
        for i in 0..nodes.len() {
            for j in i + 1..nodes.len() {
                let d = nodes[i].pos.distance(nodes[j].pos);
                let found = edges.iter().find(|e| e.a == i && e.b == j);
                if d < 150.0 {
                    expected += 1;
                    let e = found.expect("missing edge");
                    assert_eq!(e.opacity, (1.0 - d / 150.0) * 0.4);
                } else {
                    assert!(found.is_none());
                }
            }
        }
        assert_eq!(edges.len(), expected);
    }

    #[test]
    fn compute_edges_replaces_previous_contents() {
        let cfg = FieldConfig::default();
        let mut out = proximity_edges(&[still(0.0, 0.0), still(1.0, 0.0)], &cfg);
        compute_edges(&[still(0.0, 0.0), still(500.0, 0.0)], &cfg, &mut out);
        assert!(out.is_empty());
    }
}
