use rand::Rng;

use crate::coords::Viewport;

use super::config::FieldConfig;
use super::node::Node;

/// Number of nodes for a surface: `max(min_nodes, floor(area / area_per_node))`.
///
/// Degenerate viewports are clamped to one pixel per axis first.
pub fn node_count(viewport: Viewport, config: &FieldConfig) -> usize {
    let v = viewport.clamped_min_pixel();
    let area = v.width as f64 * v.height as f64;
    let scaled = (area / config.area_per_node as f64).floor();
    let scaled = if scaled.is_finite() && scaled > 0.0 { scaled as usize } else { 0 };
    scaled.max(config.min_nodes)
}

/// The set of nodes living on one surface size.
///
/// A field is never resized in place: a new surface size means a new field.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeField {
    bounds: Viewport,
    nodes: Vec<Node>,
}

impl NodeField {
    /// An empty field, used before the host surface exists.
    pub fn empty() -> Self {
        Self {
            bounds: Viewport::new(1.0, 1.0),
            nodes: Vec::new(),
        }
    }

    /// Creates a fresh batch of randomly placed nodes for `viewport`.
    pub fn populate<R: Rng + ?Sized>(viewport: Viewport, config: &FieldConfig, rng: &mut R) -> Self {
        let bounds = viewport.clamped_min_pixel();
        if bounds != viewport {
            log::warn!(
                "degenerate surface {}x{} clamped to {}x{}",
                viewport.width,
                viewport.height,
                bounds.width,
                bounds.height
            );
        }

        let count = node_count(bounds, config);
        let nodes = (0..count)
            .map(|_| Node::random(bounds, config, rng))
            .collect::<Vec<_>>();

        log::info!("created {} nodes for {}x{}", nodes.len(), bounds.width, bounds.height);

        Self { bounds, nodes }
    }

    #[inline]
    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Advances every node by one frame.
    pub fn step(&mut self, config: &FieldConfig) {
        let bounds = self.bounds;
        for node in &mut self.nodes {
            node.step(bounds, config.phase_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0xC0FFEE)
    }

    // ── node_count ────────────────────────────────────────────────────────

    #[test]
    fn small_surfaces_get_the_minimum() {
        let cfg = FieldConfig::default();
        assert_eq!(node_count(Viewport::new(800.0, 600.0), &cfg), 40);
    }

    #[test]
    fn large_surfaces_scale_with_area() {
        let cfg = FieldConfig::default();
        // 1920 * 1080 / 20000 = 103.68
        assert_eq!(node_count(Viewport::new(1920.0, 1080.0), &cfg), 103);
        // 2000 * 2000 / 20000 = 200 exactly
        assert_eq!(node_count(Viewport::new(2000.0, 2000.0), &cfg), 200);
    }

    #[test]
    fn degenerate_surfaces_get_the_minimum() {
        let cfg = FieldConfig::default();
        assert_eq!(node_count(Viewport::new(0.0, 0.0), &cfg), 40);
        assert_eq!(node_count(Viewport::new(-10.0, 500.0), &cfg), 40);
        assert_eq!(node_count(Viewport::new(f32::NAN, 500.0), &cfg), 40);
    }

    // ── populate ──────────────────────────────────────────────────────────

    #[test]
    fn populate_matches_node_count_for_many_sizes() {
        let cfg = FieldConfig::default();
        let mut rng = rng();
        for (w, h) in [(320.0, 240.0), (1280.0, 720.0), (2560.0, 1440.0), (3000.0, 100.0)] {
            let v = Viewport::new(w, h);
            let field = NodeField::populate(v, &cfg, &mut rng);
            let expected = 40usize.max((w as f64 * h as f64 / 20_000.0).floor() as usize);
            assert_eq!(field.len(), expected);
            assert!(field.nodes().iter().all(|n| v.contains(n.pos)));
        }
    }

    #[test]
    fn populate_on_zero_surface_collapses_into_one_pixel() {
        let cfg = FieldConfig::default();
        let field = NodeField::populate(Viewport::new(0.0, 0.0), &cfg, &mut rng());
        assert_eq!(field.len(), 40);
        assert_eq!(field.bounds(), Viewport::new(1.0, 1.0));
        assert!(field.nodes().iter().all(|n| n.pos.x <= 1.0 && n.pos.y <= 1.0));
    }

    // ── step ──────────────────────────────────────────────────────────────

    #[test]
    fn positions_stay_in_bounds_and_speeds_are_preserved() {
        let cfg = FieldConfig::default();
        let v = Viewport::new(200.0, 150.0);
        let mut field = NodeField::populate(v, &cfg, &mut rng());
        let speeds: Vec<(f32, f32)> = field
            .nodes()
            .iter()
            .map(|n| (n.vel.x.abs(), n.vel.y.abs()))
            .collect();

        for _ in 0..2_000 {
            field.step(&cfg);
            for (n, (sx, sy)) in field.nodes().iter().zip(&speeds) {
                assert!(v.contains(n.pos), "node escaped: {:?}", n.pos);
                assert_eq!(n.vel.x.abs(), *sx);
                assert_eq!(n.vel.y.abs(), *sy);
            }
        }
    }
}
