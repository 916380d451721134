use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;

use crate::coords::{Vec2, Viewport};

use super::config::FieldConfig;
use super::palette::{Rgb, WHITE};

/// A single animated point of the field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    /// Per-frame displacement. Only the signs change after creation.
    pub vel: Vec2,
    pub radius: f32,
    pub base_opacity: f32,
    /// Pulse phase in radians. Grows without bound; only ever fed to `sin`.
    /// Kept in f64 so the per-frame step stays representable over long runs.
    pub phase: f64,
    pub color: Rgb,
}

impl Node {
    /// Samples a node uniformly inside `bounds`.
    pub fn random<R: Rng + ?Sized>(bounds: Viewport, config: &FieldConfig, rng: &mut R) -> Self {
        let pos = Vec2::new(rng.r#gen::<f32>() * bounds.width, rng.r#gen::<f32>() * bounds.height);
        let vel = Vec2::new(
            (rng.r#gen::<f32>() - 0.5) * config.velocity_span,
            (rng.r#gen::<f32>() - 0.5) * config.velocity_span,
        );
        let radius = sample(&config.radius_range, rng);
        let base_opacity = sample(&config.opacity_range, rng);
        let phase = rng.r#gen::<f64>() * TAU;
        let color = if config.palette.is_empty() {
            WHITE
        } else {
            config.palette[rng.gen_range(0..config.palette.len())]
        };

        Self {
            pos,
            vel,
            radius,
            base_opacity,
            phase,
            color,
        }
    }

    /// Advances one frame: Euler step, axis bounce, hard clamp, phase advance.
    ///
    /// The bounce test uses the pre-clamp position, so a node that leaves
    /// through a corner flips both axes in the same frame.
    pub fn step(&mut self, bounds: Viewport, phase_step: f64) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > bounds.width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.height {
            self.vel.y = -self.vel.y;
        }

        self.pos = bounds.clamp(self.pos);
        self.phase += phase_step;
    }
}

/// `start + u * (end - start)` with `u` in [0, 1); never panics on empty ranges.
fn sample<R: Rng + ?Sized>(range: &Range<f32>, rng: &mut R) -> f32 {
    range.start + rng.r#gen::<f32>() * (range.end - range.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn node_at(x: f32, y: f32, vx: f32, vy: f32) -> Node {
        Node {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: 2.0,
            base_opacity: 0.5,
            phase: 0.0,
            color: WHITE,
        }
    }

    // ── random ────────────────────────────────────────────────────────────

    #[test]
    fn random_nodes_respect_configured_ranges() {
        let cfg = FieldConfig::default();
        let bounds = Viewport::new(640.0, 480.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let n = Node::random(bounds, &cfg, &mut rng);
            assert!(bounds.contains(n.pos));
            assert!(n.vel.x >= -0.4 && n.vel.x <= 0.4);
            assert!(n.vel.y >= -0.4 && n.vel.y <= 0.4);
            assert!(n.radius >= 1.0 && n.radius <= 3.0);
            assert!(n.base_opacity >= 0.3 && n.base_opacity <= 0.9);
            assert!(n.phase >= 0.0 && n.phase < TAU);
            assert!(cfg.palette.contains(&n.color));
        }
    }

    #[test]
    fn same_seed_same_node() {
        let cfg = FieldConfig::default();
        let bounds = Viewport::new(100.0, 100.0);
        let a = Node::random(bounds, &cfg, &mut ChaCha8Rng::seed_from_u64(42));
        let b = Node::random(bounds, &cfg, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_ranges_do_not_panic() {
        let cfg = FieldConfig { radius_range: 2.0..2.0, ..FieldConfig::default() };
        let n = Node::random(Viewport::new(10.0, 10.0), &cfg, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(n.radius, 2.0);
    }

    // ── step ──────────────────────────────────────────────────────────────

    #[test]
    fn step_moves_by_velocity_inside_bounds() {
        let mut n = node_at(10.0, 10.0, 0.25, -0.25);
        n.step(Viewport::new(100.0, 100.0), 0.02);
        assert_eq!(n.pos, Vec2::new(10.25, 9.75));
        assert_eq!(n.vel, Vec2::new(0.25, -0.25));
        assert_eq!(n.phase, 0.02);
    }

    #[test]
    fn step_flips_and_clamps_past_left_edge() {
        let mut n = node_at(-5.0, 50.0, -0.3, 0.0);
        n.step(Viewport::new(100.0, 100.0), 0.02);
        assert_eq!(n.vel.x, 0.3);
        assert_eq!(n.pos.x, 0.0);
    }

    #[test]
    fn step_flips_both_axes_at_a_corner() {
        let mut n = node_at(99.9, 99.9, 0.3, 0.3);
        n.step(Viewport::new(100.0, 100.0), 0.02);
        assert_eq!(n.vel, Vec2::new(-0.3, -0.3));
        assert_eq!(n.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn landing_exactly_on_an_edge_does_not_flip() {
        let mut n = node_at(99.5, 50.0, 0.5, 0.0);
        n.step(Viewport::new(100.0, 100.0), 0.02);
        assert_eq!(n.pos.x, 100.0);
        assert_eq!(n.vel.x, 0.5);
    }

    #[test]
    fn phase_accumulates_without_wrapping() {
        let mut n = node_at(50.0, 50.0, 0.0, 0.0);
        n.phase = TAU - 0.01;
        n.step(Viewport::new(100.0, 100.0), 0.02);
        assert!(n.phase > TAU);
    }

    #[test]
    fn phase_keeps_advancing_after_days_of_frames() {
        let mut n = node_at(50.0, 50.0, 0.0, 0.0);
        n.phase = 1.0e6;
        let before = n.phase;
        n.step(Viewport::new(100.0, 100.0), 0.02);
        assert!(n.phase > before);
        assert!((n.phase - before - 0.02).abs() < 1e-6);
    }
}
