use crate::coords::Vec2;

use super::Color;

/// A single gradient stop.
///
/// `t` is expected in [0, 1] in typical usage, but is not strictly enforced.
/// Renderers may clamp stops at build time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Radial gradient definition in logical pixel space.
///
/// Semantics:
/// - both circles share `center`
/// - `t = 0` sits on `inner_radius`, `t = 1` on `outer_radius`
/// - outside that band the edge stops are extended (pad)
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, inner_radius: f32, outer_radius: f32, stops: Vec<ColorStop>) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops,
        }
    }

    /// Two-stop gradient fading from `inner` at the center to `outer` at `radius`.
    pub fn fade(center: Vec2, radius: f32, inner: Color, outer: Color) -> Self {
        Self::new(
            center,
            0.0,
            radius,
            vec![ColorStop::new(0.0, inner), ColorStop::new(1.0, outer)],
        )
    }

    /// First and last stop colors, the pair the GPU path interpolates between.
    ///
    /// A single stop is returned twice; no stops yields transparent.
    pub fn edge_colors(&self) -> (Color, Color) {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first.color, last.color),
            _ => (Color::transparent(), Color::transparent()),
        }
    }
}
