use super::Vec2;

/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for converting logical px
/// positions to NDC in shaders. The node field uses it as its bounds.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns a copy where each axis is at least one pixel.
    ///
    /// Non-finite, zero and negative extents all collapse to `1.0`.
    #[inline]
    pub fn clamped_min_pixel(self) -> Self {
        fn axis(v: f32) -> f32 {
            if v.is_finite() { v.max(1.0) } else { 1.0 }
        }
        Self::new(axis(self.width), axis(self.height))
    }

    /// Closed containment: [0, width] × [0, height].
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// Clamps a point into [0, width] × [0, height].
    #[inline]
    pub fn clamp(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_min_pixel_keeps_valid_sizes() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.clamped_min_pixel(), v);
    }

    #[test]
    fn clamped_min_pixel_fixes_degenerate_axes() {
        let v = Viewport::new(0.0, -20.0).clamped_min_pixel();
        assert_eq!(v, Viewport::new(1.0, 1.0));

        let v = Viewport::new(f32::NAN, f32::INFINITY).clamped_min_pixel();
        assert_eq!(v, Viewport::new(1.0, 1.0));
    }

    #[test]
    fn contains_is_inclusive_on_both_edges() {
        let v = Viewport::new(10.0, 5.0);
        assert!(v.contains(Vec2::new(0.0, 0.0)));
        assert!(v.contains(Vec2::new(10.0, 5.0)));
        assert!(!v.contains(Vec2::new(10.01, 5.0)));
        assert!(!v.contains(Vec2::new(-0.01, 1.0)));
    }

    #[test]
    fn clamp_pulls_points_onto_edges() {
        let v = Viewport::new(10.0, 5.0);
        assert_eq!(v.clamp(Vec2::new(-3.0, 7.0)), Vec2::new(0.0, 5.0));
        assert_eq!(v.clamp(Vec2::new(4.0, 2.0)), Vec2::new(4.0, 2.0));
    }
}
