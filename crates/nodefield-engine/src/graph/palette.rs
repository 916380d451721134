use crate::paint::Color;

/// Straight sRGB byte triple used for node styling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts to a premultiplied color at the given opacity (clamped to [0, 1]).
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Color {
        Color::from_rgb8_alpha(self.r, self.g, self.b, alpha)
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const LIGHT_BLUE: Rgb = Rgb::new(100, 200, 255);
pub const PINK: Rgb = Rgb::new(255, 100, 200);
pub const LIGHT_GREEN: Rgb = Rgb::new(100, 255, 150);

/// Default node palette; each node picks one entry uniformly at creation.
pub const DEFAULT_PALETTE: [Rgb; 4] = [WHITE, LIGHT_BLUE, PINK, LIGHT_GREEN];
