//! Drawing surface contract consumed by the node field renderer.

use crate::coords::{Vec2, Viewport};
use crate::paint::{Color, Paint};
use crate::scene::DrawList;

/// A 2D drawing target bound to a pixel-dimensioned area.
///
/// Radial gradients are plain values (`paint::RadialGradient`) and need no
/// surface to be created; they are handed to `fill_circle` as a `Paint`.
pub trait Surface {
    /// Drawable area in logical pixels.
    fn viewport(&self) -> Viewport;

    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Strokes a straight segment. Opacity is carried by `color.a`.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    /// Fills a circle with a solid color or gradient.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
}

impl Surface for DrawList {
    fn viewport(&self) -> Viewport {
        DrawList::viewport(self)
    }

    fn clear(&mut self) {
        DrawList::clear(self);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.push_line(from, to, width, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.push_circle(center, radius, paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn draw_list_records_in_call_order() {
        let mut list = DrawList::new(Viewport::new(100.0, 50.0));
        let white = Color::from_straight(1.0, 1.0, 1.0, 0.2);

        list.draw_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), white, 0.5);
        list.fill_circle(Vec2::new(5.0, 5.0), 2.0, Paint::solid(white));

        assert_eq!(list.len(), 2);
        assert!(matches!(list.items()[0], DrawCmd::Line(_)));
        assert!(matches!(list.items()[1], DrawCmd::Circle(_)));
    }

    #[test]
    fn clear_discards_items_but_keeps_viewport() {
        let mut list = DrawList::new(Viewport::new(100.0, 50.0));
        list.fill_circle(Vec2::zero(), 1.0, Paint::solid(Color::transparent()));
        Surface::clear(&mut list);

        assert!(list.is_empty());
        assert_eq!(Surface::viewport(&list), Viewport::new(100.0, 50.0));
    }
}
