//! Measurement primitives shared by every item.

use enki_engine::coords::{Rect, Vec2};
use enki_engine::text::FontSystem;

/// Per-side insets in logical pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// Offset of the top-left content corner.
    pub fn top_left(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Total space the insets consume on each axis.
    pub fn size(self) -> Vec2 {
        Vec2::new(self.left + self.right, self.top + self.bottom)
    }

    /// The part of `rect` left over once the insets are applied.
    pub fn inset(self, rect: Rect) -> Rect {
        Rect::from_origin_size(
            rect.origin + self.top_left(),
            (rect.size - self.size()).max(Vec2::zero()),
        )
    }
}

/// The size range a parent allows a child during measure.
///
/// A child answers measure with any size it likes; honest children finish
/// with [`Constraints::constrain`], and the parent clamps again when it must.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// The child decides nothing: both bounds are `size`.
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    /// Anything from zero up to `max`.
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// Clamp `size` into `[min, max]`.
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        size.max(self.min).min(self.max)
    }

    /// Constraints for content living inside `edges` of padding. The minimum
    /// drops to zero; the maximum loses the space the padding consumes.
    #[must_use]
    pub fn deflate(self, edges: Edges) -> Self {
        Self::loose((self.max - edges.size()).max(Vec2::zero()))
    }
}

/// What an item gets to see while measuring: the font collection, and the
/// scale text will rasterize at so measured runs match drawn runs.
pub struct MeasureCtx<'a> {
    pub fonts: &'a FontSystem,
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_respects_both_bounds() {
        let c = Constraints { min: Vec2::new(8.0, 4.0), max: Vec2::new(64.0, 32.0) };
        assert_eq!(c.constrain(Vec2::new(2.0, 100.0)), Vec2::new(8.0, 32.0));
        assert_eq!(c.constrain(Vec2::new(16.0, 16.0)), Vec2::new(16.0, 16.0));
    }

    #[test]
    fn tight_leaves_no_slack() {
        let c = Constraints::tight(Vec2::new(24.0, 24.0));
        assert_eq!(c.constrain(Vec2::zero()), Vec2::new(24.0, 24.0));
        assert_eq!(c.constrain(Vec2::new(500.0, 1.0)), Vec2::new(24.0, 24.0));
    }

    #[test]
    fn deflate_subtracts_padding_from_max() {
        let c = Constraints::loose(Vec2::new(120.0, 90.0)).deflate(Edges::all(15.0));
        assert_eq!(c.min, Vec2::zero());
        assert_eq!(c.max, Vec2::new(90.0, 60.0));
    }

    #[test]
    fn deflate_never_goes_negative() {
        let c = Constraints::loose(Vec2::new(4.0, 4.0)).deflate(Edges::all(9.0));
        assert_eq!(c.max, Vec2::zero());
    }

    #[test]
    fn inset_moves_origin_and_shrinks_size() {
        let edges = Edges { top: 2.0, right: 3.0, bottom: 4.0, left: 5.0 };
        let inner = edges.inset(Rect::new(10.0, 10.0, 50.0, 40.0));
        assert_eq!(inner.origin, Vec2::new(15.0, 12.0));
        assert_eq!(inner.size, Vec2::new(42.0, 34.0));
    }

    #[test]
    fn inset_bottoms_out_at_zero_size() {
        let inner = Edges::all(30.0).inset(Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(inner.size, Vec2::zero());
    }

    #[test]
    fn edges_axis_totals() {
        let e = Edges { top: 1.0, right: 2.0, bottom: 3.0, left: 4.0 };
        assert_eq!(e.size(), Vec2::new(6.0, 4.0));
        assert_eq!(e.top_left(), Vec2::new(4.0, 1.0));
    }
}
