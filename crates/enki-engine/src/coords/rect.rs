use super::Vec2;

/// Axis-aligned rectangle in logical pixels, top-left origin, y-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Rect { origin, size }
    }

    /// X coordinate of the right edge.
    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    /// Y coordinate of the bottom edge.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    /// True when either dimension is zero or negative. Empty rectangles
    /// produce no pixels and are skipped during instance building.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Folds negative dimensions back into the origin so that `size` is
    /// non-negative and the rectangle covers the same region.
    pub fn normalized(self) -> Self {
        let (x, w) = fold_span(self.origin.x, self.size.x);
        let (y, h) = fold_span(self.origin.y, self.size.y);
        Rect::new(x, y, w, h)
    }
}

fn fold_span(start: f32, len: f32) -> (f32, f32) {
    if len < 0.0 {
        (start + len, -len)
    } else {
        (start, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_keeps_positive_rects() {
        let r = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(r.normalized(), r);
    }

    #[test]
    fn normalized_folds_negative_width() {
        let n = Rect::new(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n, Rect::new(6.0, 0.0, 4.0, 5.0));
    }

    #[test]
    fn normalized_folds_negative_height() {
        let n = Rect::new(0.0, 10.0, 5.0, -3.0).normalized();
        assert_eq!(n, Rect::new(0.0, 7.0, 5.0, 3.0));
    }

    #[test]
    fn normalized_covers_same_edges() {
        let n = Rect::new(10.0, 10.0, -6.0, -2.0).normalized();
        assert_eq!(n.right(), 10.0);
        assert_eq!(n.bottom(), 10.0);
        assert_eq!(n.origin, Vec2::new(4.0, 8.0));
    }

    #[test]
    fn empty_when_any_dimension_is_not_positive() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(Rect::new(0.0, 0.0, -1.0, 5.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f32::NAN, 5.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn edge_accessors() {
        let r = Rect::from_origin_size(Vec2::new(5.0, 10.0), Vec2::new(20.0, 30.0));
        assert_eq!(r.right(), 25.0);
        assert_eq!(r.bottom(), 40.0);
    }
}
