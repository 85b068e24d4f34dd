use super::Vec2;

/// Logical-pixel extent of the surface being rendered into.
///
/// Shape shaders divide logical positions by this to reach NDC, so a
/// degenerate viewport would produce NaN positions. Frame setup checks
/// [`is_renderable`](Viewport::is_renderable) before recording any pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_renderable(self) -> bool {
        Vec2::new(self.width, self.height).is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderable_requires_positive_finite_extent() {
        assert!(Viewport::new(640.0, 480.0).is_renderable());
        assert!(!Viewport::new(0.0, 480.0).is_renderable());
        assert!(!Viewport::new(640.0, -1.0).is_renderable());
        assert!(!Viewport::new(f32::INFINITY, 480.0).is_renderable());
        assert!(!Viewport::new(f32::NAN, 480.0).is_renderable());
    }
}
