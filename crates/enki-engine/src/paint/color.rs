/// Linear RGBA color with premultiplied alpha.
///
/// Invariant: each of `r`, `g`, `b` already carries the `a` factor. The
/// shape renderers rely on this; their blend state is `SrcOver` for
/// premultiplied sources, so handing them a straight-alpha color produces
/// bright fringes on translucent edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Raw constructor for components that are already premultiplied.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Builds a premultiplied color from straight-alpha components.
    ///
    /// Inputs are clamped to `[0, 1]` first, so out-of-range values cannot
    /// break the premultiplication invariant.
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        let premul = |c: f32| c.clamp(0.0, 1.0) * a;
        Color { r: premul(r), g: premul(g), b: premul(b), a }
    }

    /// Builds a premultiplied color from straight sRGB bytes, the form hex
    /// literals in markup decode to.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let unit = |c: u8| c as f32 / 255.0;
        Self::from_straight(unit(r), unit(g), unit(b), unit(a))
    }

    /// Component array in `[r, g, b, a]` order, as shape instance buffers
    /// and uniform blocks expect it.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_straight_premultiplies() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c.to_array(), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn from_straight_clamps_before_premultiplying() {
        let c = Color::from_straight(2.0, -1.0, 0.5, 1.5);
        assert_eq!(c.to_array(), [1.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn from_srgb_u8_opaque_white() {
        let c = Color::from_srgb_u8(255, 255, 255, 255);
        assert_eq!(c.to_array(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn from_srgb_u8_translucent_scales_rgb() {
        let c = Color::from_srgb_u8(255, 0, 0, 127);
        let a = 127.0 / 255.0;
        assert!((c.r - a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
        assert!((c.a - a).abs() < 1e-6);
    }

    #[test]
    fn transparent_is_all_zero() {
        assert_eq!(Color::transparent().to_array(), [0.0; 4]);
    }
}
