use enki_engine::coords::{Rect, Vec2};
use enki_engine::paint::Color;
use enki_engine::scene::{Border, DrawList, ZIndex};
use enki_engine::text::{FontId, FontSystem};

use crate::layout::MeasureCtx;

/// Recording surface handed to [`Item::paint`](crate::item::Item::paint).
///
/// Every call lands on its own z layer, allocated in call order, so an item
/// painted after another covers it and parents sit beneath the children they
/// paint afterwards.
pub struct Painter<'a> {
    list: &'a mut DrawList,
    fonts: &'a FontSystem,
    /// Physical-to-logical pixel ratio for this frame.
    pub scale: f32,
    layer: i32,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(list: &'a mut DrawList, fonts: &'a FontSystem, scale: f32) -> Self {
        Self { list, fonts, scale, layer: 0 }
    }

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_layer();
        self.list.push_solid_rect(z, rect, color);
    }

    /// Rounded rectangle. `radius = 0.0` gives sharp corners; `border = None`
    /// skips the stroke.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        let z = self.next_layer();
        self.list.push_rounded_rect(z, rect, radius, color, border);
    }

    /// Text with `origin` at the top-left of the first line, wrapped to
    /// `max_width` when given.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let z = self.next_layer();
        self.list.push_text(z, text, font, size, color, origin, max_width);
    }

    /// Measure `text` the way the text renderer will actually place it.
    ///
    /// Layout happens at `size * scale` and divides back, so the answer
    /// agrees with the glyph positions at any scale factor. Use this in
    /// `paint`, never `FontSystem::measure_text` directly.
    pub fn measure_text(
        &self,
        text: &str,
        font: FontId,
        size: f32,
        max_width: Option<f32>,
    ) -> Vec2 {
        self.fonts.measure_text_scaled(text, font, size, max_width, self.scale)
    }

    /// A [`MeasureCtx`] borrowing this painter's fonts, for containers that
    /// re-measure children while painting.
    #[inline]
    pub fn measure_ctx(&self) -> MeasureCtx<'_> {
        MeasureCtx { fonts: self.fonts, scale: self.scale }
    }

    #[inline]
    fn next_layer(&mut self) -> ZIndex {
        let z = ZIndex::new(self.layer);
        self.layer += 1;
        z
    }
}
