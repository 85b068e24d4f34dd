use enki_engine::coords::{Rect, Vec2};
use enki_engine::paint::Color;
use enki_engine::text::FontId;

use crate::item::Item;
use crate::layout::{Constraints, MeasureCtx};
use crate::painter::Painter;

/// A single-run text item.
///
/// Text is measured through the engine's `FontSystem` at the frame's
/// physical scale, so layout is pixel-accurate. Wrapping is controlled by
/// the width the parent allocates.
///
/// # Example
/// ```ekml
/// Label "Hello, world!" {
///     size: 16
///     color: #e0e0e0
/// }
/// ```
pub struct Label {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }
}

impl Item for Label {
    fn measure(&self, constraints: Constraints, ctx: &MeasureCtx) -> Vec2 {
        let wrap = constraints.max.x.is_finite().then_some(constraints.max.x);
        let size =
            ctx.fonts.measure_text_scaled(&self.text, self.font, self.size, wrap, ctx.scale);
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let wrap = (rect.size.x > 0.0).then_some(rect.size.x);
        painter.text(&self.text, self.font, self.size, self.color, rect.origin, wrap);
    }
}
