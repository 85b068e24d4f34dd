use enki_engine::coords::{Rect, Vec2};
use enki_engine::paint::Color;
use enki_engine::scene::Border;

use crate::item::{Item, ItemBox};
use crate::layout::{Constraints, Edges, MeasureCtx};
use crate::painter::Painter;

/// A single-child item providing padding, background, border, and corner
/// rounding. Every property is optional; an empty `Panel` draws nothing.
///
/// # Example
/// ```ekml
/// Panel {
///     padding: 12
///     bg: #1a1a26
///     corner_radius: 8
///     border_width: 1
///     Label "hello" { }
/// }
/// ```
pub struct Panel {
    child: Option<ItemBox>,
    padding: Edges,
    background: Option<Color>,
    border: Option<Border>,
    corner_radius: f32,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            child: None,
            padding: Edges::default(),
            background: None,
            border: None,
            corner_radius: 0.0,
        }
    }

    pub fn child(mut self, child: impl Into<ItemBox>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Item for Panel {
    fn measure(&self, constraints: Constraints, ctx: &MeasureCtx) -> Vec2 {
        let content = match &self.child {
            Some(child) => child.measure(constraints.deflate(self.padding), ctx),
            None => Vec2::zero(),
        };
        constraints.constrain(content + self.padding.size())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.background.is_some() || self.border.is_some() {
            let fill = self.background.unwrap_or(Color::transparent());
            painter.fill_rounded_rect(rect, self.corner_radius, fill, self.border);
        }
        if let Some(child) = &self.child {
            child.paint(painter, self.padding.inset(rect));
        }
    }

    fn children_mut(&mut self) -> &mut [ItemBox] {
        self.child.as_mut().map(std::slice::from_mut).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enki_engine::text::FontSystem;

    fn ctx(fonts: &FontSystem) -> MeasureCtx<'_> {
        MeasureCtx { fonts, scale: 1.0 }
    }

    struct Fixed(Vec2);

    impl Item for Fixed {
        fn measure(&self, constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
            constraints.constrain(self.0)
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    #[test]
    fn empty_panel_wants_only_its_padding() {
        let fonts = FontSystem::new();
        let panel = Panel::new().padding_all(6.0);
        let size = panel.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx(&fonts));
        assert_eq!(size, Vec2::new(12.0, 12.0));
    }

    #[test]
    fn child_size_grows_by_padding() {
        let fonts = FontSystem::new();
        let panel = Panel::new()
            .padding_all(10.0)
            .child(Fixed(Vec2::new(30.0, 20.0)));
        let size = panel.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx(&fonts));
        assert_eq!(size, Vec2::new(50.0, 40.0));
    }

    #[test]
    fn measure_never_exceeds_the_given_maximum() {
        let fonts = FontSystem::new();
        let panel = Panel::new()
            .padding_all(10.0)
            .child(Fixed(Vec2::new(500.0, 500.0)));
        let size = panel.measure(Constraints::loose(Vec2::new(60.0, 44.0)), &ctx(&fonts));
        assert_eq!(size, Vec2::new(60.0, 44.0));
    }
}
