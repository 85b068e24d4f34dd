use enki_engine::coords::{Rect, Vec2};
use enki_engine::paint::Color;

use crate::item::{Item, ItemBox};
use crate::layout::{Constraints, MeasureCtx};
use crate::painter::Painter;

/// An overlay container that positions each child by its anchors.
///
/// Children paint in insertion order, so the first child is the bottom
/// layer. Each child's rect comes from resolving the
/// [`Anchors`](crate::anchors::Anchors) on its [`ItemBox`] against this
/// group's own rect.
///
/// # Example
/// ```ekml
/// Group {
///     Panel {
///         left: 10  right: 10  bottom: 10
///         padding: 10
///     }
/// }
/// ```
pub struct Group {
    children: Vec<ItemBox>,
    bg: Option<Color>,
}

impl Group {
    pub fn new() -> Self {
        Self { children: Vec::new(), bg: None }
    }

    pub fn child(mut self, child: impl Into<ItemBox>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push(&mut self, child: ItemBox) {
        self.children.push(child);
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Item for Group {
    fn measure(&self, constraints: Constraints, ctx: &MeasureCtx) -> Vec2 {
        // Infinities never reach the children; an unbounded axis offers zero
        // instead, which keeps percentage anchors meaningful.
        let offer = Vec2::new(
            if constraints.max.x.is_finite() { constraints.max.x } else { 0.0 },
            if constraints.max.y.is_finite() { constraints.max.y } else { 0.0 },
        );
        let natural = self
            .children
            .iter()
            .map(|child| child.measure(Constraints::loose(offer), ctx))
            .fold(Vec2::zero(), Vec2::max);
        constraints.constrain(natural)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(color) = self.bg {
            painter.fill_rect(rect, color);
        }
        for child in &self.children {
            let natural = child.measure(Constraints::loose(rect.size), &painter.measure_ctx());
            let child_rect = child.anchors.compute_rect(rect, natural);
            child.paint(painter, child_rect);
        }
    }

    fn children_mut(&mut self) -> &mut [ItemBox] {
        &mut self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::{AnchorVal, Anchors};
    use enki_engine::text::FontSystem;

    struct Fixed(Vec2);

    impl Item for Fixed {
        fn measure(&self, constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
            constraints.constrain(self.0)
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    #[test]
    fn natural_size_is_the_union_of_children() {
        let fonts = FontSystem::new();
        let group = Group::new()
            .child(Fixed(Vec2::new(30.0, 80.0)))
            .child(Fixed(Vec2::new(70.0, 10.0)));
        let size = group.measure(
            Constraints::loose(Vec2::new(200.0, 200.0)),
            &MeasureCtx { fonts: &fonts, scale: 1.0 },
        );
        assert_eq!(size, Vec2::new(70.0, 80.0));
    }

    #[test]
    fn anchored_children_resolve_against_the_group_rect() {
        let mut boxed = ItemBox::new(Fixed(Vec2::new(40.0, 20.0)));
        boxed.anchors = Anchors::new().bottom(AnchorVal::Px(10.0));
        let rect = boxed.anchors.compute_rect(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Vec2::new(40.0, 20.0),
        );
        assert_eq!(rect, Rect::new(0.0, 70.0, 40.0, 20.0));
    }
}
