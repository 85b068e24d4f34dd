//! Payload structs for the shapes the engine can draw, one file per shape,
//! each also providing the matching `DrawList::push_*` helper.

mod rect;
mod rounded_rect;
mod text;

pub use rect::RectCmd;
pub use rounded_rect::RoundedRectCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Stroke along the outside edge of a shape's fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Border { width, color }
    }
}
