use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rectangle with uniformly rounded corners and an optional border stroke.
///
/// `radius` is in logical pixels; the renderer clamps it to half the
/// shorter side so corners never overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radius: f32,
    pub color: Color,
    pub border: Option<Border>,
}

impl RoundedRectCmd {
    pub fn new(rect: Rect, radius: f32, color: Color, border: Option<Border>) -> Self {
        RoundedRectCmd { rect, radius, color, border }
    }
}

impl DrawList {
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd::new(rect, radius, color, border)));
    }
}
