use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// A run of text laid out from a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Size in logical pixels, scaled up for rasterization on hidpi.
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    /// Wrap width in logical pixels; `None` lays out a single line.
    pub max_width: Option<f32>,
}

impl DrawList {
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let cmd = TextCmd { text: text.into(), font, size, color, origin, max_width };
        self.push(z, DrawCmd::Text(cmd));
    }
}
