use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`] when the bytes are not a
/// parseable TrueType/OpenType font.
#[derive(Debug, Clone)]
pub struct FontLoadError {
    pub reason: String,
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse font: {}", self.reason)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font held by a [`FontSystem`]. Draw commands and measure
/// calls refer to fonts exclusively through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub(crate) usize);

/// The loaded font collection.
///
/// Fonts are append-only; ids stay valid for the system's lifetime. The
/// application owns one instance and lends it to the text renderer each
/// frame for on-demand glyph rasterization.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bytes` as a font and stores it, returning the id draw
    /// commands should carry.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let settings = fontdue::FontSettings::default();
        let font = fontdue::Font::from_bytes(bytes, settings)
            .map_err(|reason| FontLoadError { reason: reason.to_string() })?;
        self.fonts.push(font);
        Ok(FontId(self.fonts.len() - 1))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Measures `text` laid out at `size`, wrapping at `max_width` if given.
    /// Returns the block extent in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.measure_text_scaled(text, id, size, max_width, 1.0)
    }

    /// Measures at `size * scale` and divides the extent back down.
    ///
    /// Callers that later paint the text must measure with the same scale
    /// the renderer rasterizes at. Glyph advances are not proportional
    /// across pixel sizes, so measuring at logical size while painting at
    /// physical size drifts by a fraction of a pixel per character, enough
    /// to push the last word past a wrap boundary.
    #[must_use]
    pub fn measure_text_scaled(
        &self,
        text: &str,
        id: FontId,
        size: f32,
        max_width: Option<f32>,
        scale: f32,
    ) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let scale = scale.max(0.01);
        let px_size = size * scale;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            max_width: max_width.map(|w| w * scale),
            ..LayoutSettings::default()
        });
        layout.append(&[font], &TextStyle::new(text, px_size, 0));

        if layout.glyphs().is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        let mut extent = Vec2::new(0.0, px_size);
        for glyph in layout.glyphs() {
            // Width must cover the pen advance, not just the bitmap edge.
            // The wrap test compares pen position plus advance against
            // max_width, so a width measured from bitmap edges can come
            // back around as a max_width that wraps one glyph early.
            let metrics = font.metrics_indexed(glyph.key.glyph_index, px_size);
            let pen_after = glyph.x - metrics.xmin as f32 + metrics.advance_width;
            extent.x = extent.x.max(pen_after.max(0.0));
            extent.y = extent.y.max(glyph.y + glyph.height as f32);
        }
        extent / scale
    }
}
