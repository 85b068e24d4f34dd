use super::shapes::{RectCmd, RoundedRectCmd, TextCmd};

/// Shape-agnostic command recorded into a [`DrawList`](super::DrawList).
///
/// Each variant has a dedicated instanced renderer under `render::shapes`.
/// Adding a shape means a payload struct plus push helper in
/// `scene::shapes`, a variant here, and a renderer that filters for it.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Text(TextCmd),
}
