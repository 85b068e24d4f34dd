//! Declarative item trees on top of `enki-engine`.
//!
//! A scene is described in `.ekml` markup, loaded into a tree of [`Item`]s,
//! and driven by the engine's frame loop. Each frame runs three phases in
//! order on the event-loop thread:
//!
//! 1. **sync**: every item sees the current surface size, scale factor, and
//!    frame time through [`Item::sync`]. Items that render directly create
//!    their GPU objects lazily here and copy state into them.
//! 2. **underlay**: items exposing an [`Underlay`] hook paint straight into
//!    the frame's command encoder, beneath everything else. An underlay owns
//!    the background, so the engine clear pass is skipped while one exists.
//! 3. **scene**: the tree is measured, anchor-laid-out, and painted into the
//!    engine draw list, which the instanced shape renderers replay on top.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use enki_scene::Application;
//!
//! Application::new()
//!     .title("My Scene")
//!     .font("body", include_bytes!("font.ttf").to_vec())
//!     .run(include_str!("ui/main.ekml"));
//! ```
//!
//! # Extending with custom items
//!
//! Implement [`Item`] for any type, register it by name, and instantiate it
//! from markup:
//!
//! ```rust,ignore
//! use enki_scene::prelude::*;
//!
//! #[derive(Default)]
//! pub struct Pulse { speed: f32 }
//!
//! impl Item for Pulse {
//!     fn apply(&mut self, key: &str, value: &Value) {
//!         if key == "speed" {
//!             if let Value::Number(v) = value { self.speed = *v; }
//!         }
//!     }
//!     fn measure(&self, constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
//!         constraints.constrain(Vec2::new(40.0, 40.0))
//!     }
//!     fn paint(&self, painter: &mut Painter, rect: Rect) {
//!         painter.fill_rect(rect, Color::from_straight(0.2, 0.5, 1.0, 1.0));
//!     }
//! }
//!
//! Application::new()
//!     .item::<Pulse>("Pulse")
//!     .run("Group { Pulse { speed: 2.0 } }");
//! ```
//!
//! [`Item`]: item::Item
//! [`Item::sync`]: item::Item::sync
//! [`Underlay`]: item::Underlay

pub mod anchors;
pub mod app;
pub mod item;
pub mod items;
pub mod layout;
pub mod loader;
pub mod painter;
pub mod registry;
pub mod scene;

// The usual way in: `use enki_scene::Application`.
pub use app::Application;

/// One-stop imports for building scenes and writing custom items.
pub mod prelude {
    pub use crate::anchors::{AnchorVal, Anchors, SizeHint};
    pub use crate::app::Application;
    pub use crate::item::{Item, ItemBox, SyncCtx, Underlay};
    pub use crate::items::{Group, Label, Panel};
    pub use crate::layout::{Constraints, Edges, MeasureCtx};
    pub use crate::loader::{FontMap, SceneLoader};
    pub use crate::painter::Painter;
    pub use crate::registry::ItemRegistry;
    pub use crate::scene::Scene;

    // Engine primitives custom items touch directly.
    pub use enki_engine::coords::{Rect, Vec2};
    pub use enki_engine::paint::Color;
    pub use enki_engine::render::{RenderCtx, RenderTarget};
    pub use enki_engine::scene::Border;
    pub use enki_engine::text::FontId;
    pub use enki_engine::time::FrameTime;

    // Markup
    pub use enki_ekml::{Document, ParseError, Value};
}
