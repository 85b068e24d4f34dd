use enki_engine::coords::{Rect, Vec2};
use enki_engine::render::{RenderCtx, RenderTarget};
use enki_engine::time::FrameTime;

use enki_ekml::Value;

use crate::anchors::Anchors;
use crate::layout::{Constraints, MeasureCtx};
use crate::painter::Painter;

/// Per-frame state delivered to [`Item::sync`] before rendering starts.
#[derive(Debug, Clone, Copy)]
pub struct SyncCtx {
    /// Drawable surface size in physical pixels (window size × scale factor).
    pub surface_size: (u32, u32),
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
    /// Frame timing for animated items.
    pub time: FrameTime,
}

/// Render hook that paints beneath the scene's own draw list.
///
/// An underlay records straight into the frame's command encoder before any
/// shape renderer runs. Its output is the bottom layer of the frame, so it
/// must initialize the surface, usually with a clearing render pass.
pub trait Underlay {
    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>);
}

/// The core trait every scene item implements.
///
/// `measure` and `paint` mirror the layout/draw split of retained UI trees;
/// the remaining hooks are the scene lifecycle. For a plain visual item the
/// lifecycle defaults are all no-ops; only items that own GPU resources
/// need `sync`, `underlay`, and `cleanup`.
///
/// # Lifecycle
///
/// - [`attached`](Item::attached): the scene is bound to a live window.
///   Runs once, and again after an invalidation.
/// - [`sync`](Item::sync): once per frame, before rendering. Create GPU
///   objects lazily here and copy state (surface size, animated parameters)
///   into them.
/// - [`underlay`](Item::underlay): per frame, after sync. An item returning
///   `Some` paints beneath the whole scene.
/// - [`cleanup`](Item::cleanup): the surface/device pair is going away.
///   Drop every GPU object; recreate lazily on the next `sync`.
pub trait Item: 'static {
    /// Apply a markup property. Unknown keys are ignored.
    fn apply(&mut self, key: &str, value: &Value) {
        let _ = (key, value);
    }

    /// Apply inline markup content (`Label "like this" { … }`).
    fn set_content(&mut self, text: &str) {
        let _ = text;
    }

    /// Compute the size this item wants given the available space.
    ///
    /// Must be deterministic: the parent may call `measure` several times
    /// and relies on equal arguments producing equal answers.
    fn measure(&self, constraints: Constraints, ctx: &MeasureCtx) -> Vec2;

    /// Draw this item into `painter` within the bounds of `rect`.
    ///
    /// `rect` is the space the parent allocated; the item draws inside it
    /// and paints children by calling their own `paint` recursively.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Mutable access to child nodes, for the lifecycle walks.
    ///
    /// Container items return their children here so `sync`, `underlay`
    /// collection, and `cleanup` reach the whole tree. Leaf items keep the
    /// default.
    fn children_mut(&mut self) -> &mut [ItemBox] {
        &mut []
    }

    /// Called when the scene becomes bound to a live window.
    fn attached(&mut self) {}

    /// Called once per frame before rendering.
    fn sync(&mut self, ctx: &SyncCtx) {
        let _ = ctx;
    }

    /// Render hook painting beneath the scene. `None` for ordinary items.
    fn underlay(&mut self) -> Option<&mut dyn Underlay> {
        None
    }

    /// Called when the surface is invalidated. Must be idempotent.
    fn cleanup(&mut self) {}
}

/// A type-erased item node, the universal child type for container items.
///
/// Carries the [`Anchors`] the markup loader parsed for the node; parents
/// resolve them against their own rect when painting. The lifecycle methods
/// here apply to the node *and its whole subtree*.
pub struct ItemBox {
    item: Box<dyn Item>,
    pub anchors: Anchors,
}

impl ItemBox {
    pub fn new<I: Item>(item: I) -> Self {
        Self { item: Box::new(item), anchors: Anchors::default() }
    }

    pub fn from_boxed(item: Box<dyn Item>) -> Self {
        Self { item, anchors: Anchors::default() }
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &MeasureCtx) -> Vec2 {
        self.item.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.item.paint(painter, rect)
    }

    /// Delivers [`Item::attached`] to this node and its subtree.
    pub fn attach(&mut self) {
        self.item.attached();
        for child in self.item.children_mut() {
            child.attach();
        }
    }

    /// Delivers [`Item::sync`] to this node and its subtree, parents first.
    pub fn sync(&mut self, ctx: &SyncCtx) {
        self.item.sync(ctx);
        for child in self.item.children_mut() {
            child.sync(ctx);
        }
    }

    /// Returns `true` if any item in this subtree exposes an underlay.
    pub fn has_underlay(&mut self) -> bool {
        if self.item.underlay().is_some() {
            return true;
        }
        self.item.children_mut().iter_mut().any(ItemBox::has_underlay)
    }

    /// Runs every underlay in this subtree, depth-first in tree order.
    pub fn paint_underlays(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if let Some(underlay) = self.item.underlay() {
            underlay.render(ctx, target);
        }
        for child in self.item.children_mut() {
            child.paint_underlays(ctx, target);
        }
    }

    /// Delivers [`Item::cleanup`] to this node and its subtree.
    pub fn cleanup(&mut self) {
        self.item.cleanup();
        for child in self.item.children_mut() {
            child.cleanup();
        }
    }
}

impl<I: Item> From<I> for ItemBox {
    fn from(item: I) -> Self {
        Self::new(item)
    }
}
