use enki_engine::coords::{Rect, Vec2};
use enki_engine::render::{RenderCtx, RenderTarget};
use enki_engine::scene::DrawList;
use enki_engine::text::{FontId, FontLoadError, FontSystem};

use crate::item::{ItemBox, SyncCtx};
use crate::layout::{Constraints, MeasureCtx};
use crate::painter::Painter;

/// Top-level coordinator that owns the item tree and shared frame resources.
///
/// Owns the `FontSystem` (and therefore all loaded fonts) and the `DrawList`
/// populated each frame by [`build_frame`](Self::build_frame). Both are
/// public so the application can split-borrow them when passing the list and
/// the fonts to the engine's shape renderers.
///
/// The per-frame call order is the scene contract:
///
/// 1. [`sync`](Self::sync): walk the tree with the current surface state.
/// 2. [`has_underlay`](Self::has_underlay) / [`paint_underlays`](Self::paint_underlays):
///    run direct-render hooks beneath everything else.
/// 3. [`build_frame`](Self::build_frame): measure, lay out, and paint the
///    tree into the draw list for the shape renderers to replay.
///
/// [`invalidate`](Self::invalidate) breaks the cycle when the surface dies;
/// the next `sync` re-attaches the tree against the new device.
pub struct Scene {
    /// Fonts are public so the application can pass `&scene.font_system` to
    /// the engine's `TextRenderer::render`.
    pub font_system: FontSystem,
    /// Draw list populated by the most recent [`build_frame`](Self::build_frame) call.
    pub draw_list: DrawList,
    root: ItemBox,
    attached: bool,
}

impl Scene {
    pub fn new(font_system: FontSystem, root: ItemBox) -> Self {
        Self {
            font_system,
            draw_list: DrawList::new(),
            root,
            attached: false,
        }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Per-frame sync walk, parents before children.
    ///
    /// The first call after construction or after [`invalidate`](Self::invalidate)
    /// also delivers [`Item::attached`](crate::item::Item::attached) to the
    /// whole tree before any sync runs.
    pub fn sync(&mut self, ctx: &SyncCtx) {
        if !self.attached {
            self.root.attach();
            self.attached = true;
        }
        self.root.sync(ctx);
    }

    /// Returns `true` if any item in the tree exposes an underlay hook.
    ///
    /// When this is the case the application should skip its own clear pass:
    /// the bottom-most underlay owns the background.
    pub fn has_underlay(&mut self) -> bool {
        self.root.has_underlay()
    }

    /// Runs every underlay hook in tree order, recording into `target`.
    pub fn paint_underlays(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.root.paint_underlays(ctx, target);
    }

    /// Measure, lay out, and paint the item tree into the draw list.
    ///
    /// `viewport` is the window size in logical pixels; `scale` the
    /// physical-to-logical ratio used for text layout.
    pub fn build_frame(&mut self, viewport: Vec2, scale: f32) {
        self.draw_list.clear();

        let ctx = MeasureCtx { fonts: &self.font_system, scale };
        // Pre-pass: let children compute their natural sizes. The root itself
        // always occupies the full viewport, so its measured size is unused.
        let _ = self.root.measure(Constraints::loose(viewport), &ctx);
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        let mut painter = Painter::new(&mut self.draw_list, &self.font_system, scale);
        self.root.paint(&mut painter, rect);
    }

    /// Surface teardown: deliver [`Item::cleanup`](crate::item::Item::cleanup)
    /// to the whole tree. The next [`sync`](Self::sync) re-attaches it.
    pub fn invalidate(&mut self) {
        self.root.cleanup();
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    use super::*;
    use crate::item::Item;
    use enki_engine::time::FrameTime;

    struct Tracer {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        children: Vec<ItemBox>,
    }

    impl Tracer {
        fn leaf(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self { name, log: Rc::clone(log), children: Vec::new() }
        }

        fn push(&mut self, event: &str) {
            self.log.borrow_mut().push(format!("{}:{event}", self.name));
        }
    }

    impl Item for Tracer {
        fn measure(&self, _constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
            Vec2::zero()
        }
        fn paint(&self, painter: &mut Painter, rect: Rect) {
            painter.fill_rect(rect, enki_engine::paint::Color::from_straight(1.0, 0.0, 0.0, 1.0));
        }
        fn children_mut(&mut self) -> &mut [ItemBox] {
            &mut self.children
        }
        fn attached(&mut self) {
            self.push("attached");
        }
        fn sync(&mut self, _ctx: &SyncCtx) {
            self.push("sync");
        }
        fn cleanup(&mut self) {
            self.push("cleanup");
        }
    }

    struct NullUnderlay;

    impl crate::item::Underlay for NullUnderlay {
        fn render(&mut self, _ctx: &RenderCtx<'_>, _target: &mut RenderTarget<'_>) {}
    }

    struct UnderlayHost {
        hook: NullUnderlay,
    }

    impl Item for UnderlayHost {
        fn measure(&self, _constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
            Vec2::zero()
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
        fn underlay(&mut self) -> Option<&mut dyn crate::item::Underlay> {
            Some(&mut self.hook)
        }
    }

    fn sync_ctx() -> SyncCtx {
        SyncCtx {
            surface_size: (640, 480),
            scale_factor: 1.0,
            time: FrameTime { dt: 0.016, now: Instant::now(), frame_index: 0 },
        }
    }

    fn tree(log: &Rc<RefCell<Vec<String>>>) -> ItemBox {
        let mut root = Tracer::leaf("root", log);
        let mut mid = Tracer::leaf("mid", log);
        mid.children.push(ItemBox::new(Tracer::leaf("leaf", log)));
        root.children.push(ItemBox::new(mid));
        ItemBox::new(root)
    }

    #[test]
    fn sync_walks_parents_before_children() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new(FontSystem::new(), tree(&log));
        scene.sync(&sync_ctx());
        let entries = log.borrow();
        let syncs: Vec<_> = entries.iter().filter(|e| e.ends_with(":sync")).collect();
        assert_eq!(syncs, ["root:sync", "mid:sync", "leaf:sync"]);
    }

    #[test]
    fn attached_delivered_once_before_first_sync() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new(FontSystem::new(), tree(&log));
        scene.sync(&sync_ctx());
        scene.sync(&sync_ctx());
        let entries = log.borrow();
        let attaches = entries.iter().filter(|e| e.ends_with(":attached")).count();
        assert_eq!(attaches, 3);
        // attach of the whole tree strictly precedes the first sync
        let first_sync = entries.iter().position(|e| e.ends_with(":sync")).unwrap();
        let last_attach = entries.iter().rposition(|e| e.ends_with(":attached")).unwrap();
        assert!(last_attach < first_sync);
    }

    #[test]
    fn invalidate_cleans_up_and_reattaches_on_next_sync() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new(FontSystem::new(), tree(&log));
        scene.sync(&sync_ctx());
        scene.invalidate();
        scene.sync(&sync_ctx());

        let entries = log.borrow();
        let cleanups = entries.iter().filter(|e| e.ends_with(":cleanup")).count();
        assert_eq!(cleanups, 3);
        let attaches = entries.iter().filter(|e| e.ends_with(":attached")).count();
        assert_eq!(attaches, 6); // whole tree re-attached after invalidation
    }

    #[test]
    fn repeated_invalidate_is_safe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new(FontSystem::new(), tree(&log));
        scene.sync(&sync_ctx());
        scene.invalidate();
        scene.invalidate();
        let entries = log.borrow();
        assert_eq!(entries.iter().filter(|e| e.ends_with(":cleanup")).count(), 6);
    }

    #[test]
    fn underlay_detection_reaches_nested_items() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new(FontSystem::new(), tree(&log));
        assert!(!scene.has_underlay());

        let mut root = Tracer::leaf("root", &log);
        root.children.push(ItemBox::new(UnderlayHost { hook: NullUnderlay }));
        let mut scene = Scene::new(FontSystem::new(), ItemBox::new(root));
        assert!(scene.has_underlay());
    }

    #[test]
    fn build_frame_clears_previous_draw_list() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = Scene::new(FontSystem::new(), tree(&log));
        scene.build_frame(Vec2::new(640.0, 480.0), 1.0);
        assert_eq!(scene.draw_list.items().len(), 1); // root tracer's rect
        scene.build_frame(Vec2::new(640.0, 480.0), 1.0);
        assert_eq!(scene.draw_list.items().len(), 1); // replaced, not appended
    }
}
