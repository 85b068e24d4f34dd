use std::collections::HashMap;

use enki_engine::paint::Color;
use enki_engine::scene::Border;
use enki_engine::text::FontId;

use enki_ekml::{Document, Node, ParseError, Value};

use crate::anchors::{AnchorVal, Anchors, SizeHint};
use crate::item::ItemBox;
use crate::items::{Group, Label, Panel};
use crate::layout::Edges;
use crate::registry::ItemRegistry;

/// A name-keyed map of loaded font handles.
///
/// Built by the application while loading fonts; consulted by the loader to
/// resolve `font: name` properties. The first registered font becomes the
/// default for nodes that name none.
pub struct FontMap {
    entries: HashMap<String, FontId>,
    default_id: Option<FontId>,
}

impl FontMap {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), default_id: None }
    }

    pub fn insert(&mut self, name: impl Into<String>, id: FontId) {
        if self.default_id.is_none() {
            self.default_id = Some(id);
        }
        self.entries.insert(name.into(), id);
    }

    /// Returns the [`FontId`] registered under `name`, or `None` if the name
    /// was not registered or the font failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.entries.get(name).copied()
    }

    /// The first successfully registered font.
    pub fn default_font(&self) -> Option<FontId> {
        self.default_id
    }
}

impl Default for FontMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses and caches `.ekml` documents, and builds item trees from them.
///
/// Type-name dispatch, in order: built-in items (`Group`, `Panel`, `Label`),
/// then types registered in the [`ItemRegistry`], then component aliases
/// registered via [`register`](Self::register). Unknown names degrade to an
/// empty `Group` with a warning.
///
/// The layout keys `left`, `top`, `right`, `bottom`, `width`, `height` are
/// reserved on every node: the loader consumes them into [`Anchors`] and
/// never forwards them to [`Item::apply`](crate::item::Item::apply).
pub struct SceneLoader {
    components: HashMap<String, Document>,
}

impl SceneLoader {
    pub fn new() -> Self {
        Self { components: HashMap::new() }
    }

    /// Parse an `.ekml` source string into a [`Document`].
    pub fn parse(&self, src: &str) -> Result<Document, ParseError> {
        enki_ekml::parse(src)
    }

    /// Register a pre-parsed document under an alias so scene files can
    /// instantiate it by name.
    pub fn register(&mut self, alias: impl Into<String>, doc: Document) {
        self.components.insert(alias.into(), doc);
    }

    /// Parse `src` and register the resulting document under `alias`.
    pub fn register_source(&mut self, alias: &str, src: &str) -> Result<(), ParseError> {
        let doc = self.parse(src)?;
        self.components.insert(alias.to_string(), doc);
        Ok(())
    }

    /// Build an item tree from a previously parsed document.
    ///
    /// Every alias the document imports must already be registered, either
    /// as a component or as a custom item type; nodes using an unregistered
    /// alias fall through to the unknown-type path.
    pub fn build(&self, doc: &Document, registry: &ItemRegistry, fonts: &FontMap) -> ItemBox {
        for import in &doc.imports {
            if !self.components.contains_key(&import.alias) && !registry.contains(&import.alias) {
                log::warn!(
                    "import {:?} as {}: alias is not registered",
                    import.path,
                    import.alias
                );
            }
        }
        let builder = TreeBuilder { components: &self.components, registry, fonts };
        builder.build(&doc.root)
    }
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// One tree-building pass; bundles the lookups every node needs.
struct TreeBuilder<'a> {
    components: &'a HashMap<String, Document>,
    registry: &'a ItemRegistry,
    fonts: &'a FontMap,
}

impl TreeBuilder<'_> {
    fn build(&self, node: &Node) -> ItemBox {
        let mut item = match node.item.as_str() {
            "Group" => self.group(node),
            "Panel" => self.panel(node),
            "Label" => self.label(node),
            name => {
                if let Some(created) = self.registered(name, node) {
                    created
                } else if let Some(instance) = self.component(name, node) {
                    return instance;
                } else {
                    log::warn!("unknown item type '{name}', substituting an empty Group");
                    ItemBox::new(Group::new())
                }
            }
        };
        item.anchors = anchors_of(node);
        item
    }

    fn group(&self, node: &Node) -> ItemBox {
        let mut group = Group::new();
        if let Some(tint) = node.prop_color("bg") {
            group = group.bg(rgba(tint));
        }
        for child in &node.children {
            group.push(self.build(child));
        }
        ItemBox::new(group)
    }

    fn panel(&self, node: &Node) -> ItemBox {
        let mut panel = Panel::new();
        match explicit_padding(node) {
            Some(edges) => panel = panel.padding(edges),
            None => {
                if let Some(all) = node.prop_f32("padding") {
                    panel = panel.padding_all(all);
                }
            }
        }
        if let Some(tint) = node.prop_color("bg") {
            panel = panel.background(rgba(tint));
        }
        if let Some(radius) = node.prop_f32("corner_radius") {
            panel = panel.corner_radius(radius);
        }
        if let Some(width) = node.prop_f32("border_width") {
            let tint = node.prop_color("border_color").unwrap_or([0xff, 0xff, 0xff, 0x4d]);
            panel = panel.border(Border::new(width, rgba(tint)));
        }
        if let Some(first) = node.children.first() {
            panel = panel.child(self.build(first));
        }
        ItemBox::new(panel)
    }

    fn label(&self, node: &Node) -> ItemBox {
        let Some(font) = self.font_for(node) else {
            log::warn!("Label with no loaded font, substituting an empty Group");
            return ItemBox::new(Group::new());
        };
        let text = node.content.clone().unwrap_or_default();
        let size = node.prop_f32("size").unwrap_or(14.0);
        let color = rgba(node.prop_color("color").unwrap_or([0xff; 4]));
        ItemBox::new(Label::new(text, font, size, color))
    }

    /// Instantiates a type the application registered, forwarding every
    /// non-layout property and the content string to [`Item::apply`] and
    /// [`Item::set_content`].
    ///
    /// [`Item::apply`]: crate::item::Item::apply
    /// [`Item::set_content`]: crate::item::Item::set_content
    fn registered(&self, name: &str, node: &Node) -> Option<ItemBox> {
        let mut item = self.registry.create(name)?;
        for prop in &node.props {
            if !is_layout_key(&prop.key) {
                item.apply(&prop.key, &prop.value);
            }
        }
        if let Some(content) = &node.content {
            item.set_content(content);
        }
        if !node.children.is_empty() {
            log::warn!(
                "item '{name}': registered items take no markup children, dropping {}",
                node.children.len()
            );
        }
        Some(ItemBox::from_boxed(item))
    }

    /// Expands a node whose type names a registered component document.
    fn component(&self, name: &str, node: &Node) -> Option<ItemBox> {
        let doc = self.components.get(name)?;
        let mut instance = self.build(&doc.root);
        // Layout keys at the use site win over the component root's own.
        if node.props.iter().any(|prop| is_layout_key(&prop.key)) {
            instance.anchors = anchors_of(node);
        }
        Some(instance)
    }

    fn font_for(&self, node: &Node) -> Option<FontId> {
        if let Some(name) = node.prop_str("font") {
            match self.fonts.get(name) {
                Some(id) => return Some(id),
                None => log::warn!("font {name:?} is not loaded, falling back to the default"),
            }
        }
        self.fonts.default_font()
    }
}

fn anchors_of(node: &Node) -> Anchors {
    Anchors {
        left: edge_offset(node, "left"),
        top: edge_offset(node, "top"),
        right: edge_offset(node, "right"),
        bottom: edge_offset(node, "bottom"),
        width: extent(node, "width"),
        height: extent(node, "height"),
    }
}

/// `left: 10` pins 10 px in from the parent edge; `left: "12%"` pins at a
/// fraction of the parent extent.
fn edge_offset(node: &Node, key: &str) -> Option<AnchorVal> {
    match node.prop(key)? {
        Value::Number(px) => Some(AnchorVal::Px(*px)),
        Value::Str(text) | Value::Ident(text) => percentage(text).map(AnchorVal::Pct),
        Value::Color(_) => None,
    }
}

/// `width: 200`, `width: "50%"`, or `width: fill`.
fn extent(node: &Node, key: &str) -> SizeHint {
    match node.prop(key) {
        Some(Value::Number(px)) => SizeHint::Px(*px),
        Some(Value::Str(text)) | Some(Value::Ident(text)) if text == "fill" => SizeHint::Fill,
        Some(Value::Str(text)) | Some(Value::Ident(text)) => {
            percentage(text).map_or(SizeHint::Natural, SizeHint::Pct)
        }
        _ => SizeHint::Natural,
    }
}

/// Per-side `padding_*` keys, collected when at least one side is present.
fn explicit_padding(node: &Node) -> Option<Edges> {
    let sides = ["padding_top", "padding_right", "padding_bottom", "padding_left"]
        .map(|key| node.prop_f32(key));
    if sides.iter().all(Option::is_none) {
        return None;
    }
    let [top, right, bottom, left] = sides.map(|side| side.unwrap_or(0.0));
    Some(Edges { top, right, bottom, left })
}

fn is_layout_key(key: &str) -> bool {
    matches!(key, "left" | "top" | "right" | "bottom" | "width" | "height")
}

/// Parses `"45%"` into `0.45`.
fn percentage(text: &str) -> Option<f32> {
    let number = text.strip_suffix('%')?.trim();
    Some(number.parse::<f32>().ok()? / 100.0)
}

fn rgba([r, g, b, a]: [u8; 4]) -> Color {
    Color::from_srgb_u8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    use super::*;
    use crate::item::{Item, SyncCtx};
    use crate::layout::{Constraints, MeasureCtx};
    use crate::painter::Painter;
    use enki_engine::coords::{Rect, Vec2};
    use enki_engine::text::FontSystem;
    use enki_engine::time::FrameTime;

    struct Probe {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Item for Probe {
        fn apply(&mut self, key: &str, value: &Value) {
            let rendered = match value {
                Value::Number(v) => v.to_string(),
                Value::Str(s) | Value::Ident(s) => s.clone(),
                Value::Color(_) => "color".to_string(),
            };
            self.log.borrow_mut().push(format!("apply:{key}={rendered}"));
        }
        fn set_content(&mut self, text: &str) {
            self.log.borrow_mut().push(format!("content:{text}"));
        }
        fn measure(&self, _constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
            Vec2::zero()
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
        fn sync(&mut self, _ctx: &SyncCtx) {
            self.log.borrow_mut().push("sync".to_string());
        }
    }

    fn probe_registry(log: &Rc<RefCell<Vec<String>>>) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        let log = Rc::clone(log);
        registry.register_with("Probe", move || Box::new(Probe { log: Rc::clone(&log) }));
        registry
    }

    fn sync_ctx() -> SyncCtx {
        SyncCtx {
            surface_size: (800, 600),
            scale_factor: 1.0,
            time: FrameTime { dt: 0.016, now: Instant::now(), frame_index: 0 },
        }
    }

    fn build_from(src: &str, registry: &ItemRegistry) -> ItemBox {
        let loader = SceneLoader::new();
        let doc = loader.parse(src).unwrap();
        loader.build(&doc, registry, &FontMap::new())
    }

    #[test]
    fn registered_item_receives_props_and_content() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = probe_registry(&log);
        build_from(r#"Probe "hello" { rate: 2.5 mode: fast }"#, &registry);
        let log = log.borrow();
        assert!(log.contains(&"apply:rate=2.5".to_string()));
        assert!(log.contains(&"apply:mode=fast".to_string()));
        assert!(log.contains(&"content:hello".to_string()));
    }

    #[test]
    fn anchor_keys_are_consumed_not_applied() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = probe_registry(&log);
        let root = build_from("Probe { left: 10  bottom: 4  rate: 1 }", &registry);
        assert_eq!(root.anchors.left, Some(AnchorVal::Px(10.0)));
        assert_eq!(root.anchors.bottom, Some(AnchorVal::Px(4.0)));
        let log = log.borrow();
        assert!(log.contains(&"apply:rate=1".to_string()));
        assert!(!log.iter().any(|entry| entry.starts_with("apply:left")));
        assert!(!log.iter().any(|entry| entry.starts_with("apply:bottom")));
    }

    #[test]
    fn percent_and_fill_anchor_forms() {
        let registry = ItemRegistry::new();
        let root = build_from(r#"Panel { top: "25%"  width: fill  height: "50%" }"#, &registry);
        assert_eq!(root.anchors.top, Some(AnchorVal::Pct(0.25)));
        assert_eq!(root.anchors.width, SizeHint::Fill);
        assert_eq!(root.anchors.height, SizeHint::Pct(0.5));
    }

    #[test]
    fn group_children_are_walked_by_sync() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = probe_registry(&log);
        let mut root = build_from("Group { Probe { }  Panel { Probe { } } }", &registry);
        root.sync(&sync_ctx());
        let syncs = log.borrow().iter().filter(|e| *e == "sync").count();
        assert_eq!(syncs, 2);
    }

    #[test]
    fn component_alias_expands_registered_document() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = probe_registry(&log);
        let mut loader = SceneLoader::new();
        loader.register_source("Gauge", "Probe { rate: 7 }").unwrap();
        let doc = loader.parse("Group { Gauge { } }").unwrap();
        loader.build(&doc, &registry, &FontMap::new());
        assert!(log.borrow().contains(&"apply:rate=7".to_string()));
    }

    #[test]
    fn component_keeps_its_anchors_unless_overridden() {
        let registry = ItemRegistry::new();
        let mut loader = SceneLoader::new();
        loader.register_source("Card", "Panel { left: 8  width: 120 }").unwrap();

        let plain = loader.parse("Card { }").unwrap();
        let root = loader.build(&plain, &registry, &FontMap::new());
        assert_eq!(root.anchors.left, Some(AnchorVal::Px(8.0)));
        assert_eq!(root.anchors.width, SizeHint::Px(120.0));

        let moved = loader.parse("Card { left: 40 }").unwrap();
        let root = loader.build(&moved, &registry, &FontMap::new());
        assert_eq!(root.anchors.left, Some(AnchorVal::Px(40.0)));
        // The whole anchor set is replaced, so the width hint resets too.
        assert_eq!(root.anchors.width, SizeHint::Natural);
    }

    #[test]
    fn unknown_type_degrades_to_empty_group() {
        let registry = ItemRegistry::new();
        let mut root = build_from("Group { Mystery { } }", &registry);
        assert!(!root.has_underlay());
        let fonts = FontSystem::new();
        let ctx = MeasureCtx { fonts: &fonts, scale: 1.0 };
        let size = root.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::zero());
    }

    #[test]
    fn label_without_fonts_degrades_to_empty_group() {
        let registry = ItemRegistry::new();
        let mut root = build_from(r#"Label "caption" { size: 16 }"#, &registry);
        assert!(!root.has_underlay());
        root.sync(&sync_ctx());
    }
}
