//! The parsed form of an `.ekml` document.

/// A literal on the right-hand side of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Double-quoted text.
    Str(String),
    /// Numeric literal; integers parse as floats.
    Number(f32),
    /// Straight-alpha RGBA bytes from `#rrggbb` / `#rrggbbaa`.
    Color([u8; 4]),
    /// Bare word: font names, enum-like variants.
    Ident(String),
}

/// One `key: value` line inside an item block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
}

/// An item instantiation in the scene tree.
///
/// ```ekml
/// Label "Stats" {
///     size: 14
///     color: #e0e0e0ff
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Item type name or component alias: `"Group"`, `"Label"`, `"Squircle"`.
    pub item: String,
    /// Inline string content following the type name, if any.
    pub content: Option<String>,
    /// `key: value` lines from the block, in source order.
    pub props: Vec<Prop>,
    /// Nested child items from the block, in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// The raw value of a property, by key.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        let hit = self.props.iter().find(|prop| prop.key == key)?;
        Some(&hit.value)
    }

    /// Numeric property, or `None` when absent or of another kind.
    pub fn prop_f32(&self, key: &str) -> Option<f32> {
        match self.prop(key)? {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String-like property; both `Str` and `Ident` qualify.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Str(text) | Value::Ident(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Color property as straight-alpha RGBA bytes.
    pub fn prop_color(&self, key: &str) -> Option<[u8; 4]> {
        match self.prop(key)? {
            Value::Color(rgba) => Some(*rgba),
            _ => None,
        }
    }
}

/// `import "path/to/file.ekml" as Alias`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: String,
    pub alias: String,
}

/// The top-level parse result for one `.ekml` source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub imports: Vec<Import>,
    pub root: Node,
}
