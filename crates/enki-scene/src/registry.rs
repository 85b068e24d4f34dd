use std::collections::HashMap;

use crate::item::Item;

type ItemFactory = Box<dyn Fn() -> Box<dyn Item>>;

/// Name → factory table for custom item types.
///
/// Registering a type makes it instantiable from markup: a node whose type
/// name matches a registered entry is created through the factory, and its
/// markup properties are delivered via [`Item::apply`].
///
/// ```rust,ignore
/// let mut registry = ItemRegistry::new();
/// registry.register::<Squircle>("Squircle");
/// // markup: Squircle { t: 0.5 }
/// ```
pub struct ItemRegistry {
    factories: HashMap<String, ItemFactory>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Register `I` under `name`, constructed via `Default`.
    pub fn register<I: Item + Default>(&mut self, name: impl Into<String>) {
        self.factories.insert(name.into(), Box::new(|| Box::new(I::default())));
    }

    /// Register a custom factory under `name`.
    ///
    /// Use this when construction needs captured state (shared handles,
    /// configuration) that `Default` cannot express.
    pub fn register_with<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Item> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Instantiate the item registered under `name`, if any.
    pub fn create(&self, name: &str) -> Option<Box<dyn Item>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::{Constraints, MeasureCtx};
    use crate::painter::Painter;
    use enki_engine::coords::{Rect, Vec2};
    use enki_ekml::Value;

    #[derive(Default)]
    struct Marker {
        level: Rc<RefCell<f32>>,
    }

    impl Item for Marker {
        fn apply(&mut self, key: &str, value: &Value) {
            if key == "level" {
                if let Value::Number(v) = value {
                    *self.level.borrow_mut() = *v;
                }
            }
        }
        fn measure(&self, _constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
            Vec2::zero()
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    #[test]
    fn registered_type_is_created() {
        let mut registry = ItemRegistry::new();
        registry.register::<Marker>("Marker");
        assert!(registry.contains("Marker"));
        assert!(registry.create("Marker").is_some());
    }

    #[test]
    fn unknown_name_yields_none() {
        let registry = ItemRegistry::new();
        assert!(!registry.contains("Marker"));
        assert!(registry.create("Marker").is_none());
    }

    #[test]
    fn factory_captures_state_and_props_reach_the_item() {
        let level = Rc::new(RefCell::new(0.0f32));
        let shared = Rc::clone(&level);
        let mut registry = ItemRegistry::new();
        registry.register_with("Marker", move || {
            Box::new(Marker { level: Rc::clone(&shared) })
        });

        let mut item = registry.create("Marker").unwrap();
        item.apply("level", &Value::Number(3.5));
        item.apply("unrelated", &Value::Number(9.0));
        assert_eq!(*level.borrow(), 3.5);
    }
}
