use enki_scene::prelude::*;

use crate::renderer::SquircleRenderer;

/// Markup-registrable item that paints the squircle pattern as a window
/// underlay.
///
/// `t` (clamped to 0..1) sets the band threshold of the shader pattern. The
/// GPU renderer is created on the first sync after the item is attached and
/// dropped again when the surface is invalidated.
pub struct Squircle {
    t: f32,
    renderer: Option<SquircleRenderer>,
}

impl Default for Squircle {
    fn default() -> Self {
        Self { t: 0.0, renderer: None }
    }
}

impl Item for Squircle {
    fn apply(&mut self, key: &str, value: &Value) {
        if key == "t" {
            if let Value::Number(n) = value {
                self.t = n.clamp(0.0, 1.0);
            }
        }
    }

    // The item occupies no scene-layer space; all output comes from the
    // underlay hook.
    fn measure(&self, constraints: Constraints, _ctx: &MeasureCtx) -> Vec2 {
        constraints.constrain(Vec2::zero())
    }

    fn paint(&self, _painter: &mut Painter, _rect: Rect) {}

    fn attached(&mut self) {
        log::debug!("squircle item attached");
    }

    fn sync(&mut self, ctx: &SyncCtx) {
        let renderer = self.renderer.get_or_insert_with(SquircleRenderer::new);
        renderer.set_viewport(ctx.surface_size);
        renderer.set_t(self.t);
    }

    fn underlay(&mut self) -> Option<&mut dyn Underlay> {
        self.renderer.as_mut().map(|r| r as &mut dyn Underlay)
    }

    fn cleanup(&mut self) {
        self.renderer = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use enki_engine::text::FontSystem;

    use super::*;

    fn sync_ctx() -> SyncCtx {
        SyncCtx {
            surface_size: (640, 480),
            scale_factor: 1.0,
            time: FrameTime { dt: 0.016, now: Instant::now(), frame_index: 0 },
        }
    }

    #[test]
    fn t_prop_is_applied_and_clamped() {
        let mut sq = Squircle::default();
        sq.apply("t", &Value::Number(0.7));
        assert_eq!(sq.t, 0.7);

        sq.apply("t", &Value::Number(3.0));
        assert_eq!(sq.t, 1.0);
        sq.apply("t", &Value::Number(-1.0));
        assert_eq!(sq.t, 0.0);
    }

    #[test]
    fn non_numeric_and_unknown_props_are_ignored() {
        let mut sq = Squircle::default();
        sq.apply("t", &Value::Str("fast".into()));
        sq.apply("spin", &Value::Number(3.0));
        assert_eq!(sq.t, 0.0);
    }

    #[test]
    fn renderer_is_created_lazily_on_sync() {
        let mut sq = Squircle::default();
        assert!(sq.underlay().is_none());

        sq.sync(&sync_ctx());
        assert!(sq.renderer.is_some());
        assert!(sq.underlay().is_some());
    }

    #[test]
    fn cleanup_drops_the_renderer_until_the_next_sync() {
        let mut sq = Squircle::default();
        sq.sync(&sync_ctx());
        assert!(sq.renderer.is_some());

        sq.cleanup();
        assert!(sq.renderer.is_none());
        assert!(sq.underlay().is_none());

        sq.sync(&sync_ctx());
        assert!(sq.renderer.is_some());
    }

    #[test]
    fn markup_squircle_reaches_the_underlay_path() {
        let mut registry = ItemRegistry::new();
        registry.register::<Squircle>("Squircle");

        let loader = SceneLoader::new();
        let doc = loader
            .parse("Group {\n    Squircle { t: 0.5 }\n}")
            .unwrap();
        let root = loader.build(&doc, &registry, &FontMap::new());

        let mut scene = Scene::new(FontSystem::new(), root);
        assert!(!scene.has_underlay());

        scene.sync(&sync_ctx());
        assert!(scene.has_underlay());
    }
}
