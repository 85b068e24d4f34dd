use std::fmt;
use std::process;

use winit::dpi::LogicalSize;

use enki_engine::coords::Vec2;
use enki_engine::core::{App as EngineApp, AppControl, FrameCtx};
use enki_engine::device::GpuInit;
use enki_engine::paint::Color;
use enki_engine::render::shapes::rect::RectRenderer;
use enki_engine::render::shapes::rounded_rect::RoundedRectRenderer;
use enki_engine::render::shapes::text::TextRenderer;
use enki_engine::render::{RenderCtx, RenderTarget};
use enki_engine::text::FontSystem;
use enki_engine::window::{Runtime, RuntimeConfig};

use enki_ekml::Document;

use crate::item::{Item, SyncCtx};
use crate::loader::{FontMap, SceneLoader};
use crate::registry::ItemRegistry;
use crate::scene::Scene;

/// Builder for a windowed scene application.
///
/// Configure the window, fonts, custom item types, and component documents,
/// then hand the main `.ekml` document to [`run`](Self::run):
///
/// ```rust,ignore
/// Application::new()
///     .title("Squircle")
///     .size(400.0, 400.0)
///     .item::<Squircle>("Squircle")
///     .font("body", include_bytes!("font.ttf").to_vec())
///     .run(include_str!("ui/main.ekml"));
/// ```
pub struct Application {
    title: String,
    size: (f64, f64),
    clear: Color,
    fonts: Vec<(String, Vec<u8>)>,
    components: Vec<(String, String)>,
    registry: ItemRegistry,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "enki".to_string(),
            size: (1280.0, 720.0),
            clear: Color::from_straight(0.07, 0.07, 0.09, 1.0),
            fonts: Vec::new(),
            components: Vec::new(),
            registry: ItemRegistry::new(),
        }
    }

    /// Window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    /// Background color for frames without an underlay. A scene that
    /// contains an underlay item paints its own background instead.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear = color;
        self
    }

    /// Register a named font for `.ekml` `font: name` properties.
    ///
    /// The first font whose bytes load successfully becomes the default.
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Register a custom item type under a markup name, built via `Default`.
    pub fn item<I: Item + Default>(mut self, name: impl Into<String>) -> Self {
        self.registry.register::<I>(name);
        self
    }

    /// Register a custom item type with an explicit factory.
    pub fn item_with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Item> + 'static,
    {
        self.registry.register_with(name, factory);
        self
    }

    /// Register an `.ekml` source under `alias` so other documents can
    /// instantiate it by name.
    pub fn component(mut self, alias: impl Into<String>, src: impl Into<String>) -> Self {
        self.components.push((alias.into(), src.into()));
        self
    }

    /// Parse `main_src` as the root document and run the event loop.
    ///
    /// This never returns; the process exits when the window closes.
    pub fn run(self, main_src: &str) -> ! {
        match enki_ekml::parse(main_src) {
            Ok(doc) => SceneApp::new(self, doc).launch(),
            Err(err) => fail("main scene document did not parse", &err),
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn fail(what: &str, err: &dyn fmt::Display) -> ! {
    eprintln!("{what}: {err}");
    process::exit(1);
}

/// The one instanced renderer per shape kind, replaying the scene's draw
/// list after any underlays have painted.
#[derive(Default)]
struct Renderers {
    rect: RectRenderer,
    rounded_rect: RoundedRectRenderer,
    text: TextRenderer,
}

impl Renderers {
    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &mut Scene) {
        scene.paint_underlays(ctx, target);
        self.rect.render(ctx, target, &mut scene.draw_list);
        self.rounded_rect.render(ctx, target, &mut scene.draw_list);
        self.text.render(ctx, target, &mut scene.draw_list, &scene.font_system);
    }
}

/// The assembled application: scene tree plus renderers, driving the
/// engine's [`App`](EngineApp) frame hooks. User code never sees this type.
struct SceneApp {
    title: String,
    size: (f64, f64),
    clear: Color,
    scene: Scene,
    renderers: Renderers,
}

impl SceneApp {
    fn new(app: Application, doc: Document) -> Self {
        let mut font_system = FontSystem::new();
        let mut fonts = FontMap::new();
        for (name, bytes) in &app.fonts {
            match font_system.load_font(bytes) {
                Ok(id) => {
                    fonts.insert(name.clone(), id);
                }
                Err(err) => log::warn!("font {name:?} failed to load: {err}"),
            }
        }

        let mut loader = SceneLoader::new();
        for (alias, src) in &app.components {
            if let Err(err) = loader.register_source(alias, src) {
                log::warn!("component {alias:?} failed to parse: {err}");
            }
        }
        let root = loader.build(&doc, &app.registry, &fonts);

        Self {
            title: app.title,
            size: app.size,
            clear: app.clear,
            scene: Scene::new(font_system, root),
            renderers: Renderers::default(),
        }
    }

    fn launch(self) -> ! {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.size.0, self.size.1),
        };
        match Runtime::run(config, GpuInit::default(), self) {
            // The loop only comes back once the window is gone.
            Ok(()) => process::exit(0),
            Err(err) => fail("the event loop shut down with an error", &err),
        }
    }
}

impl EngineApp for SceneApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let scale = ctx.window.scale_factor();

        self.scene.sync(&SyncCtx {
            surface_size: ctx.window.physical_size(),
            scale_factor: scale,
            time: ctx.time,
        });
        self.scene.build_frame(Vec2::new(w, h), scale);

        // An underlay owns the background; clear only when no item paints one.
        let clear = (!self.scene.has_underlay()).then_some(self.clear);

        let (scene, renderers) = (&mut self.scene, &mut self.renderers);
        ctx.render(clear, |rctx, target| renderers.draw(rctx, target, scene))
    }

    fn on_device_lost(&mut self) {
        self.scene.invalidate();
    }
}
