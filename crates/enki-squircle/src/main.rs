//! Squircle demo: a raw-wgpu item embedded under an `enki-scene` item tree.
//!
//! The `Squircle` item paints the whole window from its underlay hook; the
//! translucent caption panel on top is ordinary scene markup.

use enki_engine::logging::{init_logging, LoggingConfig};
use enki_scene::Application;

mod renderer;
mod squircle;

use squircle::Squircle;

fn main() {
    init_logging(LoggingConfig::default());

    Application::new()
        .title("Squircle")
        .size(480.0, 480.0)
        .item::<Squircle>("Squircle")
        .font("body", load_font())
        .run(include_str!("../ui/main.ekml"))
}

fn load_font() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}
