//! Geometry primitives used on the CPU side of the pipeline.
//!
//! Everything here is expressed in logical pixels with a top-left origin
//! (+X right, +Y down). Physical pixels appear only inside renderers,
//! which scale by the window's DPI factor when building GPU instances,
//! and NDC appears only inside shaders.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
