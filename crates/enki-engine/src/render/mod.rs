//! Shape renderers over wgpu.
//!
//! Each renderer owns its pipeline and buffers, filters one command
//! kind out of a [`DrawList`](crate::scene::DrawList), and records one
//! instanced pass for the whole batch. Geometry reaches the renderers
//! in logical pixels with a top-left origin; vertex shaders map it to
//! clip space with a per-pass screen uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
