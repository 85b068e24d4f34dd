//! Font loading and text measurement.
//!
//! Only CPU-side concerns live here. The glyph atlas and the quads that
//! actually reach the GPU belong to the text renderer, which borrows the
//! [`FontSystem`] during replay.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
