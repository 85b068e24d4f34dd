//! Color handling for fills, borders, and text.
//!
//! Solid premultiplied colors are the only paint kind today. Geometry
//! stays in `coords`; this module is purely about channel representation.

pub mod color;

pub use color::Color;
