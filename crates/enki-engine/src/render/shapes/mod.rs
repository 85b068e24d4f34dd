//! One renderer per draw command kind, plus their shared GPU plumbing.

mod common;

pub mod rect;
pub mod rounded_rect;
pub mod text;
