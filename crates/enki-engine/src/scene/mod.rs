//! Recorded draw stream.
//!
//! The scene layer records what to draw as renderer-agnostic commands;
//! the renderers under `render::shapes` consume them in paint order.
//! Ordering is a z layer plus a per-frame sequence number, so equal
//! layers replay in recording order.

mod cmd;
mod key;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
pub use shapes::Border;
