//! The seam between the platform loop and application code.
//!
//! Applications implement [`App`] and receive a [`FrameCtx`] per
//! redraw; nothing about the runtime's window bookkeeping leaks past
//! these types.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
