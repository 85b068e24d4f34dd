//! Frame timing.
//!
//! One `FrameClock` lives next to each window and ticks once per redraw;
//! the resulting `FrameTime` flows to the application through the frame
//! context and to items through their sync phase.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
