//! Windowing, GPU bring-up, and instanced 2D drawing for the enki
//! stack.
//!
//! The pieces layer bottom-up: [`window`] runs the winit event loop,
//! [`device`] owns the wgpu device and surface for its window, [`scene`]
//! collects draw commands into a retained list, and [`render`] replays
//! that list with one instanced pass per shape kind. [`core`] is the
//! seam applications implement against.

pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;
