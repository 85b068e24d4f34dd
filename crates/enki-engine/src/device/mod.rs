//! wgpu bring-up and per-frame surface plumbing.
//!
//! [`Gpu`] owns the device, queue, and configured surface for one window;
//! [`GpuInit`] captures everything tunable about that bring-up. Redraws
//! acquire a [`GpuFrame`], and acquisition failures surface as a
//! [`SurfaceErrorAction`] the frame loop acts on.

mod context;
mod error;
mod frame;
mod init;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
