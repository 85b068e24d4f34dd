//! Logger setup.
//!
//! All engine code logs through the `log` facade; the choice of backend
//! is made exactly once, here, by whoever owns `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
