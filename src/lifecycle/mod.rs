//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → validation → metrics exporter → bind listener → serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger → server stops accepting → in-flight requests finish → exit
//!
//! Signals (signals.rs):
//!     SIGINT → graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{spawn_server, RunningServer, StartupError};
