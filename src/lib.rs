// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. EntryQueue in buffer module
    clippy::must_use_candidate       // Annotated selectively on critical APIs
)]

pub mod app;
pub mod buffer;
pub mod device;
pub mod domain;
pub mod sender;
pub mod worker;

// Re-export main types for easy access
pub use app::{Config, EchoLogger};
pub use device::{DeviceContext, DeviceContextProvider, DeviceInfoSource, NetworkPermission};
pub use domain::{LogEntry, LogLevel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
