pub mod config;
pub mod logger;

pub use config::{Config, ConfigError, DEFAULT_ENDPOINT};
pub use logger::EchoLogger;
