pub mod log_entry;
pub mod log_level;

pub use log_entry::{LogEntry, MISSING_MESSAGE_TEXT};
pub use log_level::LogLevel;
