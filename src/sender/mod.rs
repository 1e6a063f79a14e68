pub mod client;
pub mod serialization;

pub use client::{ClientStats, LogClient, SenderError};
pub use serialization::BatchComposer;
