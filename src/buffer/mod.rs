pub mod queue;
pub mod switch;

pub use queue::{EntryQueue, QueueMetrics};
pub use switch::KillSwitch;
