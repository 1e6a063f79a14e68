use std::sync::atomic::{AtomicBool, Ordering};

/// Server-controlled gate over the whole logging pipeline.
///
/// Only the delivery worker mutates this, from response interpretation;
/// the public logging surface reads it to short-circuit enqueues. Once
/// disabled it stays disabled until a later response re-enables it.
#[derive(Debug)]
pub struct KillSwitch {
    enabled: AtomicBool,
}

impl KillSwitch {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

impl Default for KillSwitch {
    fn default() -> Self {
        Self::new()
    }
}
