use crate::domain::LogEntry;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMetrics {
    pub len: usize,
    pub pushed: u64,
    pub drained: u64,
    pub peak_len: usize,
}

/// Ordered, thread-safe buffer of pending log entries.
///
/// Append-only between drains. The queue is deliberately unbounded: under
/// sustained transport failure it grows until delivery resumes or the
/// process ends (see DESIGN.md for the policy decision).
#[derive(Debug, Default)]
pub struct EntryQueue {
    entries: Mutex<Vec<LogEntry>>,
    pushed: AtomicU64,
    drained: AtomicU64,
    peak_len: AtomicUsize,
}

impl EntryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail. The lock is held only for the push itself, so
    /// callers are never blocked behind network I/O.
    pub fn push(&self, entry: LogEntry) {
        let len = {
            let mut entries = self.entries.lock();
            entries.push(entry);
            entries.len()
        };
        self.pushed.fetch_add(1, Ordering::Relaxed);
        self.update_peak_len(len);
    }

    /// Atomically takes the full current sequence and installs a fresh
    /// empty queue. Entries pushed after the swap land in the next drain;
    /// nothing pushed before the swap is lost.
    pub fn drain_snapshot(&self) -> Vec<LogEntry> {
        let batch = std::mem::take(&mut *self.entries.lock());
        self.drained.fetch_add(batch.len() as u64, Ordering::Relaxed);
        batch
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> QueueMetrics {
        QueueMetrics {
            len: self.len(),
            pushed: self.pushed.load(Ordering::Relaxed),
            drained: self.drained.load(Ordering::Relaxed),
            peak_len: self.peak_len.load(Ordering::Relaxed),
        }
    }

    fn update_peak_len(&self, current: usize) {
        let mut peak = self.peak_len.load(Ordering::Relaxed);
        while current > peak {
            match self.peak_len.compare_exchange_weak(
                peak,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => peak = observed,
            }
        }
    }
}
