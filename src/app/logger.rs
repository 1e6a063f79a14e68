use super::config::{Config, ConfigError};
use crate::buffer::{EntryQueue, KillSwitch, QueueMetrics};
use crate::device::{DeviceContextProvider, NetworkPermission};
use crate::domain::{LogEntry, LogLevel};
use crate::sender::LogClient;
use crate::worker::{DeliveryWorker, WorkerParts};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use uuid::Uuid;

/// Fire-and-forget logging front end.
///
/// One instance per host application, created explicitly and passed around
/// (no global singleton). `initialize` starts the delivery worker and is
/// idempotent; every logging call swallows internal faults and reports
/// them only through `tracing` — no public operation ever returns an error
/// or panics after construction.
pub struct EchoLogger {
    application_id: String,
    session_id: String,
    config: Config,
    queue: Arc<EntryQueue>,
    switch: Arc<KillSwitch>,
    provider: Arc<dyn DeviceContextProvider>,
    permission: Arc<dyn NetworkPermission>,
    client: LogClient,
    cancel: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
    initialized: AtomicBool,
}

impl EchoLogger {
    /// Builds the logger context object. Validation of the endpoint and
    /// intervals is the only fallible step in the whole public surface.
    pub fn new(
        application_id: impl Into<String>,
        config: Config,
        provider: Arc<dyn DeviceContextProvider>,
        permission: Arc<dyn NetworkPermission>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = LogClient::new(&config.endpoint, config.request_timeout, &config.user_agent)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            application_id: application_id.into(),
            session_id: Uuid::new_v4().to_string(),
            config,
            queue: Arc::new(EntryQueue::new()),
            switch: Arc::new(KillSwitch::new()),
            provider,
            permission,
            client,
            cancel: CancellationToken::new(),
            worker: Mutex::new(None),
            initialized: AtomicBool::new(false),
        })
    }

    /// Starts the delivery worker. A second call while already initialized
    /// is a no-op. Must run inside a tokio runtime; without one the call
    /// still returns normally and only reports the fault.
    pub fn initialize(&self) {
        if self.initialized.swap(true, Ordering::AcqRel) {
            debug!("already initialized");
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            self.initialized.store(false, Ordering::Release);
            error!("initialize called outside a tokio runtime; delivery worker not started");
            return;
        };

        let worker = DeliveryWorker::new(WorkerParts {
            application_id: self.application_id.clone(),
            session_id: self.session_id.clone(),
            queue: Arc::clone(&self.queue),
            switch: Arc::clone(&self.switch),
            provider: Arc::clone(&self.provider),
            permission: Arc::clone(&self.permission),
            client: self.client.clone(),
            send_interval: self.config.send_interval,
            disabled_poll_interval: self.config.disabled_poll_interval,
            cancel: self.cancel.clone(),
        });
        *self.worker.lock() = Some(handle.spawn(worker.run()));
        debug!(
            application_id = %self.application_id,
            session_id = %self.session_id,
            "logger initialized"
        );
    }

    /// Logs a plain message without a severity.
    pub fn log(&self, text: impl Into<String>) {
        self.record(None, text.into(), None);
    }

    pub fn log_with_level(&self, level: LogLevel, text: impl Into<String>) {
        self.record(Some(level), text.into(), None);
    }

    pub fn log_with_fields(
        &self,
        level: LogLevel,
        text: impl Into<String>,
        fields: HashMap<String, String>,
    ) {
        self.record(Some(level), text.into(), Some(fields));
    }

    pub fn info(&self, text: impl Into<String>) {
        self.log_with_level(LogLevel::Info, text);
    }

    pub fn event(&self, text: impl Into<String>) {
        self.log_with_level(LogLevel::Event, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.log_with_level(LogLevel::Warn, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.log_with_level(LogLevel::Error, text);
    }

    pub fn debug(&self, text: impl Into<String>) {
        self.log_with_level(LogLevel::Debug, text);
    }

    /// Signals the worker to terminate. Does not block waiting for an
    /// in-flight delivery; entries still queued are discarded.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.switch.is_enabled()
    }

    pub fn pending_entries(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_metrics(&self) -> QueueMetrics {
        self.queue.metrics()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn record(
        &self,
        level: Option<LogLevel>,
        text: String,
        fields: Option<HashMap<String, String>>,
    ) {
        if !self.initialized.load(Ordering::Acquire) {
            error!("attempt to log before initialize; entry dropped");
            return;
        }
        // Server-side kill-switch: drop silently while disabled.
        if !self.switch.is_enabled() {
            return;
        }

        let timestamp = chrono::Utc::now().timestamp_millis();
        self.queue
            .push(LogEntry::new(timestamp, text, level, fields));
    }
}

impl Drop for EchoLogger {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for EchoLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EchoLogger")
            .field("application_id", &self.application_id)
            .field("session_id", &self.session_id)
            .field("endpoint", &self.client.endpoint())
            .field("initialized", &self.initialized.load(Ordering::Relaxed))
            .field("enabled", &self.switch.is_enabled())
            .field("pending", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::context::{MockDeviceContextProvider, MockNetworkPermission};

    fn logger() -> EchoLogger {
        let mut provider = MockDeviceContextProvider::new();
        provider.expect_resolve().return_const(None::<crate::device::DeviceContext>);
        let mut permission = MockNetworkPermission::new();
        permission.expect_is_granted().return_const(false);
        EchoLogger::new(
            "app-1",
            Config::default(),
            Arc::new(provider),
            Arc::new(permission),
        )
        .unwrap()
    }

    #[test]
    fn construction_fails_on_invalid_config() {
        let mut provider = MockDeviceContextProvider::new();
        provider.expect_resolve().never();
        let mut permission = MockNetworkPermission::new();
        permission.expect_is_granted().never();
        let config = Config {
            endpoint: "not a url".to_string(),
            ..Config::default()
        };
        assert!(
            EchoLogger::new("app-1", config, Arc::new(provider), Arc::new(permission)).is_err()
        );
    }

    #[test]
    fn logging_before_initialize_records_nothing() {
        let logger = logger();
        logger.info("too early");
        assert_eq!(logger.pending_entries(), 0);
    }

    #[test]
    fn initialize_outside_a_runtime_reports_and_returns() {
        let logger = logger();
        logger.initialize();
        // The worker could not start, so the logger stays uninitialized
        // and further calls keep being dropped quietly.
        logger.info("still too early");
        assert_eq!(logger.pending_entries(), 0);
    }

    #[tokio::test]
    async fn leveled_helpers_enqueue_in_order() {
        let logger = logger();
        logger.initialize();
        logger.info("one");
        logger.warn("two");
        logger.log("three");

        assert_eq!(logger.pending_entries(), 3);
        let batch = logger.queue.drain_snapshot();
        assert_eq!(batch[0].level, Some(LogLevel::Info));
        assert_eq!(batch[1].level, Some(LogLevel::Warn));
        assert_eq!(batch[2].level, None);
        assert_eq!(batch[2].text, "three");
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let logger = logger();
        logger.initialize();
        logger.initialize();
        logger.info("once");
        assert_eq!(logger.pending_entries(), 1);
        logger.stop();
    }

    #[tokio::test]
    async fn disabled_switch_drops_entries_silently() {
        let logger = logger();
        logger.initialize();
        logger.switch.set_enabled(false);
        logger.info("dropped");
        assert_eq!(logger.pending_entries(), 0);

        logger.switch.set_enabled(true);
        logger.info("kept");
        assert_eq!(logger.pending_entries(), 1);
    }

    #[tokio::test]
    async fn session_id_is_a_stable_uuid() {
        let logger = logger();
        assert!(Uuid::parse_str(logger.session_id()).is_ok());
        assert_eq!(logger.session_id(), logger.session_id());
    }
}
