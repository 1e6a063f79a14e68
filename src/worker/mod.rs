use crate::buffer::{EntryQueue, KillSwitch};
use crate::device::{DeviceContext, DeviceContextProvider, NetworkPermission};
use crate::sender::{BatchComposer, LogClient};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Response body that switches logging off; anything else switches it on.
const DISABLE_RESPONSE: &str = "off";

/// Why a delivery cycle was deferred without draining the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    IdentityUnresolved,
    PermissionDenied,
    EmptyQueue,
}

/// Result of one delivery cycle; drives the interval policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    SentOk,
    SentDisable,
    TransportError,
    NotReady(SkipReason),
}

/// Everything the delivery worker needs, wired up by the public surface.
pub struct WorkerParts {
    pub application_id: String,
    pub session_id: String,
    pub queue: Arc<EntryQueue>,
    pub switch: Arc<KillSwitch>,
    pub provider: Arc<dyn DeviceContextProvider>,
    pub permission: Arc<dyn NetworkPermission>,
    pub client: LogClient,
    pub send_interval: Duration,
    pub disabled_poll_interval: Duration,
    pub cancel: CancellationToken,
}

/// Single background loop that drains the queue, transmits the batch,
/// interprets the response and decides the next cycle's delay.
///
/// Cycles are strictly sequential: the next POST never starts before the
/// previous one completes. Cancellation is cooperative and observed at the
/// delay wait and around the in-flight cycle; there is no final flush.
pub struct DeliveryWorker {
    application_id: String,
    session_id: String,
    queue: Arc<EntryQueue>,
    switch: Arc<KillSwitch>,
    provider: Arc<dyn DeviceContextProvider>,
    permission: Arc<dyn NetworkPermission>,
    client: LogClient,
    composer: BatchComposer,
    send_interval: Duration,
    disabled_poll_interval: Duration,
    context: Mutex<Option<DeviceContext>>,
    cancel: CancellationToken,
}

impl DeliveryWorker {
    pub fn new(parts: WorkerParts) -> Self {
        Self {
            application_id: parts.application_id,
            session_id: parts.session_id,
            queue: parts.queue,
            switch: parts.switch,
            provider: parts.provider,
            permission: parts.permission,
            client: parts.client,
            composer: BatchComposer::new(),
            send_interval: parts.send_interval,
            disabled_poll_interval: parts.disabled_poll_interval,
            context: Mutex::new(None),
            cancel: parts.cancel,
        }
    }

    pub async fn run(self) {
        debug!(endpoint = self.client.endpoint(), "delivery worker started");
        loop {
            // While the kill-switch is off, skip straight to the long
            // delay without touching preconditions.
            if self.switch.is_enabled() {
                let outcome = tokio::select! {
                    () = self.cancel.cancelled() => break,
                    outcome = self.cycle() => outcome,
                };
                debug!(?outcome, "delivery cycle finished");
            }

            let delay = if self.switch.is_enabled() {
                self.send_interval
            } else {
                self.disabled_poll_interval
            };
            tokio::select! {
                () = self.cancel.cancelled() => break,
                () = sleep(delay) => {}
            }
        }
        debug!("delivery worker stopped");
    }

    async fn cycle(&self) -> DeliveryOutcome {
        // Preconditions are re-evaluated every cycle; a permission grant
        // or identity resolution may land between cycles.
        let Some(context) = self.resolved_context() else {
            return DeliveryOutcome::NotReady(SkipReason::IdentityUnresolved);
        };
        if !self.permission.is_granted() {
            return DeliveryOutcome::NotReady(SkipReason::PermissionDenied);
        }
        if self.queue.is_empty() {
            return DeliveryOutcome::NotReady(SkipReason::EmptyQueue);
        }

        let entries = self.queue.drain_snapshot();
        let payload =
            self.composer
                .compose(&self.application_id, &self.session_id, &context, &entries);

        match self.client.post_batch(payload).await {
            Ok(body) => {
                let enabled = logging_enabled_for(&body);
                self.switch.set_enabled(enabled);
                if enabled {
                    DeliveryOutcome::SentOk
                } else {
                    DeliveryOutcome::SentDisable
                }
            }
            Err(e) => {
                // At-most-once: the drained entries are lost, not requeued.
                warn!(
                    error = %e,
                    lost_entries = entries.len(),
                    "batch delivery failed"
                );
                DeliveryOutcome::TransportError
            }
        }
    }

    /// Returns the cached device context, resolving it on first need.
    /// The first context with a non-empty identifier sticks for good.
    fn resolved_context(&self) -> Option<DeviceContext> {
        let mut cached = self.context.lock();
        if cached.is_none() {
            *cached = self
                .provider
                .resolve()
                .filter(|context| !context.device_id.is_empty());
        }
        cached.clone()
    }
}

/// Interprets the server's plain-text remote-control response: a body
/// equal to `off` (trimmed, any letter case) disables logging, everything
/// else (including empty) enables it.
fn logging_enabled_for(body: &str) -> bool {
    !body.trim().eq_ignore_ascii_case(DISABLE_RESPONSE)
}
