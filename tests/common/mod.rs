#![allow(dead_code)] // Each test binary uses a subset of these helpers.

use echolog::{Config, DeviceContext, DeviceContextProvider, NetworkPermission};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Routes the crate's tracing diagnostics to the test output when
/// `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_device_context() -> DeviceContext {
    DeviceContext {
        device_id: "device-test-1".to_string(),
        device_name: Some("Test Handset".to_string()),
        os: "Android".to_string(),
        os_version: "14".to_string(),
        device_type: "Acme Model T".to_string(),
        app_version: "1.2.3".to_string(),
        build_version: 123,
    }
}

/// Config with intervals short enough for real-time tests.
pub fn fast_config(endpoint: impl Into<String>) -> Config {
    Config {
        endpoint: endpoint.into(),
        send_interval: Duration::from_millis(20),
        disabled_poll_interval: Duration::from_secs(60),
        request_timeout: Duration::from_secs(2),
        user_agent: "echolog-test/0.0".to_string(),
    }
}

/// Device context provider whose readiness tests can flip at runtime.
#[derive(Default)]
pub struct FakeProvider {
    context: Mutex<Option<DeviceContext>>,
}

impl FakeProvider {
    pub fn ready() -> Arc<Self> {
        Arc::new(Self {
            context: Mutex::new(Some(test_device_context())),
        })
    }

    pub fn unready() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn make_ready(&self) {
        *self.context.lock() = Some(test_device_context());
    }
}

impl DeviceContextProvider for FakeProvider {
    fn resolve(&self) -> Option<DeviceContext> {
        self.context.lock().clone()
    }
}

/// Network permission capability tests can grant at runtime.
pub struct FakePermission {
    granted: AtomicBool,
}

impl FakePermission {
    pub fn granted() -> Arc<Self> {
        Arc::new(Self {
            granted: AtomicBool::new(true),
        })
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            granted: AtomicBool::new(false),
        })
    }

    pub fn grant(&self) {
        self.granted.store(true, Ordering::Release);
    }
}

impl NetworkPermission for FakePermission {
    fn is_granted(&self) -> bool {
        self.granted.load(Ordering::Acquire)
    }
}
