use super::context::{DeviceContext, DeviceContextProvider};
use super::identity::derive_device_id;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Raw platform lookups consumed by `PlatformContextProvider`.
///
/// Hosts implement only these primitive accessors; identifier derivation
/// and caching live in the core. Every accessor must be cheap and safe to
/// call repeatedly. Identifier lookups may legitimately return `None`
/// until the relevant platform permission is granted.
#[cfg_attr(test, automock)]
pub trait DeviceInfoSource: Send + Sync {
    /// Platform-assigned hardware identifier, if readable.
    fn hardware_id(&self) -> Option<String>;
    /// Telephony-derived identifier, if readable.
    fn telephony_id(&self) -> Option<String>;
    /// Human-readable device name, best-effort.
    fn device_name(&self) -> Option<String>;
    fn os_name(&self) -> String;
    fn os_version(&self) -> String;
    /// Manufacturer and model combined.
    fn device_model(&self) -> String;
    fn app_version(&self) -> String;
    /// Numeric build number; non-positive when unknown.
    fn build_number(&self) -> i64;
}

/// `DeviceContextProvider` backed by raw platform lookups.
///
/// Applies the identifier priority chain (`identity::derive_device_id`)
/// and assembles the full context. Always resolves: when neither stable
/// identifier is readable the device falls back to a random one rather
/// than blocking delivery.
pub struct PlatformContextProvider {
    source: Arc<dyn DeviceInfoSource>,
}

impl PlatformContextProvider {
    pub fn new(source: Arc<dyn DeviceInfoSource>) -> Self {
        Self { source }
    }
}

impl DeviceContextProvider for PlatformContextProvider {
    fn resolve(&self) -> Option<DeviceContext> {
        let hardware_id = self.source.hardware_id();
        let telephony_id = self.source.telephony_id();
        let device_id = derive_device_id(hardware_id.as_deref(), telephony_id.as_deref());

        Some(DeviceContext {
            device_id,
            device_name: self.source.device_name(),
            os: self.source.os_name(),
            os_version: self.source.os_version(),
            device_type: self.source.device_model(),
            app_version: self.source.app_version(),
            build_version: self.source.build_number(),
        })
    }
}

impl std::fmt::Debug for PlatformContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformContextProvider").finish_non_exhaustive()
    }
}
