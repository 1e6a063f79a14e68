#[cfg(test)]
use mockall::automock;

/// Device and application metadata attached to every batch.
///
/// Resolved once, lazily, on first need. Optional fields are simply
/// omitted from the payload; their absence never blocks delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    /// Stable derived identifier (see `identity::derive_device_id`).
    pub device_id: String,
    /// Human-readable device name, best-effort.
    pub device_name: Option<String>,
    pub os: String,
    pub os_version: String,
    /// Manufacturer and model combined, e.g. `"Acme Phone X"`.
    pub device_type: String,
    pub app_version: String,
    /// Numeric build number; non-positive means unknown and is omitted
    /// from the payload.
    pub build_version: i64,
}

/// Supplies the device context, if the platform can produce one yet.
///
/// Must be safe to call repeatedly. The core treats the first context with
/// a non-empty `device_id` as permanently resolved and never calls again.
#[cfg_attr(test, automock)]
pub trait DeviceContextProvider: Send + Sync {
    fn resolve(&self) -> Option<DeviceContext>;
}

/// Polled capability for the host's network-send permission.
///
/// Grants may land asynchronously, so the worker re-checks every cycle.
#[cfg_attr(test, automock)]
pub trait NetworkPermission: Send + Sync {
    fn is_granted(&self) -> bool;
}
