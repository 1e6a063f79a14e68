pub mod context;
pub mod identity;
pub mod platform;

pub use context::{DeviceContext, DeviceContextProvider, NetworkPermission};
pub use identity::{INVALID_HARDWARE_ID, derive_device_id};
pub use platform::{DeviceInfoSource, PlatformContextProvider};
