use uuid::Uuid;

/// Hardware identifier shared by a whole class of broken devices; treating
/// it as stable would collapse them all into one "device".
pub const INVALID_HARDWARE_ID: &str = "9774d56d682e549c";

/// Derives the stable device identifier from the available platform IDs.
///
/// Priority chain, in order:
/// 1. the platform-assigned hardware ID, unless it equals the known-invalid
///    sentinel;
/// 2. the telephony-derived ID;
/// 3. a random identifier.
///
/// Stable inputs map to name-based UUIDs so the same device always yields
/// the same identifier; only the final fallback is random.
pub fn derive_device_id(hardware_id: Option<&str>, telephony_id: Option<&str>) -> String {
    if let Some(id) = hardware_id
        && !id.is_empty()
        && id != INVALID_HARDWARE_ID
    {
        return name_based_id(id);
    }

    if let Some(id) = telephony_id
        && !id.is_empty()
    {
        return name_based_id(id);
    }

    Uuid::new_v4().to_string()
}

fn name_based_id(source: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, source.as_bytes()).to_string()
}
