//! Topic construction.
//!
//! Topics are relative; the publisher prepends the configured prefix once.

use crate::classify::Domain;

/// Object id of the fallback sensor that reports unregistered devices.
pub const UNKNOWN_DEVICE_ID: &str = "rfxmqtt_unknown_device";

/// Discovery topic for an entity: `{domain}/{entity_id}/config`.
#[must_use]
pub fn config_topic(domain: Domain, entity_id: &str) -> String {
    format!("{domain}/{entity_id}/config")
}

/// State topic for an entity: `{domain}/{entity_id}/state`.
#[must_use]
pub fn state_topic(domain: Domain, entity_id: &str) -> String {
    format!("{domain}/{entity_id}/state")
}

/// Discovery topic of the unknown-device sensor.
#[must_use]
pub fn unknown_device_config_topic() -> String {
    config_topic(Domain::Sensor, UNKNOWN_DEVICE_ID)
}

/// State topic of the unknown-device sensor.
#[must_use]
pub fn unknown_device_state_topic() -> String {
    state_topic(Domain::Sensor, UNKNOWN_DEVICE_ID)
}

/// Join a prefix and a relative topic.
///
/// Trailing slashes on the prefix are ignored; an empty prefix leaves the
/// topic unchanged.
#[must_use]
pub fn with_prefix(prefix: &str, topic: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        topic.to_string()
    } else {
        format!("{prefix}/{topic}")
    }
}
