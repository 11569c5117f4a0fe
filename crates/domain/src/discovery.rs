//! Discovery and unknown-device payloads.

use serde::Serialize;

use crate::device::DeviceIdentity;
use crate::entity::Entity;
use crate::event::Event;
use crate::topic;
use crate::value::Values;

/// Prefix of every `unique_id` this bridge announces.
pub const UNIQUE_ID_PREFIX: &str = "rfxmqtt";

/// Display name of the unknown-device sensor.
pub const UNKNOWN_DEVICE_NAME: &str = "RFXMQTT Unknown Device";

const RESERVED_KEYS: &[&str] = &[
    "name",
    "unique_id",
    "state_topic",
    "device_class",
    "unit_of_measurement",
];

/// Retained discovery message describing one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDiscovery {
    /// Friendly name, `"{device} {value}"`.
    pub name: String,
    /// Stable id, `rfxmqtt-{identity}-{value}`.
    pub unique_id: String,
    /// Absolute state topic (prefix included).
    pub state_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<&'static str>,
    /// User-supplied extra keys, never overriding the ones above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EntityDiscovery {
    /// Describe `entity`, belonging to the device `identity` named `device_name`.
    #[must_use]
    pub fn new(
        identity: &DeviceIdentity,
        device_name: &str,
        entity: &Entity,
        prefix: &str,
    ) -> Self {
        let unit = entity.unit_of_measurement();
        Self {
            name: format!("{device_name} {}", entity.value_name),
            unique_id: format!(
                "{UNIQUE_ID_PREFIX}-{identity}-{}",
                entity.value_name.to_lowercase().replace(' ', "")
            ),
            state_topic: topic::with_prefix(prefix, &entity.state_topic()),
            device_class: entity.device_class(),
            unit_of_measurement: (!unit.is_empty()).then_some(unit),
            extra: serde_json::Map::new(),
        }
    }

    /// Merge extra keys, skipping any that would shadow a core field.
    #[must_use]
    pub fn with_extra(mut self, extra: &serde_json::Map<String, serde_json::Value>) -> Self {
        for (key, value) in extra {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                self.extra.insert(key.clone(), value.clone());
            }
        }
        self
    }
}

/// Retained discovery message for the unknown-device sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownDeviceDiscovery {
    pub name: &'static str,
    pub state_topic: String,
}

impl UnknownDeviceDiscovery {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            name: UNKNOWN_DEVICE_NAME,
            state_topic: topic::with_prefix(prefix, &topic::unknown_device_state_topic()),
        }
    }
}

/// State published when an unregistered device is heard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownDeviceReport<'a> {
    /// Frame as lowercase hex; paste it into the configuration to register the device.
    pub state: String,
    /// Device summary.
    pub device: String,
    /// Decoded values, untransformed.
    pub values: &'a Values,
}

impl<'a> UnknownDeviceReport<'a> {
    #[must_use]
    pub fn from_event(event: &'a Event) -> Self {
        Self {
            state: event.frame.to_hex(),
            device: event.device.to_string(),
            values: &event.values,
        }
    }
}
