//! Device registry — configured devices keyed by identity.
//!
//! Built once during setup, read-only afterwards.

use std::collections::HashMap;

use serde::Deserialize;

use rfxmqtt_domain::device::DeviceIdentity;
use rfxmqtt_domain::error::{BridgeError, ConflictError};
use rfxmqtt_domain::event::Event;

use crate::ports::FrameDecoder;

/// User-declared metadata for one physical device.
///
/// Deserialises from either a bare name (`"Outside"`) or a table with at
/// least a `name` key. Any other keys in the table are forwarded into the
/// device's discovery payloads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEntityConfig")]
pub struct EntityConfig {
    /// Display name, also the base of every entity id.
    pub name: String,
    /// Extra discovery keys.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EntityConfig {
    /// Config with only a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityConfig {
    Name(String),
    Table {
        name: String,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
}

impl From<RawEntityConfig> for EntityConfig {
    fn from(raw: RawEntityConfig) -> Self {
        match raw {
            RawEntityConfig::Name(name) => Self::named(name),
            RawEntityConfig::Table { name, extra } => Self { name, extra },
        }
    }
}

/// Mapping from device identity to its configuration.
///
/// The first registration of an identity wins; later ones are rejected
/// with a [`ConflictError`].
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<DeviceIdentity, EntityConfig>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `frame_hex` and register `config` under the resulting identity.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Decode`] when the frame cannot be decoded and
    /// [`BridgeError::Conflict`] when the identity is already registered.
    pub fn register(
        &mut self,
        decoder: &impl FrameDecoder,
        frame_hex: &str,
        config: EntityConfig,
    ) -> Result<DeviceIdentity, BridgeError> {
        let event = decoder.decode_hex(frame_hex)?;
        Ok(self.register_event(&event, config)?)
    }

    /// Register `config` under the identity of an already decoded event.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] when the identity is already registered;
    /// the existing configuration is left untouched.
    pub fn register_event(
        &mut self,
        event: &Event,
        config: EntityConfig,
    ) -> Result<DeviceIdentity, ConflictError> {
        let identity = event.identity();
        if self.devices.contains_key(&identity) {
            return Err(ConflictError {
                identity,
                frame: event.frame.to_hex(),
            });
        }
        self.devices.insert(identity.clone(), config);
        Ok(identity)
    }

    /// Configuration for `identity`, or `None` for an unknown device.
    #[must_use]
    pub fn lookup(&self, identity: &DeviceIdentity) -> Option<&EntityConfig> {
        self.devices.get(identity)
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
