//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `rfxmqtt.toml` in the working directory, or at the path in
//! `RFXMQTT_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use rfxmqtt_adapter_mqtt::MqttConfig;
use rfxmqtt_adapter_rfxtrx::SerialConfig;
use rfxmqtt_app::registry::EntityConfig;
use rfxmqtt_app::settings::BridgeSettings;

const DEFAULT_PATH: &str = "rfxmqtt.toml";
const DEFAULT_FILTER: &str = "rfxmqttd=info,rfxmqtt=info";
const DEBUG_FILTER: &str = "rfxmqttd=debug,rfxmqtt=debug";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report unregistered devices on the unknown-device sensor.
    pub publish_unknown: bool,
    /// Switch the default log filter to debug.
    pub debug: bool,
    /// Broker settings.
    pub mqtt: MqttConfig,
    /// Receiver settings.
    pub serial: SerialConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Registered devices, keyed by a sample frame in hex.
    pub devices: Devices,
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax). Empty picks a default based on
    /// the `debug` flag.
    pub filter: String,
}

/// Device table in declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Devices(pub Vec<(String, EntityConfig)>);

impl<'de> Deserialize<'de> for Devices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DevicesVisitor;

        impl<'de> Visitor<'de> for DevicesVisitor {
            type Value = Devices;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of frame hex strings to device names or tables")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Devices, A::Error> {
                let mut devices = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((frame, config)) = map.next_entry::<String, EntityConfig>()? {
                    devices.push((frame, config));
                }
                Ok(Devices(devices))
            }
        }

        deserializer.deserialize_map(DevicesVisitor)
    }
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("RFXMQTT_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides from `var`, which looks up an environment variable.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("RFXMQTT_MQTT_HOST") {
            self.mqtt.host = val;
        }
        if let Some(val) = var("RFXMQTT_MQTT_USERNAME") {
            self.mqtt.username = val;
        }
        if let Some(val) = var("RFXMQTT_MQTT_PASSWORD") {
            self.mqtt.password = val;
        }
        if let Some(val) = var("RFXMQTT_SERIAL_DEVICE") {
            self.serial.device = val;
        }
        if let Some(val) = var("RFXMQTT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.prefix.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "mqtt prefix must not be empty".to_string(),
            ));
        }
        if self.mqtt.port == 0 {
            return Err(ConfigError::Validation(
                "mqtt port must be non-zero".to_string(),
            ));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::Validation(
                "serial baud rate must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Log filter directive, honouring the `debug` flag when none is set.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        if !self.logging.filter.is_empty() {
            &self.logging.filter
        } else if self.debug {
            DEBUG_FILTER
        } else {
            DEFAULT_FILTER
        }
    }

    /// Settings handed to the dispatcher.
    #[must_use]
    pub fn bridge_settings(&self) -> BridgeSettings {
        BridgeSettings {
            prefix: self.mqtt.prefix.clone(),
            publish_unknown: self.publish_unknown,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
