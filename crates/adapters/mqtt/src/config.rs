//! MQTT publisher configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the MQTT connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub host: String,
    /// MQTT broker port.
    pub port: u16,
    /// Username; empty means anonymous.
    pub username: String,
    /// Password, used only with a username.
    pub password: String,
    /// Prefix prepended to every topic (the platform's discovery prefix).
    pub prefix: String,
    /// MQTT client identifier.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// How long a single publish may wait for the client, in seconds.
    pub publish_timeout_secs: u16,
}

impl MqttConfig {
    /// Publish timeout as a [`Duration`].
    #[must_use]
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.publish_timeout_secs))
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            username: String::new(),
            password: String::new(),
            prefix: "homeassistant".to_string(),
            client_id: "rfxmqtt".to_string(),
            keep_alive_secs: 30,
            publish_timeout_secs: 5,
        }
    }
}
