//! Serial transport configuration.

use serde::Deserialize;

/// Configuration for the RFXtrx serial connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial device path.
    pub device: String,
    /// Line speed; the RFXtrx433 runs at 38400 baud.
    pub baud_rate: u32,
    /// Read timeout in milliseconds. Reads that time out are retried.
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB0".to_string(),
            baud_rate: 38_400,
            read_timeout_ms: 1_000,
        }
    }
}
