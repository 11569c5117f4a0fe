//! Bridge behaviour settings handed to the dispatcher.

/// Settings that change what the dispatcher publishes.
#[derive(Debug, Clone)]
pub struct BridgeSettings {
    /// Topic prefix, used inside discovery payloads for absolute state topics.
    pub prefix: String,
    /// Announce and report devices that are not in the registry.
    pub publish_unknown: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            prefix: "homeassistant".to_string(),
            publish_unknown: false,
        }
    }
}
