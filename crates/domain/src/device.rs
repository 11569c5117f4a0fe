//! Device — the physical transmitter behind a stream of frames.

use std::fmt;

use serde::Serialize;

/// Stable identity of a physical device, derived from a decoded packet.
///
/// Two packets with the same packet type, subtype and id string come from
/// the same device. Rendered as `{type:x}-{subtype:x}-{id}`, e.g.
/// `52-1-f8:01`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceIdentity {
    packet_type: u8,
    subtype: u8,
    id_string: String,
}

impl DeviceIdentity {
    /// Build an identity from its three components.
    #[must_use]
    pub fn new(packet_type: u8, subtype: u8, id_string: impl Into<String>) -> Self {
        Self {
            packet_type,
            subtype,
            id_string: id_string.into(),
        }
    }

    /// Packet type byte.
    #[must_use]
    pub fn packet_type(&self) -> u8 {
        self.packet_type
    }

    /// Packet subtype byte.
    #[must_use]
    pub fn subtype(&self) -> u8 {
        self.subtype
    }

    /// Device id as embedded in the frame.
    #[must_use]
    pub fn id_string(&self) -> &str {
        &self.id_string
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:x}-{:x}-{}",
            self.packet_type, self.subtype, self.id_string
        )
    }
}

impl Serialize for DeviceIdentity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What the decoder knows about the device that sent a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Packet type byte.
    pub packet_type: u8,
    /// Packet subtype byte.
    pub subtype: u8,
    /// Device id string; empty when the packet is not addressable.
    pub id_string: String,
    /// Human-readable device family (e.g. `"THGN122/123, THGN132"`).
    pub type_string: String,
}

impl DeviceInfo {
    /// Identity used as the registry key.
    #[must_use]
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.packet_type, self.subtype, self.id_string.clone())
    }

    /// Whether the packet carried a usable device id.
    #[must_use]
    pub fn is_addressable(&self) -> bool {
        !self.id_string.is_empty()
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type='{}' id='{}' ({:02x}:{:02x})",
            self.type_string, self.id_string, self.packet_type, self.subtype
        )
    }
}
