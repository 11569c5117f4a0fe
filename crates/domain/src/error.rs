//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BridgeError`] via `#[from]`.

use crate::device::DeviceIdentity;

/// Top-level error for the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A raw frame could not be turned into an event.
    #[error("failed to decode frame")]
    Decode(#[from] DecodeError),

    /// A device was configured twice.
    #[error("device registration conflict")]
    Conflict(#[from] ConflictError),

    /// A message could not be delivered to the bus.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Why a raw frame could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame text is not valid hexadecimal.
    #[error("frame is not valid hex")]
    InvalidHex(#[source] hex::FromHexError),

    /// The frame has no bytes, or its length byte is zero.
    #[error("frame is empty")]
    Empty,

    /// The length byte disagrees with the number of bytes received.
    #[error("frame declares {declared} bytes after the length byte, got {actual}")]
    LengthMismatch {
        /// Value of the leading length byte.
        declared: usize,
        /// Bytes actually following the length byte.
        actual: usize,
    },

    /// The packet type byte is not one the decoder understands.
    #[error("unsupported packet type 0x{0:02x}")]
    UnsupportedPacketType(u8),

    /// A known packet type arrived with too few bytes.
    #[error("packet type 0x{packet_type:02x} needs {expected} bytes, got {actual}")]
    Truncated {
        /// Packet type byte.
        packet_type: u8,
        /// Minimum frame length for this packet type.
        expected: usize,
        /// Actual frame length.
        actual: usize,
    },
}

/// A second configuration entry resolved to an already registered device.
#[derive(Debug, thiserror::Error)]
#[error("device {identity} is already registered (duplicate frame {frame})")]
pub struct ConflictError {
    /// Identity both entries resolve to.
    pub identity: DeviceIdentity,
    /// Hex frame of the rejected entry.
    pub frame: String,
}

/// A publish to the message bus failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to publish to {topic}")]
pub struct PublishError {
    /// Topic the message was addressed to, before prefixing.
    pub topic: String,
    /// Underlying transport failure.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl PublishError {
    /// Wrap a transport failure for `topic`.
    pub fn new(
        topic: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            topic: topic.into(),
            source: source.into(),
        }
    }
}
