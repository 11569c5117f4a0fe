//! Frame — raw bytes received from the radio receiver.

use std::fmt;

use crate::error::DecodeError;

/// A raw, undecoded frame.
///
/// The first byte is the number of bytes that follow it. Construction only
/// checks that framing; packet-level decoding is the decoder's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Wrap raw bytes, checking the length prefix.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Empty`] for an empty buffer or a zero length
    /// byte, and [`DecodeError::LengthMismatch`] when the length byte does
    /// not match the buffer.
    pub fn new(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let Some(&declared) = bytes.first() else {
            return Err(DecodeError::Empty);
        };
        if declared == 0 {
            return Err(DecodeError::Empty);
        }
        let actual = bytes.len() - 1;
        if usize::from(declared) != actual {
            return Err(DecodeError::LengthMismatch {
                declared: usize::from(declared),
                actual,
            });
        }
        Ok(Self(bytes))
    }

    /// Parse a frame from its hex representation (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidHex`] for malformed text, otherwise the
    /// same errors as [`Frame::new`].
    pub fn from_hex(text: &str) -> Result<Self, DecodeError> {
        let bytes = hex::decode(text.trim()).map_err(DecodeError::InvalidHex)?;
        Self::new(bytes)
    }

    /// Raw bytes, length byte included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Packet type byte.
    #[must_use]
    pub fn packet_type(&self) -> u8 {
        self.0.get(1).copied().unwrap_or_default()
    }

    /// Packet subtype byte.
    #[must_use]
    pub fn subtype(&self) -> u8 {
        self.0.get(2).copied().unwrap_or_default()
    }

    /// Frame length in bytes, length byte included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed frame; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering, as used in configuration files.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
