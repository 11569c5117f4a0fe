//! Decoder port — turns raw receiver frames into events.

use rfxmqtt_domain::error::DecodeError;
use rfxmqtt_domain::event::Event;
use rfxmqtt_domain::frame::Frame;

/// Decodes raw frames into structured events.
pub trait FrameDecoder {
    /// Decode a length-checked frame.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the bytes match no known packet shape.
    fn decode(&self, frame: Frame) -> Result<Event, DecodeError>;

    /// Decode raw bytes straight off the wire.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for framing or packet errors.
    fn decode_bytes(&self, bytes: Vec<u8>) -> Result<Event, DecodeError> {
        self.decode(Frame::new(bytes)?)
    }

    /// Decode a frame written as hex, as in the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for invalid hex, framing or packet errors.
    fn decode_hex(&self, text: &str) -> Result<Event, DecodeError> {
        self.decode(Frame::from_hex(text)?)
    }
}

impl<T: FrameDecoder> FrameDecoder for std::sync::Arc<T> {
    fn decode(&self, frame: Frame) -> Result<Event, DecodeError> {
        (**self).decode(frame)
    }
}
