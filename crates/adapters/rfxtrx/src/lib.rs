//! # rfxmqtt-adapter-rfxtrx
//!
//! RFXtrx adapter — talks to an RFXCOM RFXtrx433 receiver over its USB
//! serial port and decodes the frames it emits.
//!
//! ## How it works
//!
//! The receiver emits length-prefixed binary frames. [`transport`] resets
//! the receiver, reads frames on a blocking thread and forwards them over
//! a channel. [`RfxtrxDecoder`] implements the `FrameDecoder` port by
//! dispatching on the packet type byte.
//!
//! ## Currently supported packets
//!
//! | Type | Name | Event |
//! |------|------|-------|
//! | `0x01` | Interface status | status |
//! | `0x11` | Lighting2 (AC, HomeEasy EU) | control |
//! | `0x14` | Lighting5 (LightwaveRF, EMW100) | control |
//! | `0x20` | Security1 (X10, KD101, Visonic) | measurement |
//! | `0x50` | Temperature | measurement |
//! | `0x51` | Humidity | measurement |
//! | `0x52` | Temperature + humidity | measurement |
//! | `0x54` | Temperature + humidity + barometer | measurement |
//! | `0x57` | UV | measurement |
//! | `0x5A` | Energy usage | measurement |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `rfxmqtt-app` and `rfxmqtt-domain`.

mod config;
mod error;
pub mod parser;
pub mod transport;

pub use config::SerialConfig;
pub use error::RfxtrxError;

use rfxmqtt_app::ports::FrameDecoder;
use rfxmqtt_domain::error::DecodeError;
use rfxmqtt_domain::event::Event;
use rfxmqtt_domain::frame::Frame;

/// [`FrameDecoder`] for RFXtrx frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfxtrxDecoder;

impl FrameDecoder for RfxtrxDecoder {
    fn decode(&self, frame: Frame) -> Result<Event, DecodeError> {
        parser::parse(frame)
    }
}
