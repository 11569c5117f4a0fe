//! Test doubles for the ports.

use std::sync::Mutex;

use rfxmqtt_domain::device::DeviceInfo;
use rfxmqtt_domain::error::{DecodeError, PublishError};
use rfxmqtt_domain::event::{Event, EventKind};
use rfxmqtt_domain::frame::Frame;
use rfxmqtt_domain::value::Values;

use crate::ports::{FrameDecoder, Publisher};

/// Decodes just enough packet types to drive the dispatcher:
/// `0x01` status, `0x14` Lighting5 and `0x52` temperature/humidity.
pub struct StubDecoder;

impl FrameDecoder for StubDecoder {
    fn decode(&self, frame: Frame) -> Result<Event, DecodeError> {
        let b = frame.as_bytes().to_vec();
        let device = |id_string: String, type_string: &str| DeviceInfo {
            packet_type: b[1],
            subtype: b[2],
            id_string,
            type_string: type_string.to_string(),
        };
        let (kind, device, values) = match b[1] {
            0x01 => (EventKind::Status, device(String::new(), "Status"), Values::new()),
            0x14 => (
                EventKind::Control,
                device(
                    format!("{:02x}{:02x}{:02x}:{}", b[4], b[5], b[6], b[7]),
                    "LightwaveRF, Siemens",
                ),
                Values::new()
                    .with("Command", if b[8] == 0 { "Off" } else { "On" })
                    .with("Rssi numeric", b[10] >> 4),
            ),
            0x52 => (
                EventKind::Measurement,
                device(format!("{:02x}:{:02x}", b[4], b[5]), "THGN122/123, THGN132"),
                Values::new()
                    .with(
                        "Temperature",
                        f64::from((u16::from(b[6] & 0x7f) << 8) | u16::from(b[7])) / 10.0,
                    )
                    .with("Humidity", b[8])
                    .with("Humidity status", "wet")
                    .with("Humidity status numeric", b[9])
                    .with("Battery numeric", b[10] & 0x0f)
                    .with("Rssi numeric", b[10] >> 4),
            ),
            other => return Err(DecodeError::UnsupportedPacketType(other)),
        };
        Ok(Event::new(kind, device, values, frame))
    }
}

/// Publisher that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingPublisher {
    pub messages: Mutex<Vec<(String, String, bool)>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<(String, String, bool)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn topics(&self) -> Vec<String> {
        self.messages().into_iter().map(|(t, _, _)| t).collect()
    }
}

impl Publisher for RecordingPublisher {
    async fn publish(
        &self,
        topic: &str,
        payload: String,
        retain: bool,
    ) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::new(topic, "broker unreachable"));
        }
        self.messages
            .lock()
            .unwrap()
            .push((topic.to_string(), payload, retain));
        Ok(())
    }
}
