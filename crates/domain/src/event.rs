//! Event — a decoded occurrence from a radio device.

use crate::device::{DeviceIdentity, DeviceInfo};
use crate::frame::Frame;
use crate::value::Values;

/// Category of a decoded event.
///
/// The set is closed: every frame the receiver can emit decodes to exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A sensor reading (temperature, humidity, security status, ...).
    Measurement,
    /// A remote-control action (on/off/dim commands).
    Control,
    /// Receiver housekeeping (status responses, heartbeats).
    Status,
}

impl EventKind {
    /// Lowercase name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Measurement => "measurement",
            Self::Control => "control",
            Self::Status => "status",
        }
    }
}

/// A decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event category.
    pub kind: EventKind,
    /// Sending device.
    pub device: DeviceInfo,
    /// Named values in decoder order.
    pub values: Values,
    /// Frame the event was decoded from.
    pub frame: Frame,
}

impl Event {
    /// Create an event.
    #[must_use]
    pub fn new(kind: EventKind, device: DeviceInfo, values: Values, frame: Frame) -> Self {
        Self {
            kind,
            device,
            values,
            frame,
        }
    }

    /// Registry key of the sending device.
    #[must_use]
    pub fn identity(&self) -> DeviceIdentity {
        self.device.identity()
    }
}
