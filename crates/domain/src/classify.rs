//! Domain classification — which platform domains an event belongs to.

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog;
use crate::event::{Event, EventKind};
use crate::value::Value;

/// Platform domain used to render and group an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// Numeric or textual sensor.
    Sensor,
    /// Two-state sensor (presence, contact, alarm).
    BinarySensor,
}

impl Domain {
    /// Topic segment for this domain.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::BinarySensor => "binary_sensor",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an event into zero or more domains.
///
/// Rules are cumulative: measurements and control actions are sensors;
/// control actions are also binary sensors, and so are measurements whose
/// [`catalog::SENSOR_STATUS`] value is in the on/off vocabulary. Status
/// events classify into nothing.
#[must_use]
pub fn classify(event: &Event) -> BTreeSet<Domain> {
    let mut domains = BTreeSet::new();

    if matches!(event.kind, EventKind::Measurement | EventKind::Control) {
        domains.insert(Domain::Sensor);
    }

    match event.kind {
        EventKind::Control => {
            domains.insert(Domain::BinarySensor);
        }
        EventKind::Measurement => {
            let binary_status = event
                .values
                .get(catalog::SENSOR_STATUS)
                .and_then(Value::as_text)
                .is_some_and(catalog::is_binary_status);
            if binary_status {
                domains.insert(Domain::BinarySensor);
            }
        }
        EventKind::Status => {}
    }

    domains
}
