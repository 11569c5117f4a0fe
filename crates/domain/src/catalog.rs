//! Static value catalog.
//!
//! Per value-name metadata: units of measurement, device classes, state
//! transforms and the closed vocabulary of on/off security statuses. All
//! tables are compile-time constants.

use crate::value::Value;

/// Value name carrying a security sensor's status string.
pub const SENSOR_STATUS: &str = "Sensor Status";

/// Value name carrying the raw 0–9 battery level.
pub const BATTERY_NUMERIC: &str = "Battery numeric";

/// Value name carrying the raw 0–15 signal level.
pub const RSSI_NUMERIC: &str = "Rssi numeric";

const UNITS_OF_MEASUREMENT: &[(&str, &str)] = &[
    ("Temperature", "°C"),
    ("Temperature2", "°C"),
    ("Humidity", "%"),
    ("Energy usage", "W"),
    ("Total usage", "W"),
    ("UV", "UV index"),
    (RSSI_NUMERIC, "dBm"),
];

const DEVICE_CLASSES: &[(&str, &str)] = &[
    ("Humidity", "humidity"),
    ("Temperature", "temperature"),
    (RSSI_NUMERIC, "signal_strength"),
    (BATTERY_NUMERIC, "battery"),
];

/// Security statuses reported while a sensor is triggered.
pub const SENSOR_STATUS_ON: &[&str] = &[
    "Panic",
    "Motion",
    "Motion Tamper",
    "Light Detected",
    "Alarm",
    "Alarm Tamper",
];

/// Security statuses reported once a sensor has returned to rest.
pub const SENSOR_STATUS_OFF: &[&str] = &[
    "End Panic",
    "No Motion",
    "No Motion Tamper",
    "Dark Detected",
    "Normal",
    "Normal Tamper",
];

type Transform = fn(Value) -> Value;

const STATE_TRANSFORMS: &[(&str, Transform)] = &[
    (BATTERY_NUMERIC, battery_percent),
    (RSSI_NUMERIC, rssi_dbm),
];

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Unit of measurement for `name`, or `""` when it has none.
#[must_use]
pub fn unit_of_measurement(name: &str) -> &'static str {
    lookup(UNITS_OF_MEASUREMENT, name).unwrap_or("")
}

/// Device class for `name`, if the platform knows one.
#[must_use]
pub fn device_class(name: &str) -> Option<&'static str> {
    lookup(DEVICE_CLASSES, name)
}

/// Whether `status` belongs to the on/off security vocabulary.
#[must_use]
pub fn is_binary_status(status: &str) -> bool {
    SENSOR_STATUS_ON.contains(&status) || SENSOR_STATUS_OFF.contains(&status)
}

/// Apply the registered transform for `name`, or pass `value` through.
#[must_use]
pub fn transform_state(name: &str, value: Value) -> Value {
    match lookup(STATE_TRANSFORMS, name) {
        Some(transform) => transform(value),
        None => value,
    }
}

/// Battery is reported on a 0–9 scale; publish it as a percentage.
#[must_use]
pub fn battery_percent(value: Value) -> Value {
    match value {
        Value::Int(raw) => Value::Int(raw * 10),
        other => other,
    }
}

/// Signal level is reported on a 0–15 scale; publish it as dBm text.
#[must_use]
pub fn rssi_dbm(value: Value) -> Value {
    match value {
        Value::Int(raw) => Value::Text((raw * 8 - 120).to_string()),
        other => other,
    }
}
