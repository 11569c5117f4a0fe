//! RFXtrx packet parsers.
//!
//! Pure functions operating on a length-checked [`Frame`] — no serial
//! dependency needed. Every frame starts with
//! `[length, packet type, subtype, sequence number]`; the rest depends on
//! the packet type.

use rfxmqtt_domain::catalog::{BATTERY_NUMERIC, RSSI_NUMERIC, SENSOR_STATUS};
use rfxmqtt_domain::device::DeviceInfo;
use rfxmqtt_domain::error::DecodeError;
use rfxmqtt_domain::event::{Event, EventKind};
use rfxmqtt_domain::frame::Frame;
use rfxmqtt_domain::value::Values;

/// Interface status / mode response.
pub const STATUS: u8 = 0x01;
/// Lighting2: AC, HomeEasy EU, ANSLUT, Kambrook.
pub const LIGHTING2: u8 = 0x11;
/// Lighting5: LightwaveRF, EMW100, BBSB, ...
pub const LIGHTING5: u8 = 0x14;
/// Security1: X10 security, KD101, Visonic, ...
pub const SECURITY1: u8 = 0x20;
/// Temperature sensors.
pub const TEMP: u8 = 0x50;
/// Humidity sensors.
pub const HUMID: u8 = 0x51;
/// Temperature + humidity sensors.
pub const TEMP_HUMID: u8 = 0x52;
/// Temperature + humidity + barometer sensors.
pub const TEMP_HUMID_BARO: u8 = 0x54;
/// UV sensors.
pub const UV: u8 = 0x57;
/// Energy meters (ELEC2, CM119/160, CM180).
pub const ENERGY: u8 = 0x5A;

const STATUS_SUBTYPES: &[(u8, &str)] = &[
    (0x00, "Response on a mode command"),
    (0x07, "Start receiver"),
];

const LIGHTING2_SUBTYPES: &[(u8, &str)] = &[
    (0x00, "AC"),
    (0x01, "HomeEasy EU"),
    (0x02, "ANSLUT"),
    (0x03, "Kambrook"),
];

const LIGHTING5_SUBTYPES: &[(u8, &str)] = &[
    (0x00, "LightwaveRF, Siemens"),
    (0x01, "EMW100 GAO/Everflourish"),
    (0x02, "BBSB new types"),
    (0x03, "MDREMOTE LED dimmer"),
    (0x04, "Conrad RSL2"),
];

const SECURITY1_SUBTYPES: &[(u8, &str)] = &[
    (0x00, "X10 security door/window sensor"),
    (0x01, "X10 security motion sensor"),
    (0x02, "X10 security remote"),
    (0x03, "KD101 smoke detector"),
    (0x04, "Visonic PowerCode door/window sensor primary contact"),
    (0x05, "Visonic PowerCode motion sensor"),
    (0x06, "Visonic CodeSecure"),
    (0x07, "Visonic PowerCode door/window sensor auxiliary contact"),
    (0x08, "Meiantech"),
    (0x09, "Alecto SA30 smoke detector"),
    (0x0a, "RM174RF smoke detector"),
];

const TEMP_SUBTYPES: &[(u8, &str)] = &[
    (0x01, "THR128/138, THC138"),
    (0x02, "THC238/268, THN132, THWR288, THRN122, THN122, AW129/131"),
    (0x03, "THWR800"),
    (0x04, "RTHN318"),
    (0x05, "La Crosse TX2, TX3, TX4, TX17"),
    (0x06, "TS15C"),
    (0x07, "Viking 02811"),
    (0x08, "La Crosse WS2300"),
    (0x09, "RUBiCSON"),
    (0x0a, "TFA 30.3133"),
];

const HUMID_SUBTYPES: &[(u8, &str)] = &[(0x01, "LaCrosse TX3"), (0x02, "LaCrosse WS2300")];

const TEMP_HUMID_SUBTYPES: &[(u8, &str)] = &[
    (0x01, "THGN122/123, THGN132, THGR122/228/238/268"),
    (0x02, "THGR810, THGN800"),
    (0x03, "RTGR328"),
    (0x04, "THGR328"),
    (0x05, "WTGR800"),
    (0x06, "THGR918/928, THGRN228, THGN500"),
    (0x07, "TFA TS34C, Cresta"),
    (0x08, "WT260,WT260H,WT440H,WT450,WT450H"),
    (0x09, "Viking 02035, 02038"),
    (0x0a, "Rubicson"),
    (0x0b, "EW109"),
    (0x0c, "Imagintronix/Opus XT300 Soil sensor"),
    (0x0d, "Alecto WS1700 and compatibles"),
];

const TEMP_HUMID_BARO_SUBTYPES: &[(u8, &str)] =
    &[(0x01, "BTHR918"), (0x02, "BTHR918N, BTHR968")];

const UV_SUBTYPES: &[(u8, &str)] = &[
    (0x01, "UVN128, UV138"),
    (0x02, "UVN800"),
    (0x03, "TFA"),
];

const ENERGY_SUBTYPES: &[(u8, &str)] = &[(0x01, "CM119/160"), (0x02, "CM180")];

const RECEIVER_TYPES: &[(u8, &str)] = &[
    (0x50, "310MHz"),
    (0x51, "315MHz"),
    (0x52, "433.92MHz receiver only"),
    (0x53, "433.92MHz transceiver"),
    (0x55, "868.00MHz"),
    (0x56, "868.00MHz FSK"),
    (0x57, "868.30MHz"),
    (0x58, "868.30MHz FSK"),
    (0x59, "868.35MHz"),
    (0x5a, "868.35MHz FSK"),
    (0x5b, "868.95MHz"),
];

const LIGHTING2_COMMANDS: &[(u8, &str)] = &[
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Set level"),
    (0x03, "Group off"),
    (0x04, "Group on"),
    (0x05, "Set group level"),
];

const LIGHTING5_COMMANDS: &[(u8, &str)] = &[
    (0x00, "Off"),
    (0x01, "On"),
    (0x02, "Group off"),
    (0x03, "Mood1"),
    (0x04, "Mood2"),
    (0x05, "Mood3"),
    (0x06, "Mood4"),
    (0x07, "Mood5"),
    (0x0a, "Unlock"),
    (0x0b, "Lock"),
    (0x0c, "All lock"),
    (0x0d, "Close"),
    (0x0e, "Stop"),
    (0x0f, "Open"),
    (0x10, "Set level"),
];

const SECURITY1_STATUSES: &[(u8, &str)] = &[
    (0x00, "Normal"),
    (0x01, "Normal Delayed"),
    (0x02, "Alarm"),
    (0x03, "Alarm Delayed"),
    (0x04, "Motion"),
    (0x05, "No Motion"),
    (0x06, "Panic"),
    (0x07, "End Panic"),
    (0x08, "IR"),
    (0x09, "Arm Away"),
    (0x0a, "Arm Away Delayed"),
    (0x0b, "Arm Home"),
    (0x0c, "Arm Home Delayed"),
    (0x0d, "Disarm"),
    (0x10, "Light 1 Off"),
    (0x11, "Light 1 On"),
    (0x12, "Light 2 Off"),
    (0x13, "Light 2 On"),
    (0x14, "Dark Detected"),
    (0x15, "Light Detected"),
    (0x16, "Batlow"),
    (0x17, "Pair KD101"),
    (0x80, "Normal Tamper"),
    (0x81, "Normal Delayed Tamper"),
    (0x82, "Alarm Tamper"),
    (0x83, "Alarm Delayed Tamper"),
    (0x84, "Motion Tamper"),
    (0x85, "No Motion Tamper"),
];

const HUMIDITY_STATUSES: &[(u8, &str)] = &[
    (0x00, "dry"),
    (0x01, "comfort"),
    (0x02, "normal"),
    (0x03, "wet"),
];

const FORECASTS: &[(u8, &str)] = &[
    (0x00, "No forecast available"),
    (0x01, "Sunny"),
    (0x02, "Partly cloudy"),
    (0x03, "Cloudy"),
    (0x04, "Rain"),
];

/// UV subtype that also reports a temperature.
const UV_WITH_TEMPERATURE: u8 = 0x03;

/// Divisor turning the energy meter's cumulative counter into watt-hours.
const ENERGY_TOTAL_DIVISOR: f64 = 223.666;

fn name(table: &[(u8, &'static str)], code: u8) -> &'static str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("Unknown", |(_, n)| *n)
}

/// Minimum frame length (length byte included) for each packet type.
fn min_len(packet_type: u8) -> Option<usize> {
    match packet_type {
        STATUS => Some(7),
        LIGHTING2 => Some(12),
        LIGHTING5 | TEMP_HUMID => Some(11),
        SECURITY1 | TEMP | HUMID => Some(9),
        UV => Some(10),
        TEMP_HUMID_BARO => Some(14),
        ENERGY => Some(18),
        _ => None,
    }
}

/// Decode a frame into an [`Event`].
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedPacketType`] for packet types this
/// parser does not know and [`DecodeError::Truncated`] when the frame is
/// too short for its packet type.
pub fn parse(frame: Frame) -> Result<Event, DecodeError> {
    let packet_type = frame.packet_type();
    let expected = min_len(packet_type).ok_or(DecodeError::UnsupportedPacketType(packet_type))?;
    if frame.len() < expected {
        return Err(DecodeError::Truncated {
            packet_type,
            expected,
            actual: frame.len(),
        });
    }

    let (kind, device, values) = match packet_type {
        STATUS => parse_status(frame.as_bytes()),
        LIGHTING2 => parse_lighting2(frame.as_bytes()),
        LIGHTING5 => parse_lighting5(frame.as_bytes()),
        SECURITY1 => parse_security1(frame.as_bytes()),
        TEMP => parse_temp(frame.as_bytes()),
        HUMID => parse_humid(frame.as_bytes()),
        TEMP_HUMID => parse_temp_humid(frame.as_bytes()),
        TEMP_HUMID_BARO => parse_temp_humid_baro(frame.as_bytes()),
        UV => parse_uv(frame.as_bytes()),
        ENERGY => parse_energy(frame.as_bytes()),
        other => return Err(DecodeError::UnsupportedPacketType(other)),
    };

    Ok(Event::new(kind, device, values, frame))
}

type Parsed = (EventKind, DeviceInfo, Values);

fn device(data: &[u8], id_string: String, subtypes: &[(u8, &'static str)]) -> DeviceInfo {
    DeviceInfo {
        packet_type: data[1],
        subtype: data[2],
        id_string,
        type_string: name(subtypes, data[2]).to_string(),
    }
}

/// Temperature in tenths of a degree; bit 7 of the high byte is the sign.
fn temperature(high: u8, low: u8) -> f64 {
    let magnitude = f64::from((u16::from(high & 0x7f) << 8) | u16::from(low)) / 10.0;
    if high & 0x80 == 0 { magnitude } else { -magnitude }
}

/// Append battery (low nibble) and signal (high nibble) levels.
fn with_battery_and_rssi(values: Values, byte: u8) -> Values {
    values
        .with(BATTERY_NUMERIC, byte & 0x0f)
        .with(RSSI_NUMERIC, byte >> 4)
}

/// | Offset | Field |
/// |--------|-------|
/// | 4 | Command echoed |
/// | 5 | Receiver type |
/// | 6 | Firmware version |
///
/// Status packets carry no device id.
fn parse_status(data: &[u8]) -> Parsed {
    let values = Values::new()
        .with("Receiver type", name(RECEIVER_TYPES, data[5]))
        .with("Firmware version", data[6]);
    (
        EventKind::Status,
        device(data, String::new(), STATUS_SUBTYPES),
        values,
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–7 | Id (26 bits) |
/// | 8 | Unit code |
/// | 9 | Command |
/// | 10 | Dim level, 0–15 |
/// | 11 | RSSI (high nibble) |
fn parse_lighting2(data: &[u8]) -> Parsed {
    let id = (u32::from(data[4] & 0x03) << 24)
        | (u32::from(data[5]) << 16)
        | (u32::from(data[6]) << 8)
        | u32::from(data[7]);
    let unit = data[8];
    let level = u16::from(data[10].min(15)) * 100 / 15;
    let values = Values::new()
        .with("Command", name(LIGHTING2_COMMANDS, data[9]))
        .with("Dim level", i64::from(level))
        .with(RSSI_NUMERIC, data[11] >> 4);
    (
        EventKind::Control,
        device(data, format!("{id:07x}:{unit}"), LIGHTING2_SUBTYPES),
        values,
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–6 | Id |
/// | 7 | Unit code |
/// | 8 | Command |
/// | 9 | Level |
/// | 10 | RSSI (high nibble) |
fn parse_lighting5(data: &[u8]) -> Parsed {
    let id = (u32::from(data[4]) << 16) | (u32::from(data[5]) << 8) | u32::from(data[6]);
    let unit = data[7];
    let values = Values::new()
        .with("Command", name(LIGHTING5_COMMANDS, data[8]))
        .with(RSSI_NUMERIC, data[10] >> 4);
    (
        EventKind::Control,
        device(data, format!("{id:06x}:{unit}"), LIGHTING5_SUBTYPES),
        values,
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–6 | Id |
/// | 7 | Status |
/// | 8 | Battery (low nibble), RSSI (high nibble) |
fn parse_security1(data: &[u8]) -> Parsed {
    let id = (u32::from(data[4]) << 16) | (u32::from(data[5]) << 8) | u32::from(data[6]);
    let values = Values::new().with(SENSOR_STATUS, name(SECURITY1_STATUSES, data[7]));
    (
        EventKind::Measurement,
        device(data, format!("{id:06x}:32"), SECURITY1_SUBTYPES),
        with_battery_and_rssi(values, data[8]),
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–5 | Id |
/// | 6–7 | Temperature, signed tenths |
/// | 8 | Battery (low nibble), RSSI (high nibble) |
fn parse_temp(data: &[u8]) -> Parsed {
    let values = Values::new().with("Temperature", temperature(data[6], data[7]));
    (
        EventKind::Measurement,
        device(data, sensor_id(data), TEMP_SUBTYPES),
        with_battery_and_rssi(values, data[8]),
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–5 | Id |
/// | 6 | Humidity, % |
/// | 7 | Humidity status |
/// | 8 | Battery (low nibble), RSSI (high nibble) |
fn parse_humid(data: &[u8]) -> Parsed {
    let values = Values::new()
        .with("Humidity", data[6])
        .with("Humidity status", name(HUMIDITY_STATUSES, data[7]))
        .with("Humidity status numeric", data[7]);
    (
        EventKind::Measurement,
        device(data, sensor_id(data), HUMID_SUBTYPES),
        with_battery_and_rssi(values, data[8]),
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–5 | Id |
/// | 6–7 | Temperature, signed tenths |
/// | 8 | Humidity, % |
/// | 9 | Humidity status |
/// | 10 | Battery (low nibble), RSSI (high nibble) |
fn parse_temp_humid(data: &[u8]) -> Parsed {
    let values = Values::new()
        .with("Temperature", temperature(data[6], data[7]))
        .with("Humidity", data[8])
        .with("Humidity status", name(HUMIDITY_STATUSES, data[9]))
        .with("Humidity status numeric", data[9]);
    (
        EventKind::Measurement,
        device(data, sensor_id(data), TEMP_HUMID_SUBTYPES),
        with_battery_and_rssi(values, data[10]),
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–5 | Id |
/// | 6–7 | Temperature, signed tenths |
/// | 8 | Humidity, % |
/// | 9 | Humidity status |
/// | 10–11 | Barometer, hPa |
/// | 12 | Forecast |
/// | 13 | Battery (low nibble), RSSI (high nibble) |
fn parse_temp_humid_baro(data: &[u8]) -> Parsed {
    let barometer = (u16::from(data[10]) << 8) | u16::from(data[11]);
    let values = Values::new()
        .with("Temperature", temperature(data[6], data[7]))
        .with("Humidity", data[8])
        .with("Humidity status", name(HUMIDITY_STATUSES, data[9]))
        .with("Humidity status numeric", data[9])
        .with("Barometer", i64::from(barometer))
        .with("Forecast", name(FORECASTS, data[12]))
        .with("Forecast numeric", data[12]);
    (
        EventKind::Measurement,
        device(data, sensor_id(data), TEMP_HUMID_BARO_SUBTYPES),
        with_battery_and_rssi(values, data[13]),
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–5 | Id |
/// | 6 | UV index, tenths |
/// | 7–8 | Temperature, signed tenths (TFA only) |
/// | 9 | Battery (low nibble), RSSI (high nibble) |
fn parse_uv(data: &[u8]) -> Parsed {
    let mut values = Values::new().with("UV", f64::from(data[6]) / 10.0);
    if data[2] == UV_WITH_TEMPERATURE {
        values.insert("Temperature", temperature(data[7], data[8]));
    }
    (
        EventKind::Measurement,
        device(data, sensor_id(data), UV_SUBTYPES),
        with_battery_and_rssi(values, data[9]),
    )
}

/// | Offset | Field |
/// |--------|-------|
/// | 4–5 | Id |
/// | 6 | Packet count |
/// | 7–10 | Instant usage, W |
/// | 11–16 | Cumulative counter |
/// | 17 | Battery (low nibble), RSSI (high nibble) |
fn parse_energy(data: &[u8]) -> Parsed {
    let usage = data[7..11]
        .iter()
        .fold(0_u32, |acc, byte| (acc << 8) | u32::from(*byte));
    let counter = data[11..17]
        .iter()
        .fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte));
    // A 48-bit counter fits in an f64 mantissa.
    #[allow(clippy::cast_precision_loss)]
    let total = counter as f64 / ENERGY_TOTAL_DIVISOR;
    let values = Values::new()
        .with("Count", data[6])
        .with("Energy usage", i64::from(usage))
        .with("Total usage", total);
    (
        EventKind::Measurement,
        device(data, sensor_id(data), ENERGY_SUBTYPES),
        with_battery_and_rssi(values, data[17]),
    )
}

fn sensor_id(data: &[u8]) -> String {
    format!("{:02x}:{:02x}", data[4], data[5])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfxmqtt_domain::value::Value;

    fn parse_hex(text: &str) -> Result<Event, DecodeError> {
        parse(Frame::from_hex(text)?)
    }

    // ── Identity ────────────────────────────────────────────────────────

    #[test]
    fn should_derive_identity_from_temp_humid_frame() {
        let event = parse_hex("0a52011bf801007c4f0369").unwrap();
        assert_eq!(event.identity().to_string(), "52-1-f8:01");
    }

    // ── Temperature + humidity ──────────────────────────────────────────

    #[test]
    fn should_parse_temp_humid_values_in_order() {
        let event = parse_hex("0a52014ff801007d4f0369").unwrap();
        assert_eq!(event.kind, EventKind::Measurement);
        assert_eq!(
            event.device.type_string,
            "THGN122/123, THGN132, THGR122/228/238/268"
        );

        let values: Vec<_> = event.values.iter().map(|(n, v)| (n, v.clone())).collect();
        assert_eq!(
            values,
            [
                ("Temperature", Value::Float(12.5)),
                ("Humidity", Value::Int(79)),
                ("Humidity status", Value::from("wet")),
                ("Humidity status numeric", Value::Int(3)),
                ("Battery numeric", Value::Int(9)),
                ("Rssi numeric", Value::Int(6)),
            ]
        );
    }

    #[test]
    fn should_parse_negative_temperature() {
        // 0x80 0x20 → sign bit set, 32 tenths → -3.2 C
        let event = parse_hex("0a5201000102802032027a").unwrap();
        assert_eq!(event.values.get("Temperature"), Some(&Value::Float(-3.2)));
        assert_eq!(event.values.get("Humidity status"), Some(&Value::from("normal")));
    }

    // ── Temperature / humidity only ─────────────────────────────────────

    #[test]
    fn should_parse_temperature_sensor() {
        let event = parse_hex("085002011a2b00d279").unwrap();
        assert_eq!(event.identity().to_string(), "50-2-1a:2b");
        assert_eq!(event.values.get("Temperature"), Some(&Value::Float(21.0)));
        assert_eq!(event.values.get("Battery numeric"), Some(&Value::Int(9)));
        assert_eq!(event.values.get("Rssi numeric"), Some(&Value::Int(7)));
    }

    #[test]
    fn should_parse_humidity_sensor() {
        let event = parse_hex("085101020304410189").unwrap();
        assert_eq!(event.identity().to_string(), "51-1-03:04");
        assert_eq!(event.values.get("Humidity"), Some(&Value::Int(65)));
        assert_eq!(event.values.get("Humidity status"), Some(&Value::from("comfort")));
    }

    // ── Barometer, UV, energy ───────────────────────────────────────────

    #[test]
    fn should_parse_temp_humid_baro_sensor() {
        let event = parse_hex("0d540100e90000d22d0103f50169").unwrap();
        assert_eq!(event.kind, EventKind::Measurement);
        assert_eq!(event.identity().to_string(), "54-1-e9:00");
        assert_eq!(event.device.type_string, "BTHR918");
        assert_eq!(event.values.get("Temperature"), Some(&Value::Float(21.0)));
        assert_eq!(event.values.get("Humidity"), Some(&Value::Int(45)));
        assert_eq!(event.values.get("Barometer"), Some(&Value::Int(1013)));
        assert_eq!(event.values.get("Forecast"), Some(&Value::from("Sunny")));
        assert_eq!(event.values.get("Battery numeric"), Some(&Value::Int(9)));
        assert_eq!(event.values.get("Rssi numeric"), Some(&Value::Int(6)));
    }

    #[test]
    fn should_parse_uv_sensor() {
        let event = parse_hex("0957010023fe0a000079").unwrap();
        assert_eq!(event.identity().to_string(), "57-1-23:fe");
        assert_eq!(event.values.get("UV"), Some(&Value::Float(1.0)));
        assert_eq!(event.values.get("Temperature"), None);
        assert_eq!(event.values.get("Rssi numeric"), Some(&Value::Int(7)));
    }

    #[test]
    fn should_parse_uv_sensor_with_temperature() {
        let event = parse_hex("0957030024010c00c869").unwrap();
        assert_eq!(event.device.type_string, "TFA");
        assert_eq!(event.values.get("UV"), Some(&Value::Float(1.2)));
        assert_eq!(event.values.get("Temperature"), Some(&Value::Float(20.0)));
    }

    #[test]
    fn should_parse_energy_meter() {
        let event = parse_hex("115a01071a73000000017c0000000369b279").unwrap();
        assert_eq!(event.identity().to_string(), "5a-1-1a:73");
        assert_eq!(event.values.get("Count"), Some(&Value::Int(0)));
        assert_eq!(event.values.get("Energy usage"), Some(&Value::Int(380)));
        let Some(Value::Float(total)) = event.values.get("Total usage") else {
            panic!("total usage should be a float");
        };
        assert!((total - 1000.0).abs() < 1e-6);
        assert_eq!(event.values.get("Battery numeric"), Some(&Value::Int(9)));
    }

    #[test]
    fn should_reject_truncated_energy_packet() {
        let err = parse_hex("0a5a01071a730000000179").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                packet_type: 0x5a,
                expected: 18,
                actual: 11
            }
        ));
    }

    // ── Control ─────────────────────────────────────────────────────────

    #[test]
    fn should_parse_lighting5_as_control() {
        let event = parse_hex("0a140001f573d710030070").unwrap();
        assert_eq!(event.kind, EventKind::Control);
        assert_eq!(event.identity().to_string(), "14-0-f573d7:16");
        assert_eq!(event.values.get("Command"), Some(&Value::from("Mood1")));
        assert_eq!(event.values.get("Rssi numeric"), Some(&Value::Int(7)));
    }

    #[test]
    fn should_parse_lighting2_with_26_bit_id() {
        let event = parse_hex("0b11000bff0a1b2c01010f60").unwrap();
        assert_eq!(event.kind, EventKind::Control);
        assert_eq!(event.identity().to_string(), "11-0-30a1b2c:1");
        assert_eq!(event.values.get("Command"), Some(&Value::from("On")));
        assert_eq!(event.values.get("Dim level"), Some(&Value::Int(100)));
        assert_eq!(event.values.get("Rssi numeric"), Some(&Value::Int(6)));
    }

    // ── Security ────────────────────────────────────────────────────────

    #[test]
    fn should_parse_security1_status() {
        let event = parse_hex("082001051234560479").unwrap();
        assert_eq!(event.kind, EventKind::Measurement);
        assert_eq!(event.identity().to_string(), "20-1-123456:32");
        assert_eq!(event.values.get(SENSOR_STATUS), Some(&Value::from("Motion")));
    }

    #[test]
    fn should_name_unknown_security_status() {
        let event = parse_hex("082001051234564079").unwrap();
        assert_eq!(event.values.get(SENSOR_STATUS), Some(&Value::from("Unknown")));
    }

    // ── Status ──────────────────────────────────────────────────────────

    #[test]
    fn should_parse_status_without_device_id() {
        let event = parse_hex("0d010001025345100c2f01010000").unwrap();
        assert_eq!(event.kind, EventKind::Status);
        assert!(!event.device.is_addressable());
        assert_eq!(
            event.values.get("Receiver type"),
            Some(&Value::from("433.92MHz transceiver"))
        );
        assert_eq!(event.values.get("Firmware version"), Some(&Value::Int(0x45)));
    }

    // ── Errors ──────────────────────────────────────────────────────────

    #[test]
    fn should_reject_unknown_packet_type() {
        let err = parse_hex("03ff0000").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedPacketType(0xff)));
    }

    #[test]
    fn should_reject_truncated_packet() {
        let err = parse_hex("0552010001f8").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                packet_type: 0x52,
                expected: 11,
                actual: 6
            }
        ));
    }
}
