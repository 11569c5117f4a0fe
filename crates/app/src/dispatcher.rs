//! Dispatcher — the setup pass and per-event processing.
//!
//! Every incoming event goes through a short state machine:
//!
//! ```text
//! RECEIVED ──► FILTERED_OUT                 (no device id, status, control)
//!    │
//!    └──► IDENTIFIED ──► KNOWN   ──► state messages, one per entity
//!                    └──► UNKNOWN ──► optional report to the fallback sensor
//! ```
//!
//! Nothing but the registry survives between events.

use serde::Serialize;

use rfxmqtt_domain::device::DeviceIdentity;
use rfxmqtt_domain::discovery::{EntityDiscovery, UnknownDeviceDiscovery, UnknownDeviceReport};
use rfxmqtt_domain::error::{BridgeError, PublishError};
use rfxmqtt_domain::event::{Event, EventKind};
use rfxmqtt_domain::topic;

use crate::deriver::derive;
use crate::ports::{FrameDecoder, Publisher};
use crate::registry::{DeviceRegistry, EntityConfig};
use crate::settings::BridgeSettings;

/// Why an event was dropped before the registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// The packet carried no device id.
    Unaddressable,
    /// Receiver housekeeping.
    Status,
    /// A remote-control command rather than device telemetry.
    Control,
}

/// Terminal state of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dropped without publishing.
    Filtered(FilterReason),
    /// Device not registered; `reported` tells whether a report was published.
    Unknown { reported: bool },
    /// State messages published for a registered device.
    Published {
        identity: DeviceIdentity,
        messages: usize,
    },
}

/// What the setup pass did.
#[derive(Debug, Default)]
pub struct SetupReport {
    /// Devices registered, in configuration order.
    pub registered: Vec<DeviceIdentity>,
    /// Configuration entries rejected, with the reason.
    pub skipped: Vec<(String, BridgeError)>,
    /// Discovery messages published, unknown-device sensor included.
    pub discovery_messages: usize,
}

/// Owns the registry and the publisher; turns events into messages.
pub struct Dispatcher<D, P> {
    decoder: D,
    publisher: P,
    registry: DeviceRegistry,
    settings: BridgeSettings,
}

impl<D, P> Dispatcher<D, P>
where
    D: FrameDecoder,
    P: Publisher,
{
    /// Create a dispatcher with an empty registry.
    pub fn new(decoder: D, publisher: P, settings: BridgeSettings) -> Self {
        Self {
            decoder,
            publisher,
            registry: DeviceRegistry::new(),
            settings,
        }
    }

    /// The device registry.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Register configured devices and publish their discovery messages.
    ///
    /// The unknown-device sensor is announced first when enabled. Entries
    /// whose frame does not decode, or that duplicate an earlier device,
    /// are logged and skipped; the remaining entries are still processed.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] as soon as a discovery message cannot be
    /// delivered.
    pub async fn setup<I>(&mut self, devices: I) -> Result<SetupReport, PublishError>
    where
        I: IntoIterator<Item = (String, EntityConfig)>,
    {
        let mut report = SetupReport::default();

        if self.settings.publish_unknown {
            let payload = UnknownDeviceDiscovery::new(&self.settings.prefix);
            self.publish_json(&topic::unknown_device_config_topic(), &payload)
                .await?;
            report.discovery_messages += 1;
        } else {
            tracing::info!(
                "unknown devices will be ignored, set publish_unknown to true to report them"
            );
        }

        for (frame_hex, config) in devices {
            let event = match self.decoder.decode_hex(&frame_hex) {
                Ok(event) => event,
                Err(err) => {
                    tracing::error!(
                        frame = %frame_hex,
                        error = %err,
                        "invalid device frame in configuration, skipping"
                    );
                    report.skipped.push((frame_hex, err.into()));
                    continue;
                }
            };

            let identity = match self.registry.register_event(&event, config) {
                Ok(identity) => identity,
                Err(err) => {
                    tracing::error!(
                        frame = %frame_hex,
                        identity = %err.identity,
                        "found a device that appears to be a duplicate, skipping"
                    );
                    report.skipped.push((frame_hex, err.into()));
                    continue;
                }
            };

            let Some(config) = self.registry.lookup(&identity) else {
                continue;
            };

            for entity in derive(&event, config) {
                let payload =
                    EntityDiscovery::new(&identity, &config.name, &entity, &self.settings.prefix)
                        .with_extra(&config.extra);
                self.publish_json(&entity.config_topic(), &payload).await?;
                report.discovery_messages += 1;
            }

            tracing::info!(%identity, name = %config.name, "device registered");
            report.registered.push(identity);
        }

        Ok(report)
    }

    /// Decode raw bytes and process the resulting event.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Decode`] for undecodable bytes and
    /// [`BridgeError::Publish`] when a message cannot be delivered.
    pub async fn handle_frame(&self, bytes: Vec<u8>) -> Result<Outcome, BridgeError> {
        let event = self.decoder.decode_bytes(bytes)?;
        Ok(self.handle_event(&event).await?)
    }

    /// Process one decoded event.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when a message cannot be delivered; the
    /// remaining messages for this event are not attempted.
    pub async fn handle_event(&self, event: &Event) -> Result<Outcome, PublishError> {
        if !event.device.is_addressable() {
            tracing::trace!(frame = %event.frame, "dropping event without device id");
            return Ok(Outcome::Filtered(FilterReason::Unaddressable));
        }

        match event.kind {
            EventKind::Status => {
                tracing::trace!(frame = %event.frame, "dropping status event");
                return Ok(Outcome::Filtered(FilterReason::Status));
            }
            EventKind::Control => {
                tracing::trace!(frame = %event.frame, "dropping control event");
                return Ok(Outcome::Filtered(FilterReason::Control));
            }
            EventKind::Measurement => {}
        }

        let identity = event.identity();
        let Some(config) = self.registry.lookup(&identity) else {
            let reported = self.handle_unknown(event).await?;
            return Ok(Outcome::Unknown { reported });
        };

        let mut messages = 0;
        for entity in derive(event, config) {
            self.publisher
                .publish(&entity.state_topic(), entity.state.to_string(), true)
                .await?;
            messages += 1;
        }

        tracing::debug!(%identity, messages, "device state published");
        Ok(Outcome::Published { identity, messages })
    }

    async fn handle_unknown(&self, event: &Event) -> Result<bool, PublishError> {
        tracing::info!(
            frame = %event.frame,
            device = %event.device,
            values = %event.values,
            "unknown device"
        );

        if !self.settings.publish_unknown {
            return Ok(false);
        }

        let report = UnknownDeviceReport::from_event(event);
        self.publish_json(&topic::unknown_device_state_topic(), &report)
            .await?;
        Ok(true)
    }

    async fn publish_json<T: Serialize + Sync>(
        &self,
        topic: &str,
        payload: &T,
    ) -> Result<(), PublishError> {
        let payload =
            serde_json::to_string(payload).map_err(|err| PublishError::new(topic, err))?;
        self.publisher.publish(topic, payload, true).await
    }
}

#[cfg(test)]
mod tests {
    use rfxmqtt_domain::device::DeviceInfo;
    use rfxmqtt_domain::value::Values;

    use super::*;
    use crate::testing::{RecordingPublisher, StubDecoder};

    const TEMP_HUMID: &str = "0a52014ff801007d4f0369";
    const TEMP_HUMID_SAME_DEVICE: &str = "0a52011bf801007c4f0369";
    const TEMP_HUMID_OTHER_DEVICE: &str = "0a520101aa02007d4f0369";
    const LIGHTING5: &str = "0a140001f573d710030070";
    const STATUS: &str = "0d010001025345100c2f01010000";

    fn dispatcher(publish_unknown: bool) -> Dispatcher<StubDecoder, RecordingPublisher> {
        Dispatcher::new(
            StubDecoder,
            RecordingPublisher::default(),
            BridgeSettings {
                prefix: "ha".to_string(),
                publish_unknown,
            },
        )
    }

    fn devices(entries: &[(&str, &str)]) -> Vec<(String, EntityConfig)> {
        entries
            .iter()
            .map(|(hex, name)| ((*hex).to_string(), EntityConfig::named(*name)))
            .collect()
    }

    fn decode(hex: &str) -> Event {
        StubDecoder.decode_hex(hex).unwrap()
    }

    #[tokio::test]
    async fn should_publish_discovery_for_each_entity_on_setup() {
        let mut dispatcher = dispatcher(false);
        let report = dispatcher
            .setup(devices(&[(TEMP_HUMID, "testing")]))
            .await
            .unwrap();

        assert_eq!(report.registered.len(), 1);
        assert_eq!(report.discovery_messages, 6);
        assert_eq!(
            dispatcher.publisher().topics(),
            [
                "sensor/testing_temperature/config",
                "sensor/testing_humidity/config",
                "sensor/testing_humidity_status/config",
                "sensor/testing_humidity_status_numeric/config",
                "sensor/testing_battery_numeric/config",
                "sensor/testing_rssi_numeric/config",
            ]
        );

        let (_, payload, retain) = &dispatcher.publisher().messages()[0];
        assert!(retain);
        let json: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(json["state_topic"], "ha/sensor/testing_temperature/state");
        assert_eq!(json["unique_id"], "rfxmqtt-52-1-f8:01-temperature");
    }

    #[tokio::test]
    async fn should_announce_unknown_device_sensor_first_when_enabled() {
        let mut dispatcher = dispatcher(true);
        dispatcher
            .setup(devices(&[(TEMP_HUMID, "testing")]))
            .await
            .unwrap();

        let messages = dispatcher.publisher().messages();
        assert_eq!(messages[0].0, "sensor/rfxmqtt_unknown_device/config");
        let json: serde_json::Value = serde_json::from_str(&messages[0].1).unwrap();
        assert_eq!(json["name"], "RFXMQTT Unknown Device");
        assert_eq!(messages.len(), 7);
    }

    #[tokio::test]
    async fn should_skip_bad_and_duplicate_entries_and_continue() {
        let mut dispatcher = dispatcher(false);
        let report = dispatcher
            .setup(devices(&[
                (TEMP_HUMID, "first"),
                ("zz", "broken"),
                (TEMP_HUMID_SAME_DEVICE, "duplicate"),
                (TEMP_HUMID_OTHER_DEVICE, "second"),
            ]))
            .await
            .unwrap();

        assert_eq!(report.registered.len(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(report.skipped[0].1, BridgeError::Decode(_)));
        assert!(matches!(report.skipped[1].1, BridgeError::Conflict(_)));
        assert_eq!(dispatcher.registry().len(), 2);
        assert!(
            dispatcher
                .publisher()
                .topics()
                .iter()
                .all(|t| !t.starts_with("sensor/duplicate_"))
        );
    }

    #[tokio::test]
    async fn should_publish_discovery_in_both_domains_for_control_devices() {
        let mut dispatcher = dispatcher(false);
        dispatcher
            .setup(devices(&[(LIGHTING5, "Hall")]))
            .await
            .unwrap();

        assert_eq!(
            dispatcher.publisher().topics(),
            [
                "sensor/hall_command/config",
                "sensor/hall_rssi_numeric/config",
                "binary_sensor/hall_command/config",
                "binary_sensor/hall_rssi_numeric/config",
            ]
        );
    }

    #[tokio::test]
    async fn should_publish_transformed_state_for_known_device() {
        let mut dispatcher = dispatcher(false);
        dispatcher
            .setup(devices(&[(TEMP_HUMID, "testing")]))
            .await
            .unwrap();
        dispatcher.publisher().messages.lock().unwrap().clear();

        let outcome = dispatcher
            .handle_event(&decode(TEMP_HUMID_SAME_DEVICE))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Published {
                identity: DeviceIdentity::new(0x52, 0x01, "f8:01"),
                messages: 6,
            }
        );
        let messages = dispatcher.publisher().messages();
        assert_eq!(
            messages[0],
            (
                "sensor/testing_temperature/state".to_string(),
                "12.4".to_string(),
                true
            )
        );
        assert_eq!(messages[4].1, "90");
        assert_eq!(messages[5].1, "-72");
    }

    #[tokio::test]
    async fn should_drop_unknown_device_silently_when_disabled() {
        let dispatcher = dispatcher(false);
        let outcome = dispatcher.handle_event(&decode(TEMP_HUMID)).await.unwrap();

        assert_eq!(outcome, Outcome::Unknown { reported: false });
        assert!(dispatcher.publisher().messages().is_empty());
    }

    #[tokio::test]
    async fn should_report_unknown_device_once_when_enabled() {
        let dispatcher = dispatcher(true);
        let outcome = dispatcher.handle_event(&decode(TEMP_HUMID)).await.unwrap();

        assert_eq!(outcome, Outcome::Unknown { reported: true });
        let messages = dispatcher.publisher().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "sensor/rfxmqtt_unknown_device/state");
        let json: serde_json::Value = serde_json::from_str(&messages[0].1).unwrap();
        assert_eq!(json["state"], TEMP_HUMID);
        assert_eq!(json["values"]["Humidity"], 79);
    }

    #[tokio::test]
    async fn should_filter_status_and_control_events() {
        let mut dispatcher = dispatcher(true);
        dispatcher
            .setup(devices(&[(LIGHTING5, "Hall")]))
            .await
            .unwrap();
        dispatcher.publisher().messages.lock().unwrap().clear();

        assert_eq!(
            dispatcher.handle_event(&decode(STATUS)).await.unwrap(),
            Outcome::Filtered(FilterReason::Unaddressable)
        );
        assert_eq!(
            dispatcher.handle_event(&decode(LIGHTING5)).await.unwrap(),
            Outcome::Filtered(FilterReason::Control)
        );
        assert!(dispatcher.publisher().messages().is_empty());
    }

    #[tokio::test]
    async fn should_filter_addressable_status_events() {
        let dispatcher = dispatcher(true);
        let mut event = decode(STATUS);
        event.device.id_string = "00:01".to_string();

        assert_eq!(
            dispatcher.handle_event(&event).await.unwrap(),
            Outcome::Filtered(FilterReason::Status)
        );
    }

    #[tokio::test]
    async fn should_filter_measurement_without_device_id() {
        let dispatcher = dispatcher(true);
        let mut event = decode(TEMP_HUMID);
        event.device = DeviceInfo {
            id_string: String::new(),
            ..event.device
        };
        event.values = Values::new().with("Temperature", 1.0);

        assert_eq!(
            dispatcher.handle_event(&event).await.unwrap(),
            Outcome::Filtered(FilterReason::Unaddressable)
        );
        assert!(dispatcher.publisher().messages().is_empty());
    }

    #[tokio::test]
    async fn should_decode_raw_frames() {
        let dispatcher = dispatcher(false);
        let bytes = hex_bytes(TEMP_HUMID);
        assert_eq!(
            dispatcher.handle_frame(bytes).await.unwrap(),
            Outcome::Unknown { reported: false }
        );

        let err = dispatcher.handle_frame(vec![0x01]).await.unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[tokio::test]
    async fn should_propagate_publish_failures() {
        let mut dispatcher = Dispatcher::new(
            StubDecoder,
            RecordingPublisher::failing(),
            BridgeSettings::default(),
        );
        let err = dispatcher
            .setup(devices(&[(TEMP_HUMID, "testing")]))
            .await
            .unwrap_err();
        assert_eq!(err.topic, "sensor/testing_temperature/config");
        assert!(err.to_string().contains("broker unreachable"));
    }

    fn hex_bytes(text: &str) -> Vec<u8> {
        rfxmqtt_domain::frame::Frame::from_hex(text)
            .unwrap()
            .as_bytes()
            .to_vec()
    }
}
