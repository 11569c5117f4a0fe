//! # rfxmqttd — RFXtrx to MQTT bridge daemon
//!
//! Composition root that wires the receiver and the broker together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Connect the MQTT publisher
//! - Register configured devices and publish their discovery messages
//! - Open the serial receiver and forward every frame to the dispatcher
//! - Handle graceful shutdown (Ctrl-C or receiver closed)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use rfxmqtt_adapter_mqtt::MqttPublisher;
use rfxmqtt_adapter_rfxtrx::{RfxtrxDecoder, transport};
use rfxmqtt_app::dispatcher::Dispatcher;
use rfxmqtt_domain::error::BridgeError;

use crate::config::Config;

/// Frames buffered between the serial thread and the dispatcher.
const FRAME_QUEUE: usize = 64;

/// Time left to the MQTT event loop to flush pending messages on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(config.log_filter())?)
        .init();

    // MQTT
    let (publisher, mqtt_task) = MqttPublisher::connect(&config.mqtt);

    // Registry and discovery
    let mut dispatcher = Dispatcher::new(RfxtrxDecoder, publisher, config.bridge_settings());
    let report = dispatcher.setup(config.devices.0).await?;
    tracing::info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        discovery_messages = report.discovery_messages,
        "setup complete"
    );

    // Receiver
    let (tx, mut rx) = mpsc::channel(FRAME_QUEUE);
    let _reader = transport::start(config.serial.clone(), tx).await?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            frame = rx.recv() => {
                let Some(frame) = frame else {
                    tracing::warn!("receiver closed, stopping");
                    break;
                };
                match dispatcher.handle_frame(frame).await {
                    Ok(outcome) => tracing::trace!(?outcome, "frame handled"),
                    Err(BridgeError::Decode(err)) => {
                        tracing::warn!(error = &err as &dyn Error, "dropping undecodable frame");
                    }
                    Err(BridgeError::Publish(err)) => {
                        tracing::error!(error = &err as &dyn Error, "failed to publish device state");
                    }
                    Err(err) => tracing::error!(error = &err as &dyn Error, "failed to handle frame"),
                }
            }
            _ = &mut shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    if let Err(err) = dispatcher
        .publisher()
        .shutdown(mqtt_task, SHUTDOWN_GRACE)
        .await
    {
        tracing::warn!(error = &err as &dyn Error, "failed to disconnect from MQTT broker");
    }

    Ok(())
}
