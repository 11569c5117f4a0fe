//! # rfxmqtt-adapter-mqtt
//!
//! MQTT adapter — delivers the bridge's messages to an MQTT broker.
//!
//! ## Responsibilities
//! - Connect to the broker with optional credentials
//! - Prepend the configured topic prefix, once, to every relative topic
//! - Publish with QoS 1, bounded by a timeout so a stalled broker cannot
//!   hang the event stream
//! - Drive the rumqttc event loop on a background task
//!
//! ## Dependency rule
//! Same as other adapters: depends on `rfxmqtt-app` and `rfxmqtt-domain`.

mod config;
mod error;

pub use config::MqttConfig;
pub use error::MqttError;

use std::time::Duration;

use rumqttc::{
    AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
};
use tokio::task::JoinHandle;

use rfxmqtt_app::ports::Publisher;
use rfxmqtt_domain::error::PublishError;
use rfxmqtt_domain::topic;

/// Capacity of the request queue between the client and its event loop.
const REQUEST_CAPACITY: usize = 64;

/// Pause after a connection error before polling again.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// [`Publisher`] backed by a rumqttc [`AsyncClient`].
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    prefix: String,
    timeout: Duration,
}

impl MqttPublisher {
    /// Create the client and spawn the task that drives its event loop.
    ///
    /// The connection is established lazily by the event loop; publishes
    /// issued before it is up are queued, subject to the publish timeout.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> (Self, JoinHandle<()>) {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
        if !config.username.is_empty() {
            options.set_credentials(&config.username, &config.password);
        }

        let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        let handle = tokio::spawn(drive(eventloop));

        tracing::info!(host = %config.host, port = config.port, "MQTT client started");

        (
            Self {
                client,
                prefix: config.prefix.clone(),
                timeout: config.publish_timeout(),
            },
            handle,
        )
    }

    /// Close the broker connection and wait for the event loop to finish.
    ///
    /// The disconnect request is queued behind any pending publishes, so
    /// they are flushed first. The event loop `task` is given `grace` to
    /// get there and is aborted otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::Client`] when the request cannot be queued and
    /// [`MqttError::Timeout`] when the event loop does not stop in time.
    pub async fn shutdown(
        &self,
        task: JoinHandle<()>,
        grace: Duration,
    ) -> Result<(), MqttError> {
        if let Err(err) = self.client.disconnect().await {
            task.abort();
            return Err(MqttError::Client(err));
        }

        let abort = task.abort_handle();
        match tokio::time::timeout(grace, task).await {
            Ok(_) => {
                tracing::info!("disconnected from MQTT broker");
                Ok(())
            }
            Err(_) => {
                abort.abort();
                Err(MqttError::Timeout(grace))
            }
        }
    }
}

impl Publisher for MqttPublisher {
    async fn publish(
        &self,
        topic: &str,
        payload: String,
        retain: bool,
    ) -> Result<(), PublishError> {
        let full_topic = topic::with_prefix(&self.prefix, topic);
        tracing::debug!(topic = %full_topic, %payload, "publishing");

        let request = self
            .client
            .publish(full_topic, QoS::AtLeastOnce, retain, payload);
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(PublishError::new(topic, MqttError::Client(err))),
            Err(_) => Err(PublishError::new(topic, MqttError::Timeout(self.timeout))),
        }
    }
}

/// What the event loop driver does after one poll.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Retry,
    Stop,
}

fn next_step(polled: &Result<Event, ConnectionError>) -> Step {
    match polled {
        Ok(Event::Outgoing(Outgoing::Disconnect)) | Err(ConnectionError::RequestsDone) => {
            Step::Stop
        }
        Ok(_) => Step::Continue,
        Err(_) => Step::Retry,
    }
}

/// Poll the event loop until the client disconnects or is dropped.
///
/// rumqttc reconnects on the next poll after a connection error.
async fn drive(mut eventloop: EventLoop) {
    loop {
        let polled = eventloop.poll().await;
        let step = next_step(&polled);
        match polled {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                tracing::info!(code = ?ack.code, "connected to MQTT broker");
            }
            Ok(_) => {}
            Err(err) if step == Step::Retry => {
                let err = MqttError::Connection(err);
                tracing::warn!(
                    error = &err as &dyn std::error::Error,
                    "MQTT connection lost, retrying"
                );
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
            Err(_) => {}
        }
        if step == Step::Stop {
            tracing::debug!("MQTT event loop stopped");
            return;
        }
    }
}
