//! MQTT adapter error types.

use std::time::Duration;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client returned an error.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// A request, or the shutdown of the event loop, did not complete in time.
    #[error("MQTT request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection to the broker failed.
    #[error("MQTT connection error")]
    Connection(#[source] rumqttc::ConnectionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_timeout_error() {
        let err = MqttError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "MQTT request timed out after 5s");
    }

    #[test]
    fn should_keep_cause_out_of_client_error_message() {
        let err = MqttError::Connection(rumqttc::ConnectionError::RequestsDone);
        assert_eq!(err.to_string(), "MQTT connection error");
        assert!(std::error::Error::source(&err).is_some());
    }
}
