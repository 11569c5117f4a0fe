//! Publisher port — delivers messages to the bus.

use std::future::Future;

use rfxmqtt_domain::error::PublishError;

/// Sends a payload to a topic on the message bus.
///
/// Topics are relative; implementations prepend their configured prefix.
/// Implementations must bound how long a publish may take and report a
/// [`PublishError`] instead of hanging.
pub trait Publisher {
    /// Publish `payload` to `topic`.
    fn publish(
        &self,
        topic: &str,
        payload: String,
        retain: bool,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

impl<T: Publisher + Send + Sync> Publisher for std::sync::Arc<T> {
    fn publish(
        &self,
        topic: &str,
        payload: String,
        retain: bool,
    ) -> impl Future<Output = Result<(), PublishError>> + Send {
        (**self).publish(topic, payload, retain)
    }
}
