//! RFXtrx adapter error types.

/// Errors specific to the RFXtrx adapter.
#[derive(Debug, thiserror::Error)]
pub enum RfxtrxError {
    /// The serial port could not be opened or configured.
    #[error("failed to open serial port {device}")]
    Open {
        /// Device path.
        device: String,
        #[source]
        source: serialport::Error,
    },

    /// Reading from or writing to the serial port failed.
    #[error("serial port I/O error")]
    Io(#[from] std::io::Error),

    /// The blocking start-up task panicked or was cancelled.
    #[error("serial start-up task failed")]
    Startup(#[from] tokio::task::JoinError),
}
