//! Serial transport — resets the receiver and forwards raw frames.
//!
//! Reading happens on a dedicated blocking thread. Frames are handed to the
//! async side through a bounded channel; the channel closes when the port
//! reports an error or end of stream, which ends the bridge's run loop.

use std::io::{ErrorKind, Read, Write};
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::SerialConfig;
use crate::error::RfxtrxError;

/// Reset the receiver; it stays silent for a short while afterwards.
pub const RESET: [u8; 14] = [
    0x0D, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Ask the receiver for its status; answered with a `0x01` packet.
pub const GET_STATUS: [u8; 14] = [
    0x0D, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Start receiving; required by firmware 1001 and later.
pub const START_RECEIVER: [u8; 14] = [
    0x0D, 0x00, 0x00, 0x03, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Time the receiver needs after a reset before it accepts commands.
const RESET_SETTLE: Duration = Duration::from_millis(300);

/// Reads length-prefixed frames from a byte stream.
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// The underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Read the next frame, length byte included.
    ///
    /// Zero length bytes are skipped. Returns `Ok(None)` on a read timeout
    /// before a frame starts, so callers can poll.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including
    /// [`ErrorKind::UnexpectedEof`] once the stream is closed.
    pub fn next_frame(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut len = [0u8; 1];
        match self.inner.read_exact(&mut len) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::TimedOut => return Ok(None),
            Err(err) => return Err(err),
        }
        if len[0] == 0 {
            return Ok(None);
        }

        let mut frame = vec![0u8; usize::from(len[0]) + 1];
        frame[0] = len[0];
        self.inner.read_exact(&mut frame[1..])?;
        Ok(Some(frame))
    }
}

/// Forward frames from `reader` to `tx` until the stream or the channel closes.
///
/// A timeout in the middle of a frame drops the partial frame and calls
/// `resync`, which must discard buffered input so the next byte read is a
/// length byte.
pub fn pump<R: Read>(
    reader: R,
    tx: &mpsc::Sender<Vec<u8>>,
    mut resync: impl FnMut(&mut R) -> std::io::Result<()>,
) {
    let mut reader = FrameReader::new(reader);
    loop {
        match reader.next_frame() {
            Ok(Some(frame)) => {
                tracing::trace!(len = frame.len(), "frame received");
                if tx.blocking_send(frame).is_err() {
                    tracing::debug!("frame receiver dropped, stopping serial reader");
                    return;
                }
            }
            Ok(None) => {}
            Err(err) if err.kind() == ErrorKind::TimedOut => {
                tracing::warn!("serial read timed out mid-frame, dropping partial frame");
                if let Err(err) = resync(reader.get_mut()) {
                    tracing::error!(%err, "failed to clear serial input, closing transport");
                    return;
                }
            }
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                tracing::info!("serial stream closed");
                return;
            }
            Err(err) => {
                tracing::error!(%err, "serial read failed, closing transport");
                return;
            }
        }
    }
}

/// Send the start-up command sequence: reset, settle, drain, status, start.
///
/// `drain` discards whatever the receiver buffered before the reset.
///
/// # Errors
///
/// Returns [`RfxtrxError::Io`] when a command cannot be written.
pub fn initialise<W: Write>(
    port: &mut W,
    drain: impl FnOnce(&mut W) -> std::io::Result<()>,
) -> Result<(), RfxtrxError> {
    port.write_all(&RESET)?;
    port.flush()?;
    std::thread::sleep(RESET_SETTLE);
    drain(port)?;
    port.write_all(&GET_STATUS)?;
    port.write_all(&START_RECEIVER)?;
    port.flush()?;
    Ok(())
}

fn clear_input(port: &mut Box<dyn serialport::SerialPort>) -> std::io::Result<()> {
    port.clear(serialport::ClearBuffer::Input)
        .map_err(std::io::Error::from)
}

/// Open the serial port, initialise the receiver and start the reader thread.
///
/// # Errors
///
/// Returns [`RfxtrxError::Open`] when the port cannot be opened and
/// [`RfxtrxError::Io`] when the start-up commands fail.
pub fn open(
    config: &SerialConfig,
    tx: mpsc::Sender<Vec<u8>>,
) -> Result<JoinHandle<()>, RfxtrxError> {
    let mut port = serialport::new(&config.device, config.baud_rate)
        .timeout(Duration::from_millis(config.read_timeout_ms))
        .open()
        .map_err(|source| RfxtrxError::Open {
            device: config.device.clone(),
            source,
        })?;

    initialise(&mut port, clear_input)?;

    tracing::info!(
        device = %config.device,
        baud_rate = config.baud_rate,
        "RFXtrx receiver initialised"
    );

    let handle = std::thread::Builder::new()
        .name("rfxtrx-reader".to_string())
        .spawn(move || pump(port, &tx, clear_input))?;
    Ok(handle)
}

/// Run [`open`] on the blocking pool, as it sleeps while the receiver resets.
///
/// # Errors
///
/// Same as [`open`], plus [`RfxtrxError::Startup`] if the blocking task fails.
pub async fn start(
    config: SerialConfig,
    tx: mpsc::Sender<Vec<u8>>,
) -> Result<JoinHandle<()>, RfxtrxError> {
    tokio::task::spawn_blocking(move || open(&config, tx)).await?
}
