//! Data channel: continuous best-effort frame ingestion
//!
//! One persistent receive loop decodes every incoming datagram into a
//! [`MonitoringFrame`] and forwards it to the frame sink. Malformed
//! datagrams are dropped here; whether a well-formed frame is
//! trustworthy is the session controller's decision, this channel has
//! no concept of session validity. Nothing is ever sent back to the
//! device on this channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use safescan_core::MonitoringFrame;

use crate::error::{Error, Result};
use crate::port::DatagramPort;
use crate::DataChannel;

/// Data channel over a connected UDP port
pub struct UdpDataChannel<P: DatagramPort> {
    port: Arc<P>,
    frames: mpsc::UnboundedSender<MonitoringFrame>,
    running: Arc<AtomicBool>,
}

impl<P: DatagramPort> UdpDataChannel<P> {
    /// Create a channel forwarding decoded frames to `frames`
    pub fn new(port: Arc<P>, frames: mpsc::UnboundedSender<MonitoringFrame>) -> Self {
        Self {
            port,
            frames,
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<P: DatagramPort> DataChannel for UdpDataChannel<P> {
    fn start_async_receiving(&self) -> Result<()> {
        if self.frames.is_closed() {
            return Err(Error::SinkClosed);
        }
        if self.running.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        debug!("Starting data channel receive loop");

        let port = Arc::clone(&self.port);
        let frames = self.frames.clone();
        let running = Arc::clone(&self.running);

        tokio::spawn(async move {
            loop {
                let datagram = match port.recv().await {
                    Ok(datagram) => datagram,
                    Err(e) => {
                        // Keep the loop armed, a single failed recv
                        // must not end the stream
                        warn!("Data receive failed: {e}");
                        continue;
                    }
                };

                match MonitoringFrame::decode(datagram) {
                    Ok(frame) => {
                        if frames.send(frame).is_err() {
                            debug!("Frame sink closed, ending receive loop");
                            break;
                        }
                    }
                    Err(e) => warn!("Dropping malformed datagram: {e}"),
                }
            }

            running.store(false, Ordering::Release);
        });

        Ok(())
    }
}
