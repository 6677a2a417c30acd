//! Real-UDP wiring for the session controller
//!
//! The driver binds the two host ports, connects them to the device's
//! fixed control and data ports, and pumps channel events and frames
//! into the controller from a single task, so all transitions are
//! applied from one place.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use safescan_core::constants::{DEVICE_CONTROL_PORT, DEVICE_DATA_PORT};
use safescan_core::{ScannerConfiguration, SessionState};
use safescan_transport::{UdpControlChannel, UdpDataChannel, UdpPort};
use safescan_types::LaserScan;

use crate::error::Result;
use crate::pending::PendingOperation;
use crate::scanner::Scanner;

type UdpScanner = Scanner<UdpControlChannel<UdpPort>, UdpDataChannel<UdpPort>>;

/// A session controller wired to real UDP sockets
///
/// Dropping the driver aborts the pump task; the data channel's
/// receive loop then ends on its closed frame sink. The loop stays
/// open through the stop handshake, so straggling frames are observed
/// and discarded rather than left in socket buffers.
///
/// # Examples
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use safescan::ScannerDriver;
/// use safescan_core::ScannerConfiguration;
/// use safescan_types::{ScanRange, TenthOfDegree};
///
/// #[tokio::main]
/// async fn main() -> safescan::Result<()> {
///     let range = ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750))?;
///     let config = ScannerConfiguration::new(
///         Ipv4Addr::new(192, 168, 0, 50),
///         55055,
///         50505,
///         Ipv4Addr::new(192, 168, 0, 10),
///         range,
///     )?;
///
///     let driver = ScannerDriver::connect(config, |scan| {
///         println!("{scan}");
///     })
///     .await?;
///
///     driver.start().await?.wait().await?;
///     Ok(())
/// }
/// ```
pub struct ScannerDriver {
    scanner: Arc<UdpScanner>,
    pump: JoinHandle<()>,
}

impl ScannerDriver {
    /// Bind the host ports and build the controller
    pub async fn connect(
        config: ScannerConfiguration,
        callback: impl Fn(LaserScan) + Send + Sync + 'static,
    ) -> Result<Self> {
        let control_port = Arc::new(
            UdpPort::bind(
                SocketAddr::from((config.host_addr(), config.host_control_port())),
                SocketAddr::from((config.device_addr(), DEVICE_CONTROL_PORT)),
            )
            .await?,
        );
        let data_port = Arc::new(
            UdpPort::bind(
                SocketAddr::from((config.host_addr(), config.host_data_port())),
                SocketAddr::from((config.device_addr(), DEVICE_DATA_PORT)),
            )
            .await?,
        );

        info!(
            device = %config.device_addr(),
            "Scanner channels bound"
        );

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

        let control = UdpControlChannel::new(control_port, event_tx);
        let data = UdpDataChannel::new(data_port, frame_tx);

        let scanner = Arc::new(
            Scanner::builder(config, control, data)
                .on_scan(callback)
                .build()?,
        );

        let pump = tokio::spawn({
            let scanner = Arc::clone(&scanner);
            async move {
                loop {
                    tokio::select! {
                        event = event_rx.recv() => match event {
                            Some(event) => scanner.handle_control_event(event).await,
                            None => break,
                        },
                        frame = frame_rx.recv() => match frame {
                            Some(frame) => scanner.handle_frame(frame),
                            None => break,
                        },
                    }
                }
            }
        });

        Ok(Self { scanner, pump })
    }

    /// Ask the device to begin streaming
    pub async fn start(&self) -> Result<PendingOperation> {
        self.scanner.start().await
    }

    /// Ask the device to cease streaming
    pub async fn stop(&self) -> Result<PendingOperation> {
        self.scanner.stop().await
    }

    /// Current session state
    pub fn session_state(&self) -> SessionState {
        self.scanner.session_state()
    }
}

impl Drop for ScannerDriver {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safescan_types::{ScanRange, TenthOfDegree};
    use std::net::Ipv4Addr;

    #[tokio::test]
    #[ignore] // Only run with a real scanner
    async fn test_driver_against_device() {
        let config = ScannerConfiguration::new(
            Ipv4Addr::new(192, 168, 0, 50),
            55055,
            50505,
            Ipv4Addr::new(192, 168, 0, 10),
            ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750)).unwrap(),
        )
        .unwrap();

        let driver = ScannerDriver::connect(config, |scan| println!("{scan}"))
            .await
            .unwrap();

        driver.start().await.unwrap().wait().await.unwrap();
        driver.stop().await.unwrap().wait().await.unwrap();
    }
}
