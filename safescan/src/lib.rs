//! # safescan
//!
//! Host-side session driver for industrial safety laser scanners.
//!
//! The driver negotiates a session with the device over two UDP
//! channels: a control channel carrying the start/stop request/reply
//! handshakes and a data channel streaming monitoring frames. Incoming
//! frames are gated against the session state; only frames received
//! while the session is operational and carrying measurements are
//! converted to laser scans and delivered to the user callback.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::net::Ipv4Addr;
//! use safescan::ScannerDriver;
//! use safescan_core::ScannerConfiguration;
//! use safescan_types::{ScanRange, TenthOfDegree};
//!
//! #[tokio::main]
//! async fn main() -> safescan::Result<()> {
//!     let range = ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750))?;
//!     let config = ScannerConfiguration::new(
//!         Ipv4Addr::new(192, 168, 0, 50),
//!         55055,
//!         50505,
//!         Ipv4Addr::new(192, 168, 0, 10),
//!         range,
//!     )?;
//!
//!     let driver = ScannerDriver::connect(config, |scan| {
//!         println!("{scan}");
//!     })
//!     .await?;
//!
//!     // Resolves once the device confirms the start request
//!     driver.start().await?.wait().await?;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//!
//!     driver.stop().await?.wait().await?;
//!     Ok(())
//! }
//! ```

pub mod driver;
pub mod error;
pub mod pending;
pub mod scanner;

// Re-exports
pub use driver::ScannerDriver;
pub use error::{Error, Result};
pub use pending::PendingOperation;
pub use scanner::{LaserScanCallback, Scanner, ScannerBuilder};

// Re-export types
pub use safescan_core::{MonitoringFrame, ScannerConfiguration, SessionState};
pub use safescan_types::{LaserScan, Measurement};
