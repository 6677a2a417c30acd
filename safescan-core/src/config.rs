//! Scanner configuration

use std::net::Ipv4Addr;
use std::time::Duration;

use safescan_types::ScanRange;

use crate::constants::DEFAULT_REPLY_TIMEOUT;
use crate::error::{Error, Result};

/// Connection and scan parameters for one scanner session
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use safescan_core::ScannerConfiguration;
/// use safescan_types::{ScanRange, TenthOfDegree};
///
/// let range = ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750)).unwrap();
/// let config = ScannerConfiguration::new(
///     Ipv4Addr::new(192, 168, 0, 50),
///     55055,
///     50505,
///     Ipv4Addr::new(192, 168, 0, 10),
///     range,
/// ).unwrap();
/// assert_eq!(config.host_control_port(), 55055);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfiguration {
    host_addr: Ipv4Addr,
    host_control_port: u16,
    host_data_port: u16,
    device_addr: Ipv4Addr,
    scan_range: ScanRange,
    reply_timeout: Duration,
    start_retries: u32,
}

impl ScannerConfiguration {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the control and data ports collide; both
    /// sockets must bind independently on the host.
    pub fn new(
        host_addr: Ipv4Addr,
        host_control_port: u16,
        host_data_port: u16,
        device_addr: Ipv4Addr,
        scan_range: ScanRange,
    ) -> Result<Self> {
        if host_control_port == host_data_port {
            return Err(Error::InvalidConfiguration(format!(
                "control and data ports must differ, both are {host_control_port}"
            )));
        }

        Ok(Self {
            host_addr,
            host_control_port,
            host_data_port,
            device_addr,
            scan_range,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            start_retries: 0,
        })
    }

    /// Set the control reply timeout
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Allow up to `retries` automatic start-request resends, one per
    /// reply timeout (default: 0, no resend)
    pub fn with_start_retries(mut self, retries: u32) -> Self {
        self.start_retries = retries;
        self
    }

    pub fn host_addr(&self) -> Ipv4Addr {
        self.host_addr
    }

    pub fn host_control_port(&self) -> u16 {
        self.host_control_port
    }

    pub fn host_data_port(&self) -> u16 {
        self.host_data_port
    }

    pub fn device_addr(&self) -> Ipv4Addr {
        self.device_addr
    }

    pub fn scan_range(&self) -> ScanRange {
        self.scan_range
    }

    pub fn reply_timeout(&self) -> Duration {
        self.reply_timeout
    }

    pub fn start_retries(&self) -> u32 {
        self.start_retries
    }
}
