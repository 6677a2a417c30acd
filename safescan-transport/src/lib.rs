//! Transport layer for the scanner protocol
//!
//! Two independent UDP flows connect host and device: a control
//! channel for request/reply handshakes and a data channel streaming
//! monitoring frames. The channels know nothing about session state;
//! they emit events and frames into sinks owned by the session
//! controller, which is the only component applying transitions.

pub mod control;
pub mod data;
pub mod error;
pub mod port;

pub use control::{ControlEvent, UdpControlChannel};
pub use data::UdpDataChannel;
pub use error::{Error, Result};
pub use port::{DatagramPort, UdpPort};

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

/// Request/reply transport contract
///
/// An implementation tracks at most one outstanding reply expectation:
/// [`start_async_receiving`](ControlChannel::start_async_receiving)
/// arms a listener for exactly one reply (or a timeout), and must be
/// re-armed before the next request can be tracked.
#[async_trait]
pub trait ControlChannel: Send + Sync {
    /// Begin listening for one reply, reported as a [`ControlEvent`]
    ///
    /// # Errors
    ///
    /// Fails when a reply expectation is already outstanding.
    fn start_async_receiving(&self, timeout: Duration) -> Result<()>;

    /// Send exactly one request datagram; does not wait for a reply
    ///
    /// # Panics
    ///
    /// Writing on an unarmed channel is a programmer error and panics:
    /// the reply would be lost before anyone listens for it.
    async fn write(&self, data: Bytes) -> Result<()>;
}

/// One-directional streaming transport contract
pub trait DataChannel: Send + Sync {
    /// Begin the persistent receive loop; idempotent when already running
    fn start_async_receiving(&self) -> Result<()>;
}
