//! UDP datagram port
//!
//! A bound, connected UDP socket with plain send/recv primitives. The
//! channels layer policy (timeouts, arming, decode) on top of this.

use std::net::SocketAddr;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::net::UdpSocket;
use tracing::{debug, trace};

use safescan_core::constants::MAX_DATAGRAM_SIZE;

use crate::error::Result;

/// Raw datagram send/receive primitives
///
/// Implemented by [`UdpPort`] in production; tests substitute
/// in-memory ports.
#[async_trait]
pub trait DatagramPort: Send + Sync + 'static {
    /// Send one datagram to the connected peer
    async fn send(&self, data: &[u8]) -> Result<()>;

    /// Receive one datagram; pends until one arrives
    async fn recv(&self) -> Result<BytesMut>;
}

/// A UDP socket bound to a host port and connected to the device
pub struct UdpPort {
    socket: UdpSocket,
    remote: SocketAddr,
}

impl UdpPort {
    /// Bind a local port and connect it to the device endpoint
    ///
    /// Connecting fixes the send target and lets the kernel drop
    /// datagrams from any other source.
    pub async fn bind(local: SocketAddr, remote: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(local).await?;
        socket.connect(remote).await?;

        debug!("Bound {} connected to {}", socket.local_addr()?, remote);

        Ok(Self { socket, remote })
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }
}

#[async_trait]
impl DatagramPort for UdpPort {
    async fn send(&self, data: &[u8]) -> Result<()> {
        trace!(
            peer = %self.remote,
            data = %hex::encode(&data[..data.len().min(32)]),
            "Sending {} bytes",
            data.len()
        );

        self.socket.send(data).await?;
        Ok(())
    }

    async fn recv(&self) -> Result<BytesMut> {
        let mut buf = BytesMut::with_capacity(MAX_DATAGRAM_SIZE);
        buf.resize(MAX_DATAGRAM_SIZE, 0);

        let n = self.socket.recv(&mut buf).await?;
        buf.truncate(n);

        trace!(
            peer = %self.remote,
            data = %hex::encode(&buf[..n.min(32)]),
            "Received {} bytes",
            n
        );

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_port_roundtrip_over_loopback() {
        let a = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = a.local_addr().unwrap();

        let port = UdpPort::bind("127.0.0.1:0".parse().unwrap(), peer_addr)
            .await
            .unwrap();
        assert_eq!(port.remote_addr(), peer_addr);

        port.send(b"ping").await.unwrap();

        let mut buf = [0u8; 16];
        let (n, from) = a.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"ping");

        a.send_to(b"pong", from).await.unwrap();
        let reply = port.recv().await.unwrap();
        assert_eq!(&reply[..], b"pong");
    }
}
