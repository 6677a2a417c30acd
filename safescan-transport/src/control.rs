//! Control channel: armed request/reply exchange
//!
//! The channel sends one request datagram at a time and tracks at most
//! one outstanding reply expectation. Outcomes are reported as
//! [`ControlEvent`]s to a sink supplied at construction; the channel
//! itself never resends and never touches session state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::port::DatagramPort;
use crate::ControlChannel;

/// Outcome of one armed receive window
#[derive(Debug)]
pub enum ControlEvent {
    /// A reply datagram arrived within the window
    Reply(BytesMut),

    /// The window elapsed without a reply
    ReplyTimeout,

    /// The receive failed; the window is closed without a reply
    TransportError(String),
}

/// Control channel over a connected UDP port
pub struct UdpControlChannel<P: DatagramPort> {
    port: Arc<P>,
    events: mpsc::UnboundedSender<ControlEvent>,
    armed: Arc<AtomicBool>,
}

impl<P: DatagramPort> UdpControlChannel<P> {
    /// Create a channel reporting receive outcomes to `events`
    pub fn new(port: Arc<P>, events: mpsc::UnboundedSender<ControlEvent>) -> Self {
        Self {
            port,
            events,
            armed: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl<P: DatagramPort> ControlChannel for UdpControlChannel<P> {
    fn start_async_receiving(&self, timeout: Duration) -> Result<()> {
        if self.events.is_closed() {
            return Err(Error::SinkClosed);
        }
        if self.armed.swap(true, Ordering::AcqRel) {
            return Err(Error::ReceiveAlreadyArmed);
        }

        debug!(?timeout, "Arming control channel for one reply");

        let port = Arc::clone(&self.port);
        let events = self.events.clone();
        let armed = Arc::clone(&self.armed);

        tokio::spawn(async move {
            let event = match tokio::time::timeout(timeout, port.recv()).await {
                Ok(Ok(reply)) => ControlEvent::Reply(reply),
                Ok(Err(e)) => {
                    warn!("Control receive failed: {e}");
                    ControlEvent::TransportError(e.to_string())
                }
                Err(_) => {
                    warn!(?timeout, "Control reply timed out");
                    ControlEvent::ReplyTimeout
                }
            };

            // Disarm before reporting so the handler may re-arm
            armed.store(false, Ordering::Release);

            if events.send(event).is_err() {
                debug!("Dropping control event, sink closed");
            }
        });

        Ok(())
    }

    async fn write(&self, data: Bytes) -> Result<()> {
        assert!(
            self.armed.load(Ordering::Acquire),
            "control channel written without an armed receive - arm it first or the reply is lost"
        );

        self.port.send(&data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;

    struct FakePort {
        incoming: Mutex<mpsc::UnboundedReceiver<io::Result<BytesMut>>>,
        sent: StdMutex<Vec<Vec<u8>>>,
    }

    fn fake_port() -> (Arc<FakePort>, mpsc::UnboundedSender<io::Result<BytesMut>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let port = Arc::new(FakePort {
            incoming: Mutex::new(rx),
            sent: StdMutex::new(Vec::new()),
        });
        (port, tx)
    }

    #[async_trait]
    impl DatagramPort for FakePort {
        async fn send(&self, data: &[u8]) -> Result<()> {
            self.sent.lock().unwrap().push(data.to_vec());
            Ok(())
        }

        async fn recv(&self) -> Result<BytesMut> {
            match self.incoming.lock().await.recv().await {
                Some(result) => result.map_err(Error::from),
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test]
    async fn test_reply_is_reported_once() {
        let (port, datagrams) = fake_port();
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let channel = UdpControlChannel::new(port, events_tx);

        channel.start_async_receiving(Duration::from_secs(1)).unwrap();
        datagrams.send(Ok(BytesMut::from(&b"reply"[..]))).unwrap();

        match events_rx.recv().await.unwrap() {
            ControlEvent::Reply(buf) => assert_eq!(&buf[..], b"reply"),
            other => panic!("expected reply, got {other:?}"),
        }

        // Channel is disarmed again and can track the next request
        channel.start_async_receiving(Duration::from_secs(1)).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported() {
        let (port, _datagrams) = fake_port();
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let channel = UdpControlChannel::new(port, events_tx);

        channel.start_async_receiving(Duration::from_millis(100)).unwrap();

        assert!(matches!(
            events_rx.recv().await.unwrap(),
            ControlEvent::ReplyTimeout
        ));
    }

    #[tokio::test]
    async fn test_double_arm_is_rejected() {
        let (port, _datagrams) = fake_port();
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let channel = UdpControlChannel::new(port, events_tx);

        channel.start_async_receiving(Duration::from_secs(1)).unwrap();
        assert!(matches!(
            channel.start_async_receiving(Duration::from_secs(1)),
            Err(Error::ReceiveAlreadyArmed)
        ));
    }

    #[tokio::test]
    async fn test_write_sends_one_datagram() {
        let (port, _datagrams) = fake_port();
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let channel = UdpControlChannel::new(Arc::clone(&port), events_tx);

        channel.start_async_receiving(Duration::from_secs(1)).unwrap();
        channel.write(Bytes::from_static(b"request")).await.unwrap();

        let sent = port.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[b"request".to_vec()]);
    }

    #[tokio::test]
    #[should_panic(expected = "without an armed receive")]
    async fn test_write_unarmed_is_a_programmer_error() {
        let (port, _datagrams) = fake_port();
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let channel = UdpControlChannel::new(port, events_tx);

        let _ = channel.write(Bytes::from_static(b"request")).await;
    }

    #[tokio::test]
    async fn test_receive_error_is_surfaced() {
        let (port, datagrams) = fake_port();
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let channel = UdpControlChannel::new(port, events_tx);

        channel.start_async_receiving(Duration::from_secs(1)).unwrap();
        datagrams
            .send(Err(io::Error::new(io::ErrorKind::Other, "socket gone")))
            .unwrap();

        match events_rx.recv().await.unwrap() {
            ControlEvent::TransportError(msg) => assert!(msg.contains("socket gone")),
            other => panic!("expected transport error, got {other:?}"),
        }

        // A failed window still disarms the channel
        channel.start_async_receiving(Duration::from_secs(1)).unwrap();
    }
}
