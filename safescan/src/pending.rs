//! One-shot completion handles for start/stop operations

use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// Handle for an in-flight start or stop request
///
/// Resolves exactly once, when the matching control reply is observed.
/// There is no cancellation: an unresolved handle stays unresolved
/// until its reply arrives, however late. The handle may be awaited
/// from a different task than the one that created it.
#[derive(Debug)]
pub struct PendingOperation {
    rx: oneshot::Receiver<()>,
}

impl PendingOperation {
    pub(crate) fn new(rx: oneshot::Receiver<()>) -> Self {
        Self { rx }
    }

    /// Wait until the operation resolves
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationAbandoned`] when the session
    /// controller was dropped before the reply arrived.
    pub async fn wait(self) -> Result<()> {
        self.rx.await.map_err(|_| Error::OperationAbandoned)
    }

    /// Non-blocking probe: has the operation resolved yet?
    pub fn try_ready(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_once() {
        let (tx, rx) = oneshot::channel();
        let mut pending = PendingOperation::new(rx);

        assert!(!pending.try_ready());
        tx.send(()).unwrap();
        assert!(pending.try_ready());
    }

    #[tokio::test]
    async fn test_wait_resolves_from_another_task() {
        let (tx, rx) = oneshot::channel();
        let pending = PendingOperation::new(rx);

        tokio::spawn(async move {
            tx.send(()).unwrap();
        });

        pending.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_abandoned_handle() {
        let (tx, rx) = oneshot::channel::<()>();
        let pending = PendingOperation::new(rx);
        drop(tx);

        assert!(matches!(pending.wait().await, Err(Error::OperationAbandoned)));
    }
}
