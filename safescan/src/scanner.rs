//! Scanner session controller
//!
//! The controller orchestrates the two channels: it issues start/stop
//! handshakes, owns the single session state value, gates incoming
//! monitoring frames against that state and delivers accepted frames
//! to the user callback as laser scans.
//!
//! The channels never mutate session state. They emit events and
//! frames; [`Scanner::handle_control_event`] and
//! [`Scanner::handle_frame`] are the only places transitions are
//! applied, both under the one state mutex.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use safescan_core::{
    MonitoringFrame, ScannerConfiguration, SessionEvent, SessionState, StartRequest, StopRequest,
};
use safescan_transport::{ControlChannel, ControlEvent, DataChannel};
use safescan_types::LaserScan;

use crate::error::{Error, Result};
use crate::pending::PendingOperation;

/// Callback invoked synchronously for every accepted scan
pub type LaserScanCallback = Box<dyn Fn(LaserScan) + Send + Sync>;

/// The session controller
///
/// Generic over the channel contracts so the protocol logic can be
/// exercised against mock channels. Construct via [`Scanner::builder`].
pub struct Scanner<C: ControlChannel, D: DataChannel> {
    config: ScannerConfiguration,
    callback: LaserScanCallback,
    control: C,
    data: D,
    state: Mutex<SessionState>,
    sequence: AtomicU32,
    start_retries_left: AtomicU32,
    pending_start: Mutex<Option<oneshot::Sender<()>>>,
    pending_stop: Mutex<Option<oneshot::Sender<()>>>,
}

/// Builder for [`Scanner`]
///
/// A scan callback must be registered before [`build`](Self::build);
/// building without one fails, checked once at construction.
pub struct ScannerBuilder<C: ControlChannel, D: DataChannel> {
    config: ScannerConfiguration,
    control: C,
    data: D,
    callback: Option<LaserScanCallback>,
}

impl<C: ControlChannel, D: DataChannel> ScannerBuilder<C, D> {
    /// Register the callback receiving accepted scans
    pub fn on_scan(mut self, callback: impl Fn(LaserScan) + Send + Sync + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Build the controller
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingScanCallback`] when no callback was
    /// registered.
    pub fn build(self) -> Result<Scanner<C, D>> {
        let callback = self.callback.ok_or(Error::MissingScanCallback)?;

        Ok(Scanner {
            config: self.config,
            callback,
            control: self.control,
            data: self.data,
            state: Mutex::new(SessionState::Idle),
            sequence: AtomicU32::new(0),
            start_retries_left: AtomicU32::new(0),
            pending_start: Mutex::new(None),
            pending_stop: Mutex::new(None),
        })
    }
}

impl<C: ControlChannel, D: DataChannel> Scanner<C, D> {
    /// Start building a controller over the given channels
    pub fn builder(config: ScannerConfiguration, control: C, data: D) -> ScannerBuilder<C, D> {
        ScannerBuilder {
            config,
            control,
            data,
            callback: None,
        }
    }

    /// Current session state
    pub fn session_state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Ask the device to begin streaming
    ///
    /// Arms the control channel for the reply, arms the data channel
    /// (idempotent) so frames can arrive even before the reply lands,
    /// sends one start request with a fresh sequence number and
    /// transitions to awaiting the start reply. Frames arriving before
    /// the reply are discarded by gating, never queued.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::StartAlreadyPending`] while a previous
    /// start is unresolved.
    pub async fn start(&self) -> Result<PendingOperation> {
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending_start.lock();
            if pending.is_some() {
                return Err(Error::StartAlreadyPending);
            }
            *pending = Some(tx);
        }

        self.start_retries_left
            .store(self.config.start_retries(), Ordering::Release);

        if let Err(e) = self.send_start_request().await {
            *self.pending_start.lock() = None;
            return Err(e);
        }

        Ok(PendingOperation::new(rx))
    }

    /// Ask the device to cease streaming
    ///
    /// Frames arriving after this call are discarded even before the
    /// stop reply lands: the session has already left the operational
    /// state. The data channel stays open so straggling frames are
    /// observed and dropped rather than queued by the socket.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::StopAlreadyPending`] while a previous
    /// stop is unresolved.
    pub async fn stop(&self) -> Result<PendingOperation> {
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending_stop.lock();
            if pending.is_some() {
                return Err(Error::StopAlreadyPending);
            }
            *pending = Some(tx);
        }

        if let Err(e) = self.send_stop_request().await {
            *self.pending_stop.lock() = None;
            return Err(e);
        }

        Ok(PendingOperation::new(rx))
    }

    /// React to one control channel event
    pub async fn handle_control_event(&self, event: ControlEvent) {
        match event {
            ControlEvent::Reply(_reply) => self.handle_reply(),
            ControlEvent::ReplyTimeout => self.handle_reply_timeout().await,
            ControlEvent::TransportError(message) => {
                // Surfaced for observability only, the session state
                // and any pending operation are untouched
                warn!(message = %message, "Control transport error");
            }
        }
    }

    /// Gate one monitoring frame against the current session state
    ///
    /// Accepted non-empty frames become a [`LaserScan`] and are
    /// delivered synchronously from the calling context.
    pub fn handle_frame(&self, frame: MonitoringFrame) {
        let state = *self.state.lock();
        if !state.accepts_frames() {
            debug!(
                scan_counter = frame.scan_counter,
                %state,
                reason = "not_operational",
                "Discarding monitoring frame"
            );
            return;
        }

        if frame.measurements.is_empty() {
            // Accepted but carries nothing to report, distinct from a
            // rejection
            debug!(
                scan_counter = frame.scan_counter,
                reason = "empty_measurement_set",
                "Skipping callback for empty frame"
            );
            return;
        }

        let scan = frame.to_laser_scan(Utc::now());
        (self.callback)(scan);
    }

    async fn send_start_request(&self) -> Result<()> {
        self.control
            .start_async_receiving(self.config.reply_timeout())?;
        self.data.start_async_receiving()?;

        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel);
        let request = StartRequest::new(&self.config, sequence);

        self.transition(SessionEvent::UserRequestedStart);

        info!(sequence, "Sending start request");
        self.control.write(request.serialize().freeze()).await?;
        Ok(())
    }

    async fn send_stop_request(&self) -> Result<()> {
        self.control
            .start_async_receiving(self.config.reply_timeout())?;

        self.transition(SessionEvent::UserRequestedStop);

        info!("Sending stop request");
        self.control.write(StopRequest::new().serialize().freeze()).await?;
        Ok(())
    }

    fn handle_reply(&self) {
        enum Resolved {
            Start,
            Stop,
            None,
        }

        let resolved = {
            let mut state = self.state.lock();
            match *state {
                SessionState::AwaitingStartReply => {
                    *state = state.apply(SessionEvent::StartReplyReceived);
                    Resolved::Start
                }
                SessionState::AwaitingStopReply => {
                    *state = state.apply(SessionEvent::StopReplyReceived);
                    Resolved::Stop
                }
                current => {
                    // Duplicate or late reply, deliberately a no-op
                    debug!(state = %current, "Ignoring stray control reply");
                    Resolved::None
                }
            }
        };

        match resolved {
            Resolved::Start => {
                info!("Start reply received, session operational");
                Self::resolve(&self.pending_start, "start");
            }
            Resolved::Stop => {
                info!("Stop reply received, session idle");
                Self::resolve(&self.pending_stop, "stop");
            }
            Resolved::None => {}
        }
    }

    async fn handle_reply_timeout(&self) {
        let state = self.session_state();
        warn!(%state, "Control reply timed out");

        // The pending operation is not failed, a late reply may still
        // resolve it. Resend only under the configured start policy.
        if state != SessionState::AwaitingStartReply {
            return;
        }

        let retries_left = self.start_retries_left.load(Ordering::Acquire);
        if retries_left == 0 {
            return;
        }
        self.start_retries_left
            .store(retries_left - 1, Ordering::Release);

        if let Err(e) = self.resend_start_request().await {
            error!("Start request resend failed: {e}");
        }
    }

    async fn resend_start_request(&self) -> Result<()> {
        self.control
            .start_async_receiving(self.config.reply_timeout())?;

        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel);
        let request = StartRequest::new(&self.config, sequence);

        info!(sequence, "Resending start request after reply timeout");
        self.control.write(request.serialize().freeze()).await?;
        Ok(())
    }

    fn transition(&self, event: SessionEvent) {
        let mut state = self.state.lock();
        let next = state.apply(event);
        debug!(from = %*state, to = %next, ?event, "Session transition");
        *state = next;
    }

    fn resolve(pending: &Mutex<Option<oneshot::Sender<()>>>, what: &str) {
        if let Some(tx) = pending.lock().take() {
            if tx.send(()).is_err() {
                debug!("The {what} operation handle was dropped before resolution");
            }
        }
    }
}
