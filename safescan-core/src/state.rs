//! Session state machine
//!
//! The session lifecycle is a four-state machine driven by user calls
//! and control replies. Transitions are pure; the controller owns the
//! single state value and is the only place [`SessionState::apply`] is
//! called with effect.
//!
//! Unlisted state/event pairs are deliberate no-ops: duplicate or late
//! replies must never corrupt the session, so a stray reply leaves the
//! state untouched instead of raising an error.

use std::fmt;

/// Session lifecycle state
///
/// Initial state is [`Idle`](SessionState::Idle); there is no terminal
/// state, `Idle` is re-entered after every completed stop handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No handshake in flight, no frames accepted
    Idle,

    /// Start request sent, waiting for the device to confirm
    AwaitingStartReply,

    /// Session established, monitoring frames are accepted
    Operational,

    /// Stop request sent, frames are discarded until confirmed
    AwaitingStopReply,
}

/// Events that drive the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    UserRequestedStart,
    StartReplyReceived,
    UserRequestedStop,
    StopReplyReceived,
}

impl SessionState {
    /// Apply an event, returning the next state
    ///
    /// Total and deterministic: every unlisted combination returns the
    /// current state unchanged.
    #[must_use]
    pub fn apply(self, event: SessionEvent) -> SessionState {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Idle, UserRequestedStart) => AwaitingStartReply,
            (AwaitingStartReply, StartReplyReceived) => Operational,
            (Operational, UserRequestedStop) => AwaitingStopReply,
            (AwaitingStopReply, StopReplyReceived) => Idle,
            (state, _) => state,
        }
    }

    /// Check whether monitoring frames are accepted in this state
    pub fn accepts_frames(self) -> bool {
        self == SessionState::Operational
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingStartReply => "awaiting_start_reply",
            SessionState::Operational => "operational",
            SessionState::AwaitingStopReply => "awaiting_stop_reply",
        };
        f.write_str(name)
    }
}
