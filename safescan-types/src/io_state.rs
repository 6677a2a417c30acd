//! I/O pin-state snapshots and their outward message form
//!
//! The scanner reports the state of its logical input and output pins
//! alongside measurement data. Downstream consumers receive them as a
//! timestamped [`IoStateMessage`]; the conversion is a stateless
//! field-by-field copy with a single validation rule on the timestamp.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// State of a single I/O pin as reported by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinState {
    /// Device-assigned pin identifier
    pub id: u32,

    /// Human-readable pin name
    pub name: String,

    /// Logical pin level
    pub state: bool,
}

impl PinState {
    pub fn new(id: u32, name: impl Into<String>, state: bool) -> Self {
        Self { id, name: name.into(), state }
    }
}

/// Snapshot of all logical input and output pins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoState {
    pub logical_input: Vec<PinState>,
    pub output: Vec<PinState>,
}

impl IoState {
    pub fn new(logical_input: Vec<PinState>, output: Vec<PinState>) -> Self {
        Self { logical_input, output }
    }
}

/// Pin state as carried in an outward message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinStateMessage {
    pub pin_id: u32,
    pub name: String,
    pub state: bool,
}

/// Outward message form of an I/O snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoStateMessage {
    /// Reference frame the snapshot belongs to
    pub frame_id: String,

    /// Capture time
    pub stamp: DateTime<Utc>,

    pub logical_input: Vec<PinStateMessage>,
    pub output: Vec<PinStateMessage>,
}

fn to_pin_state_message(pin: &PinState) -> PinStateMessage {
    PinStateMessage {
        pin_id: pin.id,
        name: pin.name.clone(),
        state: pin.state,
    }
}

/// Convert an I/O snapshot into its outward message form
///
/// `stamp_nanos` is the capture time in nanoseconds since the Unix
/// epoch. Pin order is preserved for both sequences.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] when `stamp_nanos` is negative,
/// regardless of the snapshot contents.
pub fn to_io_state_message(
    io_state: &IoState,
    frame_id: impl Into<String>,
    stamp_nanos: i64,
) -> Result<IoStateMessage> {
    if stamp_nanos < 0 {
        return Err(Error::InvalidTimestamp(stamp_nanos));
    }

    Ok(IoStateMessage {
        frame_id: frame_id.into(),
        stamp: DateTime::from_timestamp_nanos(stamp_nanos),
        logical_input: io_state.logical_input.iter().map(to_pin_state_message).collect(),
        output: io_state.output.iter().map(to_pin_state_message).collect(),
    })
}
