//! Protocol constants

use std::time::Duration;

/// Opcode of the start request
pub const OP_START: u32 = 0x35;

/// Opcode of the stop request
pub const OP_STOP: u32 = 0x36;

/// UDP port the device listens on for control requests
pub const DEVICE_CONTROL_PORT: u16 = 3000;

/// UDP port the device streams monitoring frames from
pub const DEVICE_DATA_PORT: u16 = 2000;

/// Default timeout for a control reply
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(1);

/// Maximum datagram size accepted from the device
pub const MAX_DATAGRAM_SIZE: usize = 4096;
