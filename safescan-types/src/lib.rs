//! Type definitions for safescan

pub mod angle;
pub mod error;
pub mod io_state;
pub mod laser_scan;

pub use angle::{ScanRange, TenthOfDegree};
pub use error::{Error, Result};
pub use io_state::{IoState, IoStateMessage, PinState, PinStateMessage, to_io_state_message};
pub use laser_scan::{LaserScan, Measurement};
