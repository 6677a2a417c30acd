//! # safescan-core
//!
//! Core protocol implementation for the safety laser scanner.
//!
//! This crate provides the low-level protocol primitives:
//! - Wire messages (start/stop requests, monitoring frames)
//! - Request checksum calculation
//! - Scanner configuration
//! - Session state machine
//! - Protocol constants

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod monitoring_frame;
pub mod start_request;
pub mod state;
pub mod stop_request;

pub use config::ScannerConfiguration;
pub use error::{Error, Result};
pub use monitoring_frame::MonitoringFrame;
pub use start_request::StartRequest;
pub use state::{SessionEvent, SessionState};
pub use stop_request::StopRequest;
