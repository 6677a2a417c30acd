//! Error types for safescan-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Datagram is too short to carry a frame header
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// Declared measurement count does not match the datagram length
    #[error("Measurement count mismatch: header declares {declared} samples, datagram carries {available} bytes of sample data")]
    MeasurementCountMismatch {
        declared: usize,
        available: usize,
    },

    /// Invalid scanner configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Value type validation failed
    #[error(transparent)]
    Types(#[from] safescan_types::Error),
}

impl Error {
    /// Check if the error means a dropped frame rather than a broken session
    pub fn is_malformed_frame(&self) -> bool {
        matches!(
            self,
            Self::FrameTooShort { .. } | Self::MeasurementCountMismatch { .. }
        )
    }
}
