//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] safescan_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] safescan_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] safescan_types::Error),

    #[error("Invalid argument: a laser scan callback is required")]
    MissingScanCallback,

    #[error("A start operation is already pending")]
    StartAlreadyPending,

    #[error("A stop operation is already pending")]
    StopAlreadyPending,

    #[error("Operation handle abandoned - the session controller was dropped")]
    OperationAbandoned,
}
