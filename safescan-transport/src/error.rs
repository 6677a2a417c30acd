//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Receive already armed - a reply expectation is still outstanding")]
    ReceiveAlreadyArmed,

    #[error("Event sink closed - the session controller is gone")]
    SinkClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
