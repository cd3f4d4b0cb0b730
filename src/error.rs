//! Error types for the encoder core

use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while producing a PNG byte stream
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied input the encoder can't represent. Always raised
    /// before anything is written for the call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The output sink failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
