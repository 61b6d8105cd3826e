//! Error types for tagrec operations

use thiserror::Error;

/// Result type alias for tagrec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tagrec
///
/// Per-line problems in the input log never surface here; they are reported
/// through the diagnostic sink and the line is skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while opening or reading an input, or writing an output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Interning tables could not be saved or loaded
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}
