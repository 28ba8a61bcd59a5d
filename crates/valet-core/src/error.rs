use thiserror::Error;

/// Top-level error type for Valet.
#[derive(Debug, Error)]
pub enum ValetError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Reminder storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Error from a notification sink.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
