//! Error types for the eduranker front end.

use eduranker_client::ClientError;

/// Top-level error type for the terminal front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error (config file, terminal).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the search client.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
