//! Error types for the eduranker-client crate.
//!
//! Messages are stable and meant to be shown to the user as-is when a
//! search fails. Question text never appears in an error message.

/// Errors that can occur while talking to the ranking backend or driving
/// a search session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, read as plain text.
        body: String,
    },

    /// A success response whose body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A vote targeted a position outside the current result list.
    #[error("no result at position {position} (have {len})")]
    InvalidPosition {
        /// Requested zero-based position.
        position: usize,
        /// Number of results currently held.
        len: usize,
    },

    /// The session task has stopped and no longer accepts commands.
    #[error("session closed")]
    SessionClosed,
}

/// Convenience type alias for eduranker-client results.
pub type Result<T> = std::result::Result<T, ClientError>;
