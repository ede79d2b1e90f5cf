//! Error types for Capsule core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages and process exit codes.

use thiserror::Error;

/// Result type alias for Capsule operations.
pub type Result<T> = std::result::Result<T, CapsuleError>;

/// Core error type for Capsule operations.
#[derive(Debug, Error)]
pub enum CapsuleError {
    /// Registration attempted with a username that already exists
    #[error("Username \"{0}\" is already taken")]
    UsernameTaken(String),

    /// Entry operation targeted a username absent from the account store
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// An operation required a signed-in identity and none was set
    #[error("No user is signed in")]
    SessionRequired,

    /// Media upload rejected (extension outside the allow-list)
    #[error("Unsupported media file: {0}")]
    InvalidMedia(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for CapsuleError {
    fn from(err: std::io::Error) -> Self {
        CapsuleError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CapsuleError {
    fn from(err: serde_json::Error) -> Self {
        CapsuleError::Storage(err.to_string())
    }
}
