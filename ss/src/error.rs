//! Error taxonomy for the session core
//!
//! Classified errors only - nothing here is retried automatically. The
//! calling layer decides whether to retry or surface to the user.

use thiserror::Error;

/// Errors from session and store operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// No persisted record exists for the requested session id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// A persisted record failed shape validation during restore
    #[error("Malformed session record: {0}")]
    Malformed(String),

    /// A collaborator was given input that violates its contract
    #[error("Invalid collaborator input: {0}")]
    InvalidInput(String),

    /// A collaborator's result violates its contract shape
    #[error("Invalid collaborator response: {0}")]
    InvalidCollaboratorResponse(String),

    /// Underlying storage I/O failure (permissions, disk full, ...)
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result alias used across the session core
pub type SessionResult<T> = Result<T, SessionError>;
