//! Error types for the monitoring client.
//!
//! All fallible operations return `GlpResult<T>`. Form validation and
//! backend rejections are distinct variants so screens can tell a blocking
//! field prompt apart from a "try again" failure.

use thiserror::Error;

/// The unified error type for the client crates.
#[derive(Debug, Error)]
pub enum GlpError {
    /// The backend collaborator rejected a call.
    #[error("backend rejected {operation}: {reason}")]
    BackendRejected { operation: String, reason: String },

    /// The request never got a usable answer (connection, timeout, decoding).
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// The referenced entity does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    /// User input failed a synchronous check.
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// An operation was attempted from a state that does not allow it.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl GlpError {
    /// The generic message shown to the user when `action` failed.
    ///
    /// `action` is a verb phrase, e.g. "load your dashboard".
    pub fn user_message(&self, action: &str) -> String {
        match self {
            GlpError::Validation { reason } => reason.clone(),
            _ => format!("Failed to {action}. Please try again."),
        }
    }

    /// True for failures that came from the backend collaborator or the
    /// path to it, as opposed to local input or state errors.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            GlpError::BackendRejected { .. } | GlpError::Transport { .. } | GlpError::NotFound { .. }
        )
    }
}

/// Convenience alias used throughout the client crates.
pub type GlpResult<T> = Result<T, GlpError>;
