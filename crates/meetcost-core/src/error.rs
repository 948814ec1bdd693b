//! Error types for meetcost.

use thiserror::Error;

use crate::session::TransitionError;

/// A shared error type for the whole meetcost workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum MeetcostError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input rejected before it reached the session
    #[error("Validation error: {0}")]
    Validation(String),

    /// A topic action whose precondition does not hold
    #[error("Transition rejected: {0}")]
    Transition(#[from] TransitionError),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MeetcostError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a rejected topic transition
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MeetcostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MeetcostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MeetcostError>`.
pub type Result<T> = std::result::Result<T, MeetcostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_converts() {
        let err: MeetcostError = TransitionError::MeetingEnded.into();
        assert!(err.is_transition());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_io_error_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: MeetcostError = io.into();
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: MeetcostError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }
}
