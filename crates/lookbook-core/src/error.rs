//! Error types for the Lookbook application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Lookbook application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LookbookError {
    /// A transport payload could not be turned into a valid session
    #[error("Malformed session payload: {message}")]
    MalformedSession { message: String },

    /// The remote session service could not be reached (network/timeout)
    #[error("Remote service unavailable: {message}")]
    RemoteUnavailable { message: String },

    /// The remote session service answered with a non-success status
    #[error("Remote service rejected the request ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An operation that requires a bound session was called without one
    #[error("No active session")]
    NoActiveSession,

    /// Session creation failed; wraps the underlying gateway error
    #[error("Session creation failed: {source}")]
    CreationFailed { source: Box<LookbookError> },

    /// Session update failed; wraps the underlying gateway error
    #[error("Session update failed: {source}")]
    UpdateFailed { source: Box<LookbookError> },

    /// Storage error (file system operations)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookbookError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MalformedSession error
    pub fn malformed_session(message: impl Into<String>) -> Self {
        Self::MalformedSession {
            message: message.into(),
        }
    }

    /// Creates a RemoteUnavailable error
    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            message: message.into(),
        }
    }

    /// Creates a RemoteRejected error
    pub fn remote_rejected(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Wraps a gateway error as a CreationFailed error
    pub fn creation_failed(source: LookbookError) -> Self {
        Self::CreationFailed {
            source: Box::new(source),
        }
    }

    /// Wraps a gateway error as an UpdateFailed error
    pub fn update_failed(source: LookbookError) -> Self {
        Self::UpdateFailed {
            source: Box::new(source),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MalformedSession error
    pub fn is_malformed_session(&self) -> bool {
        matches!(self, Self::MalformedSession { .. })
    }

    /// Check if this is a RemoteUnavailable error
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a NoActiveSession error
    pub fn is_no_active_session(&self) -> bool {
        matches!(self, Self::NoActiveSession)
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LookbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LookbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LookbookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for LookbookError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, LookbookError>`.
pub type Result<T> = std::result::Result<T, LookbookError>;
