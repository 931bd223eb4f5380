//! Error types for Cadence Desk
//!
//! Every failure in the desk funnels into [`DeskError`]: transport failures
//! raised by the REST client, form validation failures, configuration
//! problems and the odd IO or JSON error.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Cadence Desk
#[derive(Debug, Error)]
pub enum DeskError {
    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The request never produced a response (connection refused, DNS, ...)
    #[error("Request failed: {0}")]
    Request(String),

    /// A read returned a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A write returned anything other than 200
    #[error("Failed to {operation} (status {status})")]
    WriteFailed { operation: String, status: u16 },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single form field failed validation
    #[error("{field}: {message}")]
    FieldValidation { field: String, message: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read config '{path}': {message}")]
    ConfigRead { path: PathBuf, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    /// Create a request (network-level) error
    pub fn request(msg: impl Into<String>) -> Self {
        DeskError::Request(msg.into())
    }

    /// Create an API error for a failed read
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        DeskError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a write failure for a non-200 response
    pub fn write_failed(operation: impl Into<String>, status: u16) -> Self {
        DeskError::WriteFailed {
            operation: operation.into(),
            status,
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        DeskError::Decode(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DeskError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        DeskError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        DeskError::InvalidConfig(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DeskError::Internal(msg.into())
    }

    /// HTTP status carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            DeskError::Api { status, .. } | DeskError::WriteFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error came out of the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DeskError::Request(_)
                | DeskError::Api { .. }
                | DeskError::WriteFailed { .. }
                | DeskError::Decode(_)
        )
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DeskError::Validation(_) | DeskError::FieldValidation { .. }
        )
    }

    /// Whether the backend rejected the session (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the backend reported a missing resource (404)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type alias using DeskError
pub type DeskResult<T> = Result<T, DeskError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_api_error_carries_status() {
        let err = DeskError::api(404, "not found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "API error (404): not found");
    }

    #[test]
    fn test_write_failure_message() {
        let err = DeskError::write_failed("create call", 201);
        assert_eq!(err.status(), Some(201));
        assert_eq!(err.to_string(), "Failed to create call (status 201)");
    }

    #[test]
    fn test_request_error_has_no_status() {
        let err = DeskError::request("connection refused");
        assert_eq!(err.status(), None);
        assert!(err.is_transport());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_field_validation_error() {
        let err = DeskError::field("name", "Cadence name is required");
        assert!(err.is_validation());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "name: Cadence name is required");
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(DeskError::api(401, "expired").is_unauthorized());
        assert!(!DeskError::api(403, "forbidden").is_unauthorized());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DeskError = io_err.into();
        assert!(matches!(err, DeskError::Io(_)));
        assert_eq!(err.status(), None);
    }
}
