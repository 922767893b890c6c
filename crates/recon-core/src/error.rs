//! Error types for reconciliation operations.
//!
//! Whole-document problems fail fast with a descriptive error; per-record
//! problems are skipped and counted in [`crate::model::Diagnostics`]
//! instead of surfacing here.

use thiserror::Error;

/// Result type alias for reconciliation operations.
pub type ReconResult<T> = Result<T, ReconError>;

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePlane {
    /// The IS-IS link-state database document.
    Isis,
    /// The data-plane telemetry snapshot document.
    Telemetry,
}

impl SourcePlane {
    /// Human-readable source name.
    pub fn name(&self) -> &'static str {
        match self {
            SourcePlane::Isis => "isis",
            SourcePlane::Telemetry => "telemetry",
        }
    }
}

/// Errors that can occur during reconciliation.
#[derive(Debug, Error)]
pub enum ReconError {
    /// Structurally invalid input document (missing/invalid top-level field).
    #[error("invalid {} document: field '{field}': {message}", source_plane.name())]
    InvalidDocument {
        /// The document the error refers to.
        source_plane: SourcePlane,
        /// The missing or invalid field.
        field: String,
        /// Error message.
        message: String,
    },

    /// The document could not be interpreted as a whole.
    #[error("{} extraction failed: {message}", source_plane.name())]
    Extraction {
        /// The document the error refers to.
        source_plane: SourcePlane,
        /// Error message.
        message: String,
    },

    /// Configuration option validation error.
    #[error("invalid configuration for {option}: {message}")]
    Config {
        /// The option that failed validation.
        option: String,
        /// Error message.
        message: String,
    },

    /// Session cache operation failed.
    #[error("cache operation failed: {operation}: {message}")]
    Cache {
        /// The operation that failed (e.g. "store", "fetch").
        operation: String,
        /// Error message.
        message: String,
    },

    /// Internal error (unexpected state).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ReconError {
    /// Creates an invalid document error.
    pub fn invalid_document(
        source_plane: SourcePlane,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidDocument {
            source_plane,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an extraction error.
    pub fn extraction(source_plane: SourcePlane, message: impl Into<String>) -> Self {
        Self::Extraction {
            source_plane,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Creates a cache error.
    pub fn cache(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Cache {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_document_display() {
        let err = ReconError::invalid_document(SourcePlane::Isis, "vrfs", "expected an object");
        assert_eq!(
            err.to_string(),
            "invalid isis document: field 'vrfs': expected an object"
        );
    }

    #[test]
    fn test_extraction_display() {
        let err = ReconError::extraction(SourcePlane::Telemetry, "worker task aborted");
        assert_eq!(
            err.to_string(),
            "telemetry extraction failed: worker task aborted"
        );
    }

    #[test]
    fn test_config_display() {
        let err = ReconError::config("driftThresholdMs", "must be a non-negative number");
        assert!(err.to_string().contains("driftThresholdMs"));
    }

    #[test]
    fn test_source_plane_names() {
        assert_eq!(SourcePlane::Isis.name(), "isis");
        assert_eq!(SourcePlane::Telemetry.name(), "telemetry");
    }
}
