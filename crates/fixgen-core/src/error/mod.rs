//! Error types and result aliases for fixgen operations.
//!
//! Provides a unified error type covering configuration, fixture data,
//! file output and the external upload step.

use crate::types::VersionError;
use thiserror::Error;

/// Unified error type for all fixgen operations
#[derive(Error, Debug)]
pub enum FixtureError {
    // Config errors
    #[error("Failed to parse fixgen.toml: {message}")]
    TomlParse { message: String },

    #[error("Failed to parse repodata: {message}")]
    JsonParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Fixture data errors
    #[error("Invalid dependency constraint: '{input}'")]
    InvalidDependency { input: String },

    #[error(transparent)]
    InvalidVersion(#[from] VersionError),

    #[error("{path} failed {count} consistency checks")]
    InconsistentRepodata { path: String, count: usize },

    // Upload errors
    #[error("Upload of project '{project}' failed: {reason}")]
    UploadFailed {
        project: String,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for fixgen operations
pub type FixResult<T> = Result<T, FixtureError>;

impl FixtureError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a config validation error
    pub fn config(field: &str, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Filesystem errors while laying out a single project do not stop a
    /// scaffolding run; everything else aborts it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FixtureError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            FixtureError::TomlParse { .. } | FixtureError::ConfigValidation { .. } => {
                Some("Check fixgen.toml or pass --config with a valid file")
            }
            FixtureError::InvalidDependency { .. } => {
                Some("Dependencies look like 'name' or 'name <op> version', e.g. 'bar <2.0'")
            }
            FixtureError::UploadFailed { .. } => Some(
                "Make sure a 'local' index is configured in ~/.pypirc, or rerun with --no-upload",
            ),
            FixtureError::JsonParse { .. } | FixtureError::InconsistentRepodata { .. } => {
                Some("Regenerate the file with 'fixgen repodata' and check it again")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_recoverable() {
        let err = FixtureError::io(
            "Failed to create foo_v1".to_string(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "IO error: Failed to create foo_v1");
    }

    #[test]
    fn test_upload_failure_is_fatal() {
        let err = FixtureError::UploadFailed {
            project: "foo_v1".to_string(),
            reason: "exit status 1".to_string(),
            source: None,
        };
        assert!(!err.is_recoverable());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_config_helper() {
        let err = FixtureError::config("repodata.subdir", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration field 'repodata.subdir' is invalid: must not be empty"
        );
    }
}
