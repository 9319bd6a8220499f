//! Error handling for texcite
//!
//! This module provides a unified error type and result type for the
//! citation operations. "No citation here" is never an error: lookups
//! return `Ok(None)` for that case.

use std::fmt;

/// Citation operation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiteError {
    /// The host does not provide a required macro-engine capability
    MissingCapability { capability: String },
    /// The user cancelled a prompt
    UserAbort,
    /// The command table or configuration is malformed
    InvalidConfig { message: String },
    /// IO error (for reading configuration or documents)
    IoError { message: String },
}

impl fmt::Display for CiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CiteError::MissingCapability { capability } => {
                write!(
                    f,
                    "Missing dependency: the host does not provide {}",
                    capability
                )
            }
            CiteError::UserAbort => write!(f, "Aborted by user"),
            CiteError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            CiteError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for CiteError {}

impl From<std::io::Error> for CiteError {
    fn from(err: std::io::Error) -> Self {
        CiteError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CiteError {
    fn from(err: toml::de::Error) -> Self {
        CiteError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

/// Result type for citation operations
pub type CiteResult<T> = Result<T, CiteError>;

// Convenience constructors for errors
impl CiteError {
    pub fn missing(capability: impl Into<String>) -> Self {
        CiteError::MissingCapability {
            capability: capability.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CiteError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error is a user cancellation rather than a fault
    pub fn is_abort(&self) -> bool {
        matches!(self, CiteError::UserAbort)
    }
}
