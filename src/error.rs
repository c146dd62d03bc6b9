//! Error types and handling for the `Peakcision` engine

use thiserror::Error;

use crate::catalog::CatalogError;

/// Main error type for the `Peakcision` application
#[derive(Error, Debug)]
pub enum PeakcisionError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Catalog loading errors
    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Preference store errors
    #[error("Preferences error: {message}")]
    Preferences { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PeakcisionError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new preferences error
    pub fn preferences<S: Into<String>>(message: S) -> Self {
        Self::Preferences {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PeakcisionError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            PeakcisionError::Catalog { .. } => {
                "Unable to load the catalog. Please check your connection or catalog URL."
                    .to_string()
            }
            PeakcisionError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PeakcisionError::Preferences { .. } => {
                "Preferences could not be saved. You may need to reset them.".to_string()
            }
            PeakcisionError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
