//! Error types for the objmap core library
//!
//! This module defines the error handling system for objmap, using thiserror
//! for ergonomic error definitions and anyhow for flexible error contexts in
//! host-supplied mapping functions.
//!
//! Only configuration problems and top-level dispatch failures surface as
//! errors. Per-member conversion failures inside the auto-mapping engine are
//! never reported here; they leave the member at its default.

use thiserror::Error;

/// Main error type for objmap operations
#[derive(Error, Debug)]
pub enum Error {
    /// No definition is registered for the requested type pair
    #[error("No mapping registered from {source_type} to {target_type}")]
    UnregisteredMapping {
        source_type: String,
        target_type: String,
    },

    /// The auto-mapping engine could not create the target instance
    #[error("Cannot construct {target_type} while mapping from {source_type}: no default constructor registered")]
    Construction {
        source_type: String,
        target_type: String,
    },

    /// Builder misuse, raised at configuration time
    #[error("Invalid mapping configuration for {source_type} -> {target_type}: {message}")]
    InvalidConfiguration {
        source_type: String,
        target_type: String,
        message: String,
    },

    /// A reverse definition was requested from a one-way definition
    #[error("No reverse mapping configured for {source_type} -> {target_type}")]
    ReverseNotConfigured {
        source_type: String,
        target_type: String,
    },

    /// Write attempted on the shared frozen context
    #[error("Mapping context is frozen, cannot set '{key}'")]
    ContextFrozen { key: String },

    /// A dynamic value did not have the runtime type a typed function expected
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// JSON serialization errors from context values
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Errors raised by host mapping functions
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was raised while configuring rather than mapping
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfiguration { .. } | Error::ReverseNotConfigured { .. }
        )
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
