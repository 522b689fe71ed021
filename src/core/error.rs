//! Unified error handling for reqflow
//!
//! This module provides a centralized error type system that eliminates
//! the need for modules to depend on each other for error handling.
//!
//! Note that a completed call that *failed* (bad status code, embedded
//! business error) is not a `ClientError`; those outcomes are modeled by
//! [`crate::outcome`]. `ClientError` covers setup-time problems such as
//! configuration loading and endpoint registration.

use std::fmt;

/// Unified error types for the orchestration layer
#[derive(Debug)]
pub enum ClientError {
    /// Configuration-related errors
    Configuration(String),

    /// File and I/O errors
    Io(std::io::Error),

    /// Endpoint registration/validation errors
    Registration(String),

    /// Serialization/deserialization errors
    Serialization(String),

    /// Internal system errors
    Internal(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            ClientError::Io(err) => write!(f, "I/O error: {err}"),
            ClientError::Registration(msg) => write!(f, "Endpoint registration failed: {msg}"),
            ClientError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            ClientError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Io(err) => Some(err),
            _ => None,
        }
    }
}

// Error conversions
impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err)
    }
}

impl From<serde_yaml::Error> for ClientError {
    fn from(err: serde_yaml::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

/// Result type alias for orchestration setup operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn with_context(self, context: &str) -> ClientResult<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: fmt::Display,
{
    fn with_context(self, context: &str) -> ClientResult<T> {
        self.map_err(|e| ClientError::Internal(format!("{context}: {e}")))
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::ClientError::Configuration($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::ClientError::Configuration(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! registration_error {
    ($msg:expr) => {
        $crate::core::error::ClientError::Registration($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::ClientError::Registration(format!($fmt, $($arg)*))
    };
}
