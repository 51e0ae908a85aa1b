//! Error types for the finance client
//!
//! Every remote call and store operation reports failures through [`AppError`].
//! The connection store converts these into its user-visible error slot, so
//! callers of the store rarely match on the variants directly.

use reqwest::StatusCode;
use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum AppError {
    /// Transport-level failure (connection refused, timeout, TLS, ...)
    Network(reqwest::Error),
    /// The backend answered with a non-success status
    Http {
        /// Status code returned by the backend
        status: StatusCode,
        /// Message taken from the response body, or the status line when the body is empty
        message: String,
    },
    /// Resolving the bearer credential into a user identifier failed
    Identity(String),
    /// JSON encoding or decoding failed
    Json(serde_json::Error),
    /// A response had an unexpected shape
    Deserialization(String),
    /// Caller supplied an invalid argument
    InvalidInput(String),
    /// Operation is not valid in the current state
    InvalidState(String),
    /// The store has been released and no longer accepts operations
    Released,
}

impl AppError {
    /// Returns the HTTP status attached to this error, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Wraps this error as an identity resolution failure
    ///
    /// Used by the `user/id` call so that every failure of the identity lookup,
    /// whatever its cause, is reported as the same category.
    #[must_use]
    pub fn into_identity(self) -> Self {
        match self {
            AppError::Identity(_) => self,
            other => AppError::Identity(other.to_string()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Http { status, message } => {
                write!(f, "http error {}: {message}", status.as_u16())
            }
            AppError::Identity(msg) => write!(f, "identity resolution failed: {msg}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            AppError::Released => write!(f, "store released"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}
