//! Error types for the siren crates.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for siren operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (unusable credential).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (non-2xx responses from the server).
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid URL or field value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential cannot be sent as an HTTP header.
    #[error("credential cannot be used as a header value")]
    MalformedCredential,
}

/// An error response from the API.
///
/// Carries the HTTP status plus the `message` and `errors` fields of the
/// server's error body, when the body could be parsed.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server.
    pub message: Option<String>,
    /// Per-field detail messages from the server.
    pub errors: Vec<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        if !self.errors.is_empty() {
            write!(f, " ({})", self.errors.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>, errors: Vec<String>) -> Self {
        Self {
            status,
            message,
            errors,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Unknown incident type name.
    #[error("unknown incident type '{value}'")]
    IncidentType { value: String },

    /// Unknown call status name.
    #[error("unknown call status '{value}'")]
    CallStatus { value: String },
}
