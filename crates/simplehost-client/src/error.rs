//! Error types for the provisioning API client.

use thiserror::Error;

/// Errors that can occur while talking to the provisioning API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote API reported that the instance does not exist.
    ///
    /// This is the structured not-found class the deletion poll keys on;
    /// transport failures and other API errors are kept separate so they
    /// are never mistaken for a confirmed absence.
    #[error("instance '{id}' not found")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The remote API rejected the request.
    #[error("remote API error (HTTP {status}): {message}")]
    Api {
        /// The HTTP status code returned.
        status: u16,
        /// The remote error message, when the body carried one.
        message: String,
    },

    /// The request never produced an API response.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API response body could not be decoded.
    #[error("failed to decode remote response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client was misconfigured.
    #[error("client configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `Api` error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error is a structured "instance does not exist" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
