//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the logical API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-success status code.
    #[error("API error ({status}): {}", .errors.join("; "))]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Messages from the `errors` array, or the raw body.
        errors: Vec<String>,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client could not be built from its configuration.
    #[error("client configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the server reported that the path does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
