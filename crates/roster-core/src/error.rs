//! Error types for fetching user records.

use thiserror::Error;

/// Failure while retrieving the user list.
///
/// Its `Display` output is the message shown to the user when a fetch fails.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured endpoint is not a valid http(s) URL.
    #[error("Invalid users URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be sent or the body could not be read.
    #[error("Network Error: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// The body was not a JSON array of users.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(err)
        }
    }
}
