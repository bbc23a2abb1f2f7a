//! Error types for the row store client

use thiserror::Error;

/// Result type alias for row store calls
pub type Result<T> = std::result::Result<T, RowClientError>;

#[derive(Error, Debug)]
pub enum RowClientError {
    /// The configured base URL does not parse
    #[error("Invalid row store url: {url}")]
    InvalidUrl { url: String },

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Request failed: {message}")]
    Request { message: String },

    /// The store answered with an error status
    #[error("Row store answered HTTP {code}")]
    Status { code: u16 },

    /// The body was not the JSON we expected
    #[error("Could not parse row store response: {message}")]
    Parse { message: String },
}

impl From<reqwest::Error> for RowClientError {
    fn from(err: reqwest::Error) -> Self {
        RowClientError::Request {
            message: err.to_string(),
        }
    }
}
