//! Error types for the SIX scraping pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to SIX or reading its pages.
#[derive(Debug, Error, Clone)]
pub enum SixError {
    /// A required session cookie was not forwarded by the caller
    #[error("missing required cookie: {name}")]
    MissingSessionToken { name: &'static str },

    /// The request never produced a response (DNS, connect, timeout)
    #[error("Network error: {message}")]
    Transport { message: String },

    /// SIX answered with something other than 200 OK
    #[error("upstream returned {status}")]
    UpstreamStatus { status: StatusCode },

    /// The response body could not be read as a document
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The page loaded fine but the expected data was not in it
    #[error("{message}")]
    NotFound { message: String },
}

impl SixError {
    /// Returns true if the failure happened between us and SIX, as opposed to
    /// SIX returning a page that lacks what we were looking for.
    pub fn is_upstream_failure(&self) -> bool {
        !matches!(self, SixError::NotFound { .. })
    }
}

impl From<reqwest::Error> for SixError {
    fn from(err: reqwest::Error) -> Self {
        SixError::Transport {
            message: err.to_string(),
        }
    }
}
