//! Error types for the replytally crate.
//!
//! Every failure aborts the whole run, so a single enum covers the API,
//! transport, JSON, I/O and configuration failure modes. The
//! "no replies" outcome is not an error and lives in
//! [`crate::twitter::Collected`] / [`crate::pipeline::RunOutcome`].

use thiserror::Error;

/// Errors surfaced by the page fetcher, author resolver and configuration layer.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The API rejected the bearer token (401 or 403).
    #[error("Twitter API authorization failed ({status}): {body}")]
    Auth { status: u16, body: String },

    /// Any other non-success response, rate limiting included.
    #[error("Twitter API request failed ({status}): {body}")]
    Request { status: u16, body: String },

    /// A well-formed response that lacks the expected author linkage.
    #[error("Expected data missing from Twitter API response: {0}")]
    NotFound(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReplyError {
    /// Short name of the error kind, used in user-facing failure reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyError::Auth { .. } => "AuthError",
            ReplyError::Request { .. } => "RequestError",
            ReplyError::NotFound(_) => "NotFoundError",
            ReplyError::Http(_) => "HttpError",
            ReplyError::Json(_) => "JsonError",
            ReplyError::Io(_) => "IoError",
            ReplyError::Config(_) => "ConfigError",
        }
    }

    /// Maps a non-success HTTP status and its body to the matching error kind.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ReplyError::Auth { status, body },
            _ => ReplyError::Request { status, body },
        }
    }
}
