//! Core Twitter API utilities.
//!
//! This module contains the HTTP client wrapper shared by the search and
//! lookup endpoints. Every call is a single authenticated round-trip: there
//! are no retries and no token refresh, and any non-success status becomes a
//! [`ReplyError`] for the caller to propagate.

use log::{debug, error, info};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::TwitterConfig;
use crate::error::ReplyError;
use crate::oauth::authorize;

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in bytes before truncation
///
/// # Returns
///
/// A single-line string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.len() > max_len {
        let mut cut = max_len;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... [truncated, {} total bytes]",
            &sanitized[..cut],
            text.len()
        )
    } else {
        sanitized
    }
}

/// Authenticated client for the Twitter/X API v2.
///
/// Borrows the run's [`TwitterConfig`]; the underlying `reqwest::Client` is
/// built with the configured per-request timeout so a stalled call fails with
/// [`ReplyError::Http`] instead of hanging the run.
#[derive(Debug, Clone)]
pub struct TwitterClient<'a> {
    http: Client,
    config: &'a TwitterConfig,
}

impl<'a> TwitterClient<'a> {
    pub fn new(config: &'a TwitterConfig) -> Result<Self, ReplyError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(TwitterClient { http, config })
    }

    /// Joins an endpoint path onto the configured base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    /// Sends a GET request with query parameters and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        operation_name: &str,
    ) -> Result<T, ReplyError> {
        let url = self.endpoint_url(path);
        debug!("Request URL for '{}': {}", operation_name, url);
        debug!("Request headers: Authorization: Bearer [REDACTED]");

        let request_builder =
            authorize(self.http.get(&url), &self.config.bearer_token).query(params);
        let response_text = send_authenticated(request_builder, operation_name).await?;
        Ok(serde_json::from_str(&response_text)?)
    }
}

/// Makes one authenticated request and returns the body on a 2xx status.
///
/// # Parameters
///
/// - `request_builder`: A configured request carrying the Authorization header
/// - `operation_name`: Human-readable name for the operation (for logging)
///
/// # Returns
///
/// - `Ok(String)`: The response body on success
/// - `Err(ReplyError::Auth)`: On 401 or 403
/// - `Err(ReplyError::Request)`: On any other non-success status, with status and raw body
/// - `Err(ReplyError::Http)`: On transport failure or timeout
pub(crate) async fn send_authenticated(
    request_builder: RequestBuilder,
    operation_name: &str,
) -> Result<String, ReplyError> {
    info!(
        "Making authenticated request for operation: {}",
        operation_name
    );

    let response = request_builder.send().await?;
    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    let response_text = response.text().await?;
    if status.is_success() {
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            response_text.len()
        );
        return Ok(response_text);
    }

    error!("Operation '{}' failed - Status: {}", operation_name, status);
    debug!(
        "Error response for '{}': {}",
        operation_name,
        sanitize_for_logging(&response_text, 200)
    );
    Err(ReplyError::from_status(status.as_u16(), response_text))
}
