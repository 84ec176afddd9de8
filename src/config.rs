//! Configuration module for the replytally tool.
//!
//! This module contains the configuration structure built from environment
//! variables, plus the validation helpers the command-line front end applies
//! to user-supplied values before a run starts.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use regex::Regex;
use std::env;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::ReplyError;

/// Default Twitter/X API v2 base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.x.com/2";
/// Default fixed delay between search pages, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
/// Default per-request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

static TWEET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,19}$").expect("tweet ID pattern is valid"));

/// Configuration for talking to the Twitter/X API.
///
/// Constructed once at startup and passed by reference into
/// [`crate::twitter::TwitterClient`]. Nothing in the crate reads credentials
/// from the environment after this value exists. The `Debug` output masks
/// the bearer token.
#[derive(Clone)]
pub struct TwitterConfig {
    /// App-only bearer token used for both the search and lookup endpoints
    pub bearer_token: String,
    /// API base URL without a trailing slash
    pub api_base_url: String,
    /// Fixed pause between consecutive search pages
    pub page_delay: Duration,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
}

impl fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("bearer_token", &mask_token(&self.bearer_token))
            .field("api_base_url", &self.api_base_url)
            .field("page_delay", &self.page_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Masks a credential for logging, keeping at most the first and last 8 characters.
pub(crate) fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let prefix: String = chars.iter().take(8).collect();
    if chars.len() > 16 {
        let suffix: String = chars[chars.len() - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else if chars.len() > 8 {
        format!("{}...", prefix)
    } else {
        "...".to_string()
    }
}

/// Reads an optional numeric environment variable, falling back to `default` when unset.
fn read_u64_var(name: &str, default: u64) -> Result<u64, ReplyError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
            error!("Invalid value for {}: '{}' ({})", name, raw, e);
            ReplyError::Config(format!("{} must be a non-negative integer: {}", name, e))
        }),
        Err(_) => {
            debug!("{} not set, using default {}", name, default);
            Ok(default)
        }
    }
}

/// Validates an API base URL and strips any trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, ReplyError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ReplyError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(ReplyError::Config(format!(
            "API base URL must use http or https, got '{}'",
            other
        ))),
    }
}

impl TwitterConfig {
    /// Creates a configuration with the given token and default tunables.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        TwitterConfig {
            bearer_token: bearer_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Creates a new `TwitterConfig` by loading values from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `TWITTER_BEARER_TOKEN`: App-only bearer token for the API v2 endpoints
    ///
    /// # Optional Environment Variables
    ///
    /// - `REPLYTALLY_API_BASE_URL`: API base URL (defaults to `https://api.x.com/2`)
    /// - `REPLYTALLY_PAGE_DELAY_MS`: Delay between search pages (defaults to 1000)
    /// - `REPLYTALLY_REQUEST_TIMEOUT_SECS`: Per-request timeout (defaults to 30)
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If the token is present and every optional value parses
    /// - `Err(ReplyError::Config)`: If the token is missing or empty, or a value is malformed
    pub fn from_env() -> Result<Self, ReplyError> {
        info!("Loading Twitter configuration from environment variables");

        let bearer_token = match env::var("TWITTER_BEARER_TOKEN") {
            Ok(token) => {
                info!(
                    "Found TWITTER_BEARER_TOKEN environment variable with length: {}",
                    token.len()
                );
                debug!("Bearer token (masked): {}", mask_token(&token));

                if token.trim().is_empty() {
                    error!("Bearer token is empty");
                    return Err(ReplyError::Config(
                        "TWITTER_BEARER_TOKEN cannot be empty".to_string(),
                    ));
                }
                if token.len() < 10 {
                    warn!(
                        "Bearer token seems unusually short ({} characters)",
                        token.len()
                    );
                }
                token
            }
            Err(e) => {
                error!("Failed to load TWITTER_BEARER_TOKEN from environment: {}", e);
                return Err(ReplyError::Config(format!(
                    "Missing TWITTER_BEARER_TOKEN environment variable: {}",
                    e
                )));
            }
        };

        let api_base_url = match env::var("REPLYTALLY_API_BASE_URL") {
            Ok(raw) => {
                info!("Using API base URL override: {}", raw);
                normalize_base_url(&raw)?
            }
            Err(_) => DEFAULT_API_BASE_URL.to_string(),
        };

        let page_delay = Duration::from_millis(read_u64_var(
            "REPLYTALLY_PAGE_DELAY_MS",
            DEFAULT_PAGE_DELAY_MS,
        )?);
        let request_timeout = Duration::from_secs(read_u64_var(
            "REPLYTALLY_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        if request_timeout.is_zero() {
            return Err(ReplyError::Config(
                "REPLYTALLY_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        info!(
            "Twitter configuration loaded (page delay {:?}, request timeout {:?})",
            page_delay, request_timeout
        );

        Ok(TwitterConfig {
            bearer_token,
            api_base_url,
            page_delay,
            request_timeout,
        })
    }
}

/// Checks that a tweet ID is a plain decimal snowflake.
pub fn validate_tweet_id(tweet_id: &str) -> Result<(), ReplyError> {
    if TWEET_ID_RE.is_match(tweet_id) {
        Ok(())
    } else {
        Err(ReplyError::Config(format!(
            "Tweet ID must be 1-19 digits, got '{}'",
            tweet_id
        )))
    }
}

/// Parses an ISO-8601 / RFC 3339 timestamp such as `2021-12-04T01:30:00Z`.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ReplyError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ReplyError::Config(format!(
                "Invalid timestamp '{}' (expected YYYY-MM-DDTHH:mm:ssZ): {}",
                raw, e
            ))
        })
}

/// Ensures the start bound precedes the end bound when both are present.
pub fn validate_time_window(
    start: Option<&DateTime<Utc>>,
    end: Option<&DateTime<Utc>>,
) -> Result<(), ReplyError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(ReplyError::Config(format!(
                "Start time {} must be before end time {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
    }
    Ok(())
}
