//! Bearer-token authorization for Twitter/X API requests.
//!
//! Both endpoints this tool calls accept OAuth 2.0 app-only Bearer Token
//! authentication. How the token is obtained is outside this crate.

use reqwest::RequestBuilder;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("replytally/", env!("CARGO_PKG_VERSION"));

/// Builds the Authorization header for OAuth 2.0 Bearer Token authentication.
///
/// # Format
///
/// ```text
/// Bearer YOUR_BEARER_TOKEN_HERE
/// ```
///
/// # Example
///
/// ```rust
/// use replytally::build_bearer_auth_header;
///
/// let header = build_bearer_auth_header("your_bearer_token");
/// assert_eq!(header, "Bearer your_bearer_token");
/// ```
pub fn build_bearer_auth_header(bearer_token: &str) -> String {
    format!("Bearer {}", bearer_token)
}

/// Attaches the Authorization and User-Agent headers to a request.
pub(crate) fn authorize(request_builder: RequestBuilder, bearer_token: &str) -> RequestBuilder {
    request_builder
        .header("Authorization", build_bearer_auth_header(bearer_token))
        .header("User-Agent", USER_AGENT)
}
