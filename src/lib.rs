//! # Replytally Library
//!
//! Collects every reply in a Twitter/X conversation through the API v2 search
//! endpoints, keeps the direct replies to the root tweet's author, and counts
//! which other accounts those replies mention.
//!
//! ## Flow
//!
//! 1. [`twitter::collect_replies`] pages through `conversation_id:<tweet>`
//!    search results until the API stops returning a `next_token`, pausing
//!    a fixed delay between pages.
//! 2. [`twitter::AuthorResolver`] looks up the root tweet's author ID and handle.
//! 3. [`analysis::classify_replies`] keeps replies whose `in_reply_to_user_id`
//!    is the author and gathers their mention handles.
//! 4. [`analysis::count_mentions`] counts the handles, excluding the author's own.
//!
//! ## Configuration
//!
//! - `TWITTER_BEARER_TOKEN`: App-only bearer token (required)
//! - `REPLYTALLY_API_BASE_URL`: API base URL (defaults to `https://api.x.com/2`)
//! - `REPLYTALLY_PAGE_DELAY_MS`: Pause between search pages (defaults to 1000)
//! - `REPLYTALLY_REQUEST_TIMEOUT_SECS`: Per-request timeout (defaults to 30)

pub mod analysis;
pub mod config;
pub mod error;
pub mod oauth;
pub mod pipeline;
pub mod report;
pub mod twitter;

// Re-export commonly used types and functions
pub use analysis::{classify_replies, count_mentions, AggregationResult, ClassifiedReplies};
pub use config::TwitterConfig;
pub use error::ReplyError;
pub use oauth::build_bearer_auth_header;
pub use pipeline::{run, run_with_config, Report, RunOutcome};
pub use twitter::{
    collect_replies, AuthorInfo, AuthorResolver, Collected, Pacing, PageFetcher, ReplyItem,
    SearchEndpoint, SearchQuery, TwitterClient,
};
