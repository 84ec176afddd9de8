//! Twitter/X API integration module.
//!
//! This module contains the client, wire types, conversation search and
//! tweet lookup used to gather a conversation's replies and its root author,
//! all authenticated with an OAuth 2.0 app-only Bearer Token.

mod api;
mod lookup;
mod models;
mod search;

#[cfg(test)]
pub(crate) mod fakes;
#[cfg(test)]
pub(crate) mod mock_api;

// Re-export public API
pub use api::TwitterClient;
pub use lookup::{parse_author, AuthorResolver};
pub use models::{
    AuthorInfo, LookupResponse, ReplyItem, SearchEndpoint, SearchPage, SearchQuery,
    SearchResponse,
};
pub use search::{collect_replies, Collected, Pacing, PageFetcher, ReplyCollection};
