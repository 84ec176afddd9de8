//! Data types for the search and tweet lookup endpoints.
//!
//! The `*Record` / `*Response` structs mirror only the JSON fields this tool
//! requests; everything else in the payload is ignored by serde.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::ReplyError;

/// Which search endpoint the pagination driver pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEndpoint {
    /// `GET /2/tweets/search/all` (full-archive, academic/pro access)
    #[default]
    FullArchive,
    /// `GET /2/tweets/search/recent` (last seven days)
    Recent,
}

impl SearchEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            SearchEndpoint::FullArchive => "/tweets/search/all",
            SearchEndpoint::Recent => "/tweets/search/recent",
        }
    }

    /// Largest `max_results` the endpoint accepts.
    pub fn max_page_size(self) -> u32 {
        match self {
            SearchEndpoint::FullArchive => 500,
            SearchEndpoint::Recent => 100,
        }
    }

    /// Clamps a requested page size into the endpoint's accepted range (10..=max).
    pub fn clamp_page_size(self, requested: u32) -> u32 {
        requested.clamp(10, self.max_page_size())
    }
}

/// Parameters for one search request.
///
/// Treated as immutable: the driver derives a fresh query for each page via
/// [`SearchQuery::with_next_token`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub conversation_id: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub max_results: u32,
    pub next_token: Option<String>,
    pub endpoint: SearchEndpoint,
}

/// Tweet fields requested from the search endpoint.
pub const SEARCH_TWEET_FIELDS: &str = "in_reply_to_user_id,author_id,conversation_id,entities";

impl SearchQuery {
    /// Creates a first-page query for a conversation using the endpoint's largest page size.
    pub fn new(conversation_id: impl Into<String>, endpoint: SearchEndpoint) -> Self {
        SearchQuery {
            conversation_id: conversation_id.into(),
            start_time: None,
            end_time: None,
            max_results: endpoint.max_page_size(),
            next_token: None,
            endpoint,
        }
    }

    pub fn with_time_window(
        mut self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = self.endpoint.clamp_page_size(max_results);
        self
    }

    /// Returns a copy of this query pointing at the page after `next_token`.
    pub fn with_next_token(&self, next_token: impl Into<String>) -> Self {
        SearchQuery {
            next_token: Some(next_token.into()),
            ..self.clone()
        }
    }

    /// The conversation-scoping search expression.
    pub fn query_string(&self) -> String {
        format!("conversation_id:{}", self.conversation_id)
    }

    /// Query-string parameters for the search request, in a stable order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query_string()),
            ("tweet.fields", SEARCH_TWEET_FIELDS.to_string()),
            ("max_results", self.max_results.to_string()),
        ];
        if let Some(start_time) = &self.start_time {
            params.push((
                "start_time",
                start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(end_time) = &self.end_time {
            params.push((
                "end_time",
                end_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(token) = &self.next_token {
            params.push(("next_token", token.clone()));
        }
        params
    }
}

/// One tweet from the conversation, reduced to the fields classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyItem {
    pub id: String,
    pub author_id: Option<String>,
    pub in_reply_to_user_id: Option<String>,
    pub conversation_id: Option<String>,
    /// Handles from `entities.mentions`, in payload order
    pub mentions: Vec<String>,
}

impl From<TweetRecord> for ReplyItem {
    fn from(record: TweetRecord) -> Self {
        let mentions = record
            .entities
            .map(|entities| {
                entities
                    .mentions
                    .into_iter()
                    .map(|mention| mention.username)
                    .collect()
            })
            .unwrap_or_default();

        ReplyItem {
            id: record.id,
            author_id: record.author_id,
            in_reply_to_user_id: record.in_reply_to_user_id,
            conversation_id: record.conversation_id,
            mentions,
        }
    }
}

/// The root tweet's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorInfo {
    pub id: String,
    pub username: String,
}

/// Items and continuation of one fetched search page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<ReplyItem>,
    pub next_token: Option<String>,
    pub result_count: usize,
}

impl TryFrom<SearchResponse> for SearchPage {
    type Error = ReplyError;

    /// Fails when `meta` reports results but the page carries no `data`.
    fn try_from(response: SearchResponse) -> Result<Self, Self::Error> {
        if response.meta.result_count > 0 && response.data.is_empty() {
            return Err(ReplyError::Json(serde_json::Error::custom(format!(
                "search page reports result_count {} but has no data",
                response.meta.result_count
            ))));
        }
        Ok(SearchPage {
            items: response.data.into_iter().map(ReplyItem::from).collect(),
            next_token: response.meta.next_token,
            result_count: response.meta.result_count,
        })
    }
}

/// Search payload; `data` is omitted by the API on an empty page, `meta` never is.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<TweetRecord>,
    pub meta: SearchMeta,
}

#[derive(Debug, Deserialize)]
pub struct SearchMeta {
    pub result_count: usize,
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TweetRecord {
    pub id: String,
    pub author_id: Option<String>,
    pub in_reply_to_user_id: Option<String>,
    pub conversation_id: Option<String>,
    pub entities: Option<Entities>,
}

#[derive(Debug, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub mentions: Vec<MentionEntity>,
}

#[derive(Debug, Deserialize)]
pub struct MentionEntity {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub data: Option<LookupData>,
    pub includes: Option<Includes>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
pub struct LookupData {
    pub author_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
}

/// Partial-error object the API returns alongside (or instead of) `data`.
#[derive(Debug, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
}
