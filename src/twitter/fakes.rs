//! In-memory stand-ins for the page fetcher and author resolver.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::ReplyError;

use super::lookup::AuthorResolver;
use super::models::{AuthorInfo, ReplyItem, SearchPage, SearchQuery};
use super::search::PageFetcher;

pub(crate) fn reply(
    id: &str,
    in_reply_to_user_id: Option<&str>,
    mentions: &[&str],
) -> ReplyItem {
    ReplyItem {
        id: id.to_string(),
        author_id: Some(format!("author-of-{}", id)),
        in_reply_to_user_id: in_reply_to_user_id.map(str::to_string),
        conversation_id: Some("1000".to_string()),
        mentions: mentions.iter().map(|m| m.to_string()).collect(),
    }
}

/// A page whose `result_count` matches its item count.
pub(crate) fn page(items: Vec<ReplyItem>, next_token: Option<&str>) -> SearchPage {
    SearchPage {
        result_count: items.len(),
        items,
        next_token: next_token.map(str::to_string),
    }
}

/// Replays a fixed script of page results and records each query it receives.
pub(crate) struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<SearchPage, ReplyError>>>,
    seen: Mutex<Vec<SearchQuery>>,
}

impl ScriptedFetcher {
    pub(crate) fn new(script: Vec<Result<SearchPage, ReplyError>>) -> Self {
        ScriptedFetcher {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn seen_tokens(&self) -> Vec<Option<String>> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.next_token.clone())
            .collect()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, ReplyError> {
        self.seen.lock().unwrap().push(query.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected extra fetch for {:?}", query.next_token))
    }
}

/// Resolves every tweet ID to the same fixed outcome and counts calls.
pub(crate) struct FixedResolver {
    outcome: Mutex<Option<Result<AuthorInfo, ReplyError>>>,
    calls: Mutex<usize>,
}

impl FixedResolver {
    pub(crate) fn author(id: &str, username: &str) -> Self {
        Self::with_outcome(Ok(AuthorInfo {
            id: id.to_string(),
            username: username.to_string(),
        }))
    }

    pub(crate) fn with_outcome(outcome: Result<AuthorInfo, ReplyError>) -> Self {
        FixedResolver {
            outcome: Mutex::new(Some(outcome)),
            calls: Mutex::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl AuthorResolver for FixedResolver {
    async fn resolve_author(&self, _tweet_id: &str) -> Result<AuthorInfo, ReplyError> {
        *self.calls.lock().unwrap() += 1;
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| panic!("author resolved more than once"))
    }
}
