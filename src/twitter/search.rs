//! Conversation search for the Twitter API.
//!
//! This module contains the page fetcher for the v2 search endpoints and the
//! pagination driver that walks a conversation's `next_token` chain to the
//! end, one request at a time.

use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;

use crate::error::ReplyError;

use super::api::TwitterClient;
use super::models::{ReplyItem, SearchPage, SearchQuery, SearchResponse};

/// Fetches a single page of search results.
#[async_trait]
pub trait PageFetcher {
    /// Performs exactly one request for `query` (with or without a cursor).
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, ReplyError>;
}

#[async_trait]
impl<'a> PageFetcher for TwitterClient<'a> {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, ReplyError> {
        debug!("Search query: {}", query.query_string());

        let response: SearchResponse = self
            .get_json(query.endpoint.path(), &query.to_params(), "search_replies")
            .await?;
        let page = SearchPage::try_from(response)?;

        debug!(
            "Search page: result_count={}, items={}, next_token={}",
            page.result_count,
            page.items.len(),
            page.next_token.is_some()
        );
        Ok(page)
    }
}

/// Fixed pacing between search pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub page_delay: Duration,
}

impl Pacing {
    pub fn fixed(page_delay: Duration) -> Self {
        Pacing { page_delay }
    }

    /// No pause between pages.
    pub fn none() -> Self {
        Pacing {
            page_delay: Duration::ZERO,
        }
    }

    async fn wait(&self) {
        if !self.page_delay.is_zero() {
            debug!("Waiting {:?} before next page", self.page_delay);
            tokio::time::sleep(self.page_delay).await;
        }
    }
}

/// Every item the search returned for a conversation, with the number of requests it took.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyCollection {
    pub items: Vec<ReplyItem>,
    pub request_count: usize,
}

/// Terminal outcome of the pagination driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Collected {
    /// The search completed and returned at least one item.
    Replies(ReplyCollection),
    /// The first page reported `result_count == 0`; there is nothing to analyze.
    Empty,
}

/// Pages through a conversation search until the API stops returning a cursor.
///
/// The first page is requested with `query` as given; each subsequent page
/// reuses it with the previous page's `next_token`. The driver pauses for
/// `pacing` between pages, never before the first or after the last.
///
/// # Returns
///
/// - `Ok(Collected::Replies)`: All items in page order and the total request count
/// - `Ok(Collected::Empty)`: If the first page reported no results
/// - `Err(ReplyError)`: The first fetch error; items gathered so far are discarded
pub async fn collect_replies<F>(
    fetcher: &F,
    query: &SearchQuery,
    pacing: Pacing,
) -> Result<Collected, ReplyError>
where
    F: PageFetcher + ?Sized,
{
    info!(
        "Collecting replies for conversation {}",
        query.conversation_id
    );

    let mut items: Vec<ReplyItem> = Vec::new();
    let mut request_count: usize = 0;
    let mut current = query.clone();

    loop {
        info!("Fetching page {} of search results", request_count + 1);
        let page = fetcher.fetch_page(&current).await?;

        if request_count == 0 && page.result_count == 0 {
            info!(
                "No replies found for conversation {}",
                query.conversation_id
            );
            return Ok(Collected::Empty);
        }

        request_count += 1;
        info!(
            "Page {} returned {} tweets",
            request_count,
            page.items.len()
        );
        items.extend(page.items);

        match page.next_token {
            Some(token) => {
                pacing.wait().await;
                current = current.with_next_token(token);
            }
            None => {
                info!("No more pages to fetch");
                break;
            }
        }
    }

    info!(
        "Collected {} tweets from conversation {} in {} requests",
        items.len(),
        query.conversation_id,
        request_count
    );
    Ok(Collected::Replies(ReplyCollection {
        items,
        request_count,
    }))
}
