//! Orchestrates one analysis run.
//!
//! The run is all-or-nothing: the first error from the search or the author
//! lookup aborts it and nothing partial is returned.

use log::info;

use crate::analysis::AggregationResult;
use crate::config::TwitterConfig;
use crate::error::ReplyError;
use crate::twitter::{
    collect_replies, AuthorInfo, AuthorResolver, Collected, Pacing, PageFetcher, SearchQuery,
    TwitterClient,
};

/// The root tweet's author together with the aggregation over its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub tweet_id: String,
    pub author: AuthorInfo,
    pub result: AggregationResult,
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(Report),
    /// The conversation search returned no results at all.
    NothingToAnalyze,
}

/// Collects the conversation, resolves the root author, then classifies and counts.
///
/// The author lookup only happens once the search produced results.
pub async fn run<F, R>(
    fetcher: &F,
    resolver: &R,
    query: &SearchQuery,
    pacing: Pacing,
) -> Result<RunOutcome, ReplyError>
where
    F: PageFetcher + ?Sized,
    R: AuthorResolver + ?Sized,
{
    let collection = match collect_replies(fetcher, query, pacing).await? {
        Collected::Replies(collection) => collection,
        Collected::Empty => return Ok(RunOutcome::NothingToAnalyze),
    };

    let author = resolver.resolve_author(&query.conversation_id).await?;
    let result = AggregationResult::build(
        &collection.items,
        &author.id,
        &author.username,
        collection.request_count,
    );

    info!(
        "Found {} direct replies to @{} mentioning {} distinct accounts",
        result.direct_reply_count(),
        author.username,
        result.distinct_mention_count()
    );

    Ok(RunOutcome::Completed(Report {
        tweet_id: query.conversation_id.clone(),
        author,
        result,
    }))
}

/// Runs against the live API using the configured client and page delay.
pub async fn run_with_config(
    config: &TwitterConfig,
    query: &SearchQuery,
) -> Result<RunOutcome, ReplyError> {
    let client = TwitterClient::new(config)?;
    run(&client, &client, query, Pacing::fixed(config.page_delay)).await
}
