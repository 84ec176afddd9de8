//! Tweet lookup for resolving the root tweet's author.

use async_trait::async_trait;
use log::{info, warn};

use crate::error::ReplyError;

use super::api::TwitterClient;
use super::models::{AuthorInfo, LookupResponse};

/// Resolves a tweet ID to the ID and handle of the account that posted it.
#[async_trait]
pub trait AuthorResolver {
    async fn resolve_author(&self, tweet_id: &str) -> Result<AuthorInfo, ReplyError>;
}

#[async_trait]
impl<'a> AuthorResolver for TwitterClient<'a> {
    /// Looks up a tweet with the `author_id` expansion using the Twitter API v2.
    ///
    /// # Returns
    ///
    /// - `Ok(AuthorInfo)`: The author's user ID and username
    /// - `Err(ReplyError::NotFound)`: If the response carries no author linkage
    /// - `Err(ReplyError::Auth | ReplyError::Request)`: On a non-success status
    async fn resolve_author(&self, tweet_id: &str) -> Result<AuthorInfo, ReplyError> {
        info!("Looking up author of tweet {}", tweet_id);

        let path = format!("/tweets/{}", urlencoding::encode(tweet_id));
        let params = [
            ("tweet.fields", "author_id".to_string()),
            ("expansions", "author_id".to_string()),
            ("user.fields", "username".to_string()),
        ];
        let response: LookupResponse = self.get_json(&path, &params, "lookup_tweet").await?;

        let author = parse_author(tweet_id, response)?;
        info!(
            "Tweet {} was posted by @{} ({})",
            tweet_id, author.username, author.id
        );
        Ok(author)
    }
}

/// Extracts the author from a lookup response.
///
/// The handle comes from the `includes.users` entry whose `id` equals
/// `data.author_id`. Anything short of that is a [`ReplyError::NotFound`].
pub fn parse_author(tweet_id: &str, response: LookupResponse) -> Result<AuthorInfo, ReplyError> {
    let problem = response
        .errors
        .first()
        .and_then(|p| p.detail.clone().or_else(|| p.title.clone()));

    let author_id = match response.data.and_then(|data| data.author_id) {
        Some(id) => id,
        None => {
            warn!("Lookup for tweet {} returned no author_id", tweet_id);
            return Err(ReplyError::NotFound(match problem {
                Some(detail) => format!("tweet {} has no author_id: {}", tweet_id, detail),
                None => format!("tweet {} has no author_id", tweet_id),
            }));
        }
    };

    let users = response.includes.map(|i| i.users).unwrap_or_default();
    match users.into_iter().find(|user| user.id == author_id) {
        Some(user) => Ok(AuthorInfo {
            id: author_id,
            username: user.username,
        }),
        None => {
            warn!(
                "Lookup for tweet {} did not include user {}",
                tweet_id, author_id
            );
            Err(ReplyError::NotFound(format!(
                "author {} of tweet {} missing from includes.users",
                author_id, tweet_id
            )))
        }
    }
}
