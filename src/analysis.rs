//! Reply classification and mention counting.
//!
//! Both steps are pure functions over the collected items, so the same input
//! always produces the same output in the same order.

use std::collections::HashMap;

use crate::twitter::ReplyItem;

/// Mentions and reply IDs taken from the direct replies to one author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedReplies {
    /// Every mention handle of every direct reply, in input order
    pub mentions: Vec<String>,
    /// IDs of the direct replies, in input order
    pub reply_ids: Vec<String>,
}

/// Keeps the items whose `in_reply_to_user_id` equals `author_id` exactly.
///
/// Replies to other users (including replies-to-replies) and items with no
/// `in_reply_to_user_id` are skipped entirely and their mentions are ignored.
pub fn classify_replies(items: &[ReplyItem], author_id: &str) -> ClassifiedReplies {
    let mut classified = ClassifiedReplies::default();

    for item in items {
        if item.in_reply_to_user_id.as_deref() != Some(author_id) {
            continue;
        }
        classified.mentions.extend(item.mentions.iter().cloned());
        classified.reply_ids.push(item.id.clone());
    }

    classified
}

/// Counts case-sensitive occurrences of each handle, dropping `author_handle`.
pub fn count_mentions(mentions: &[String], author_handle: &str) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for handle in mentions {
        *counts.entry(handle.clone()).or_insert(0) += 1;
    }
    // No-op when the author never mentioned themselves
    counts.remove(author_handle);
    counts
}

/// Final result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub mention_counts: HashMap<String, usize>,
    pub reply_ids: Vec<String>,
    pub request_count: usize,
}

impl AggregationResult {
    /// Classifies `items` against the author and folds the mentions into counts.
    pub fn build(
        items: &[ReplyItem],
        author_id: &str,
        author_handle: &str,
        request_count: usize,
    ) -> Self {
        let classified = classify_replies(items, author_id);
        AggregationResult {
            mention_counts: count_mentions(&classified.mentions, author_handle),
            reply_ids: classified.reply_ids,
            request_count,
        }
    }

    /// `(handle, count)` pairs, most mentioned first, ties by handle.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .mention_counts
            .iter()
            .map(|(handle, count)| (handle.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn direct_reply_count(&self) -> usize {
        self.reply_ids.len()
    }

    pub fn distinct_mention_count(&self) -> usize {
        self.mention_counts.len()
    }
}
