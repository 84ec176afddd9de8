//! Output formatting for a completed run.
//!
//! Renders the ranked mention table for the console, writes the qualifying
//! reply IDs to a file, and produces the JSON form used by `--json`.

use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::ReplyError;
use crate::pipeline::Report;
use crate::twitter::AuthorInfo;

const RULE: &str = "============================";

#[derive(Debug, Serialize)]
struct MentionCount<'a> {
    username: &'a str,
    count: usize,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    tweet_id: &'a str,
    author: &'a AuthorInfo,
    direct_replies: usize,
    request_count: usize,
    mentions: Vec<MentionCount<'a>>,
    reply_ids: &'a [String],
}

/// Renders the ranked mention table followed by the run totals.
pub fn render_summary(report: &Report) -> String {
    let result = &report.result;
    let ranked = result.ranked();
    // `{:<width$}` pads by chars, so measure handles the same way
    let width = ranked
        .iter()
        .map(|(handle, _)| handle.chars().count() + 1)
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!(
            "Mentions in direct replies to @{} (tweet {})",
            report.author.username, report.tweet_id
        ),
        RULE.to_string(),
    ];
    if ranked.is_empty() {
        lines.push("(no other accounts mentioned)".to_string());
    }
    lines.extend(ranked.iter().map(|(handle, count)| {
        format!(
            "{:<width$}  {}",
            format!("@{}", handle),
            count,
            width = width
        )
    }));
    lines.push(RULE.to_string());
    lines.push(format!(
        "* Number of direct replies to original Tweet: {}",
        result.direct_reply_count()
    ));
    lines.push(format!(
        "* Number of usernames mentioned: {}",
        result.distinct_mention_count()
    ));
    lines.push(format!("* Total request count: {}", result.request_count));
    lines.push(RULE.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the qualifying reply IDs to `path`, one per line, replacing any existing file.
pub fn write_reply_ids(path: &Path, reply_ids: &[String]) -> Result<(), ReplyError> {
    let mut contents = reply_ids.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    info!("Wrote {} reply IDs to {}", reply_ids.len(), path.display());
    Ok(())
}

/// Pretty-printed JSON with mentions in ranked order.
pub fn to_json(report: &Report) -> Result<String, ReplyError> {
    let result = &report.result;
    let json_report = JsonReport {
        tweet_id: &report.tweet_id,
        author: &report.author,
        direct_replies: result.direct_reply_count(),
        request_count: result.request_count,
        mentions: result
            .ranked()
            .into_iter()
            .map(|(username, count)| MentionCount { username, count })
            .collect(),
        reply_ids: &result.reply_ids,
    };
    Ok(serde_json::to_string_pretty(&json_report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AggregationResult;
    use std::collections::HashMap;

    fn sample_report() -> Report {
        Report {
            tweet_id: "1000".to_string(),
            author: AuthorInfo {
                id: "42".to_string(),
                username: "root".to_string(),
            },
            result: AggregationResult {
                mention_counts: HashMap::from([
                    ("bob".to_string(), 1),
                    ("alice".to_string(), 2),
                ]),
                reply_ids: vec!["11".to_string(), "12".to_string()],
                request_count: 3,
            },
        }
    }

    #[test]
    fn test_render_summary_lists_ranked_mentions_and_totals() {
        let summary = render_summary(&sample_report());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "Mentions in direct replies to @root (tweet 1000)");
        assert_eq!(lines[2], "@alice  2");
        assert_eq!(lines[3], "@bob    1");
        assert!(summary.contains("* Number of direct replies to original Tweet: 2"));
        assert!(summary.contains("* Number of usernames mentioned: 2"));
        assert!(summary.contains("* Total request count: 3"));
    }

    #[test]
    fn test_render_summary_without_mentions() {
        let mut report = sample_report();
        report.result.mention_counts.clear();

        assert!(render_summary(&report).contains("(no other accounts mentioned)"));
    }

    #[test]
    fn test_render_summary_aligns_non_ascii_handles() {
        let mut report = sample_report();
        report.result.mention_counts =
            HashMap::from([("josé".to_string(), 3), ("bob".to_string(), 1)]);

        let summary = render_summary(&report);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[2], "@josé  3");
        assert_eq!(lines[3], "@bob   1");
        assert_eq!(
            lines[2].chars().position(|c| c == '3'),
            lines[3].chars().position(|c| c == '1')
        );
        assert!(summary.ends_with(&format!("{}\n", RULE)));
    }

    #[test]
    fn test_write_reply_ids_one_per_line() {
        let path = std::env::temp_dir().join(format!(
            "replytally-test-{}-ids.txt",
            std::process::id()
        ));

        write_reply_ids(&path, &["11".to_string(), "12".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "11\n12\n");

        write_reply_ids(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_to_json_has_ranked_mentions() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["author"]["username"], "root");
        assert_eq!(value["direct_replies"], 2);
        assert_eq!(value["request_count"], 3);
        assert_eq!(value["mentions"][0]["username"], "alice");
        assert_eq!(value["mentions"][0]["count"], 2);
        assert_eq!(value["mentions"][1]["username"], "bob");
        assert_eq!(value["reply_ids"][1], "12");
    }
}
