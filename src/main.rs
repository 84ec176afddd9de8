//! # Replytally
//!
//! Command-line front end: pulls the direct replies to a tweet, prints which
//! accounts they mention most, and writes the reply IDs to a file.
//!
//! ## Environment Variables
//!
//! - `TWITTER_BEARER_TOKEN`: App-only bearer token (required; may come from `.env`)
//! - `RUST_LOG`: Log filter (defaults to `replytally=info`)
//!
//! ## Example Usage
//!
//! ```bash
//! replytally -t 1460323737035677698
//! replytally -t 1460323737035677698 -s 2021-12-04T01:30:00Z -e 2021-12-05T01:30:00Z
//! replytally -t 1460323737035677698 --recent --json
//! ```

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use replytally::config::{parse_timestamp, validate_time_window, validate_tweet_id};
use replytally::report::{render_summary, to_json, write_reply_ids};
use replytally::{
    run_with_config, ReplyError, RunOutcome, SearchEndpoint, SearchQuery, TwitterConfig,
};

#[derive(Parser, Debug)]
#[command(name = "replytally")]
#[command(about = "Count the accounts mentioned in the direct replies to a Tweet")]
struct Args {
    /// ID of the Tweet for which you want to pull replies
    #[arg(short = 't', long)]
    tweet_id: String,

    /// Oldest UTC timestamp to include, e.g. 2021-12-04T01:30:00Z (API default when unset)
    #[arg(short = 's', long)]
    start_time: Option<String>,

    /// Newest UTC timestamp to include, e.g. 2021-12-04T01:30:00Z (API default when unset)
    #[arg(short = 'e', long)]
    end_time: Option<String>,

    /// Use the recent (last 7 days) search endpoint instead of full-archive search
    #[arg(long)]
    recent: bool,

    /// Page size; clamped to 10..=500 (full-archive) or 10..=100 (recent)
    #[arg(long)]
    max_results: Option<u32>,

    /// File the qualifying reply IDs are written to
    #[arg(short = 'o', long, default_value = "replies.txt")]
    output: PathBuf,

    /// Print the result as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

/// Validates the command-line values and builds the first-page search query.
fn build_query(args: &Args) -> Result<SearchQuery, ReplyError> {
    validate_tweet_id(&args.tweet_id)?;

    let start_time = args.start_time.as_deref().map(parse_timestamp).transpose()?;
    let end_time = args.end_time.as_deref().map(parse_timestamp).transpose()?;
    validate_time_window(start_time.as_ref(), end_time.as_ref())?;

    let endpoint = if args.recent {
        SearchEndpoint::Recent
    } else {
        SearchEndpoint::FullArchive
    };
    let mut query =
        SearchQuery::new(args.tweet_id.clone(), endpoint).with_time_window(start_time, end_time);
    if let Some(max_results) = args.max_results {
        query = query.with_max_results(max_results);
    }
    Ok(query)
}

async fn execute(args: &Args) -> Result<(), ReplyError> {
    let query = build_query(args)?;
    let config = TwitterConfig::from_env()?;

    match run_with_config(&config, &query).await? {
        RunOutcome::NothingToAnalyze => {
            info!("Search returned no results for tweet {}", args.tweet_id);
            eprintln!("No replies to analyze");
        }
        RunOutcome::Completed(report) => {
            write_reply_ids(&args.output, &report.result.reply_ids)?;
            if args.json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", render_summary(&report));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the variables may already be set
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("replytally=info"))
        .init();

    let args = Args::parse();

    match execute(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
