// Error types for tweetbox.
// Covers upstream API failures, rate limiting, cache IO and configuration.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("upstream returned HTTP {status} and no cached timeline is available")]
    UpstreamFailure { status: u16 },

    #[error("rate limit exhausted{} and no cached timeline is available", format_reset(.reset_at))]
    RateLimitExhausted { reset_at: Option<DateTime<Utc>> },

    #[error("authentication failed: invalid or expired credentials")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API request error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not determine a cache directory")]
    MissingCacheDir,
}

fn format_reset(reset_at: &Option<DateTime<Utc>>) -> String {
    reset_at
        .map(|dt| format!(", resets at {}", dt.format("%H:%M:%S")))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, TimelineError>;
