// tweetbox: a cached, linkified "recent posts" timeline.
// Fetches a user's timeline at most once per cache window and renders links.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod render;
pub mod twitter;

pub use config::{Credentials, DEFAULT_COUNT, FetcherConfig};
pub use error::{Result, TimelineError};
pub use fetcher::{
    FallbackReason, OutputFormat, Timeline, TimelineFetcher, TimelineOutput, TimelineRequest,
    TimelineSource,
};
pub use render::{render, render_post};
pub use twitter::{Post, RateLimitStatus, TimelineApi, TimelineResponse, TwitterClient};
