// Timeline fetcher.
// Decides between fresh cache, upstream fetch, and stale cache fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use crate::cache::{self, CachedData};
use crate::config::{DEFAULT_CACHE_TTL, DEFAULT_COUNT, FetcherConfig};
use crate::error::{Result, TimelineError};
use crate::render::render_post;
use crate::twitter::{Post, TimelineApi, TimelineParams, TwitterClient, USER_TIMELINE_ENDPOINT};

/// Which user timeline to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRequest {
    pub screen_name: String,
    pub count: u32,
    pub include_replies: bool,
}

impl TimelineRequest {
    pub fn new(screen_name: impl Into<String>) -> Self {
        Self {
            screen_name: screen_name.into(),
            count: DEFAULT_COUNT,
            include_replies: false,
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn include_replies(mut self, include_replies: bool) -> Self {
        self.include_replies = include_replies;
        self
    }

    fn params(&self) -> TimelineParams {
        TimelineParams {
            screen_name: self.screen_name.clone(),
            count: self.count,
            exclude_replies: !self.include_replies,
        }
    }
}

/// Why a stale cache was served instead of fresh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    UpstreamStatus(u16),
    RateLimited,
    RequestFailed,
}

/// Where a timeline's posts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSource {
    FreshCache,
    Upstream,
    StaleFallback(FallbackReason),
}

/// Rendered posts plus their provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub posts: Vec<Post>,
    pub source: TimelineSource,
}

impl Timeline {
    pub fn is_stale(&self) -> bool {
        matches!(self.source, TimelineSource::StaleFallback(_))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.posts)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Native,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineOutput {
    Posts(Vec<Post>),
    Json(String),
}

/// Reasons the upstream path produced no posts.
#[derive(Debug)]
enum Miss {
    Status(u16),
    RateLimited(Option<DateTime<Utc>>),
    Request(TimelineError),
}

impl Miss {
    fn reason(&self) -> FallbackReason {
        match self {
            Miss::Status(status) => FallbackReason::UpstreamStatus(*status),
            Miss::RateLimited(_) => FallbackReason::RateLimited,
            Miss::Request(_) => FallbackReason::RequestFailed,
        }
    }

    fn into_error(self) -> TimelineError {
        match self {
            Miss::Status(status) => TimelineError::UpstreamFailure { status },
            Miss::RateLimited(reset_at) => TimelineError::RateLimitExhausted { reset_at },
            Miss::Request(err) => err,
        }
    }
}

/// Fetches user timelines through an upstream API with a file cache in front.
pub struct TimelineFetcher<A> {
    api: A,
    cache_dir: PathBuf,
    ttl: Duration,
}

impl TimelineFetcher<TwitterClient> {
    /// Build a fetcher with an HTTP client from validated configuration.
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        config.validate()?;
        let api = TwitterClient::with_base(config.credentials.clone(), config.api_base.clone())?;
        Ok(Self::new(api, config.resolve_cache_dir()?).with_ttl(config.cache_ttl()))
    }
}

impl<A: TimelineApi> TimelineFetcher<A> {
    pub fn new(api: A, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            cache_dir: cache_dir.into(),
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Load a timeline: fresh cache, else upstream, else stale cache.
    pub async fn fetch(&self, request: &TimelineRequest) -> Result<Timeline> {
        let path = cache::timeline_path(
            &self.cache_dir,
            &request.screen_name,
            request.include_replies,
        );
        let cached = match self.read_cache(&path) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                tracing::debug!(
                    screen_name = %request.screen_name,
                    age_secs = entry.age().as_secs(),
                    "serving timeline from fresh cache"
                );
                return Ok(Timeline {
                    posts: entry.data,
                    source: TimelineSource::FreshCache,
                });
            }
            other => other,
        };

        match self.fetch_upstream(request).await {
            Ok(posts) => {
                if let Err(e) = cache::write_cached(&path, &posts) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to write timeline cache"
                    );
                } else {
                    tracing::info!(
                        screen_name = %request.screen_name,
                        posts = posts.len(),
                        "cached fresh timeline"
                    );
                }
                Ok(Timeline {
                    posts,
                    source: TimelineSource::Upstream,
                })
            }
            Err(miss) => match cached {
                Some(entry) => {
                    let reason = miss.reason();
                    tracing::warn!(
                        screen_name = %request.screen_name,
                        ?reason,
                        age_secs = entry.age().as_secs(),
                        "serving stale cached timeline"
                    );
                    Ok(Timeline {
                        posts: entry.data,
                        source: TimelineSource::StaleFallback(reason),
                    })
                }
                None => Err(miss.into_error()),
            },
        }
    }

    /// Load a timeline as native posts or as a JSON string.
    pub async fn get_user_timeline(
        &self,
        screen_name: &str,
        count: u32,
        include_replies: bool,
        format: OutputFormat,
    ) -> Result<TimelineOutput> {
        let request = TimelineRequest::new(screen_name)
            .count(count)
            .include_replies(include_replies);
        let timeline = self.fetch(&request).await?;

        match format {
            OutputFormat::Native => Ok(TimelineOutput::Posts(timeline.posts)),
            OutputFormat::Json => Ok(TimelineOutput::Json(timeline.to_json()?)),
        }
    }

    /// Check the budget, fetch, and render. Posts are rendered exactly once, here.
    async fn fetch_upstream(
        &self,
        request: &TimelineRequest,
    ) -> std::result::Result<Vec<Post>, Miss> {
        let status = self.api.rate_limit_status().await.map_err(|e| {
            tracing::warn!(error = %e, "rate limit status request failed");
            Miss::Request(e)
        })?;

        let remaining = status.remaining(USER_TIMELINE_ENDPOINT);
        tracing::debug!(remaining, endpoint = USER_TIMELINE_ENDPOINT, "checked rate limit");

        if remaining == 0 {
            let reset_at = status.get(USER_TIMELINE_ENDPOINT).and_then(|limit| limit.reset_at());
            tracing::warn!(?reset_at, "rate limit exhausted, skipping fetch");
            return Err(Miss::RateLimited(reset_at));
        }

        let response = self.api.user_timeline(&request.params()).await.map_err(|e| {
            tracing::warn!(error = %e, "user timeline request failed");
            Miss::Request(e)
        })?;

        if !response.is_ok() {
            return Err(Miss::Status(response.status));
        }

        let mut posts = response.posts;
        posts.iter_mut().for_each(render_post);
        Ok(posts)
    }

    /// Read the cache file, treating unreadable content as absent.
    fn read_cache(&self, path: &Path) -> Option<CachedData<Vec<Post>>> {
        match cache::read_cached(path) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable timeline cache"
                );
                None
            }
        }
    }
}
