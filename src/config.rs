// Fetcher configuration.
// Credentials, cache location and TTL, loadable from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache;
use crate::error::{Result, TimelineError};

/// Versioned REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

/// Cached timelines stay fresh for one hour.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Posts requested when the caller has no preference.
pub const DEFAULT_COUNT: u32 = 5;

/// Application credentials issued by the developer portal.
///
/// `access_token` and `access_secret` are accepted so existing credential
/// files load unchanged, but only the consumer pair (or a pre-issued bearer
/// token) is used for application-only authentication.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
    pub bearer_token: Option<String>,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            ..Self::default()
        }
    }

    fn has_bearer(&self) -> bool {
        self.bearer_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub credentials: Credentials,
    /// Defaults to the platform cache directory.
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_secs: u64,
    pub api_base: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            cache_dir: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl FetcherConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let creds = &self.credentials;
        let missing_pair = creds.consumer_key.is_empty() || creds.consumer_secret.is_empty();
        if !creds.has_bearer() && missing_pair {
            return Err(TimelineError::Config(
                "consumer_key and consumer_secret are required without a bearer_token".to_string(),
            ));
        }
        if self.api_base.is_empty() {
            return Err(TimelineError::Config("api_base must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Configured cache directory, or the platform default.
    pub fn resolve_cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => cache::cache_dir().ok_or(TimelineError::MissingCacheDir),
        }
    }
}
