// Twitter API response types.
// Defines typed records for timeline posts and rate limit status.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Endpoint path whose budget gates timeline fetches.
pub const USER_TIMELINE_ENDPOINT: &str = "/statuses/user_timeline";

/// A single post on a user's timeline.
///
/// Fields the crate does not interpret (user, entities, counts) are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
    #[serde(with = "wire_time")]
    pub created_at: DateTime<Utc>,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters for the user timeline endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineParams {
    pub screen_name: String,
    pub count: u32,
    pub exclude_replies: bool,
}

/// Typed upstream timeline response.
///
/// Non-200 responses carry no posts.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineResponse {
    pub status: u16,
    pub posts: Vec<Post>,
}

impl TimelineResponse {
    pub fn ok(posts: Vec<Post>) -> Self {
        Self { status: 200, posts }
    }

    pub fn failed(status: u16) -> Self {
        Self {
            status,
            posts: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Per-endpoint rate limit budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EndpointLimit {
    pub limit: u32,
    pub remaining: u32,
    /// Unix timestamp of the next window reset.
    pub reset: i64,
}

impl EndpointLimit {
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset, 0)
    }
}

/// Rate limit budgets keyed by endpoint path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateLimitStatus {
    pub endpoints: HashMap<String, EndpointLimit>,
}

impl RateLimitStatus {
    pub fn get(&self, endpoint: &str) -> Option<&EndpointLimit> {
        self.endpoints.get(endpoint)
    }

    /// Remaining calls for an endpoint. Unknown endpoints have no budget.
    pub fn remaining(&self, endpoint: &str) -> u32 {
        self.get(endpoint).map_or(0, |limit| limit.remaining)
    }
}

/// Raw `application/rate_limit_status` body: resource family -> path -> limit.
#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitStatusResponse {
    #[serde(default)]
    pub resources: HashMap<String, HashMap<String, EndpointLimit>>,
}

impl From<RateLimitStatusResponse> for RateLimitStatus {
    fn from(response: RateLimitStatusResponse) -> Self {
        let endpoints = response
            .resources
            .into_values()
            .flat_map(|family| family.into_iter())
            .collect();
        Self { endpoints }
    }
}

/// `created_at` as the API formats it, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
mod wire_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
