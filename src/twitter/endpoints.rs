// Twitter API endpoint functions.
// Defines the upstream collaborator trait and its HTTP implementation.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::Result;

use super::client::{TwitterClient, check_response};
use super::types::{
    Post, RateLimitStatus, RateLimitStatusResponse, TimelineParams, TimelineResponse,
};

/// Upstream operations the timeline fetcher depends on.
#[async_trait]
pub trait TimelineApi: Send + Sync {
    /// Current rate limit budgets, keyed by endpoint path.
    async fn rate_limit_status(&self) -> Result<RateLimitStatus>;

    /// Fetch a user's timeline. Non-200 statuses are returned, not raised.
    async fn user_timeline(&self, params: &TimelineParams) -> Result<TimelineResponse>;
}

#[async_trait]
impl TimelineApi for TwitterClient {
    async fn rate_limit_status(&self) -> Result<RateLimitStatus> {
        let response = self
            .get("/application/rate_limit_status.json")
            .await?
            .query(&[("resources", "statuses")])
            .send()
            .await?;
        let response = check_response(response).await?;
        let raw: RateLimitStatusResponse = response.json().await?;
        Ok(raw.into())
    }

    async fn user_timeline(&self, params: &TimelineParams) -> Result<TimelineResponse> {
        let response = self
            .get("/statuses/user_timeline.json")
            .await?
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                screen_name = %params.screen_name,
                "user timeline request failed"
            );
            return Ok(TimelineResponse::failed(status.as_u16()));
        }

        let posts: Vec<Post> = response.json().await?;
        Ok(TimelineResponse::ok(posts))
    }
}
