// Twitter API HTTP client.
// Handles application-only authentication and request/response processing.

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::config::{Credentials, DEFAULT_API_BASE};
use crate::error::{Result, TimelineError};

/// Twitter API client authenticated with an application bearer token.
pub struct TwitterClient {
    client: Client,
    api_base: String,
    credentials: Credentials,
    bearer: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

impl TwitterClient {
    /// Create a client against the public API.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base(credentials, DEFAULT_API_BASE)
    }

    /// Create a client against a custom API base (e.g. a local proxy).
    pub fn with_base(credentials: Credentials, api_base: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("tweetbox"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(TimelineError::Api)?;

        Ok(Self::with_client(credentials, api_base, client))
    }

    /// Create a client around a preconfigured HTTP client.
    pub fn with_client(
        credentials: Credentials,
        api_base: impl Into<String>,
        client: Client,
    ) -> Self {
        let bearer = match credentials.bearer_token.as_deref() {
            Some(token) if !token.is_empty() => OnceCell::new_with(Some(token.to_string())),
            _ => OnceCell::new(),
        };

        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            credentials,
            bearer,
        }
    }

    /// Bearer token, exchanged from the consumer key pair on first use.
    async fn bearer_token(&self) -> Result<&str> {
        let token = self
            .bearer
            .get_or_try_init(|| self.request_bearer_token())
            .await?;
        Ok(token.as_str())
    }

    async fn request_bearer_token(&self) -> Result<String> {
        let url = format!("{}/oauth2/token", self.oauth_base());
        tracing::debug!(url = %url, "requesting application bearer token");

        let response = self
            .client
            .post(&url)
            .basic_auth(
                &self.credentials.consumer_key,
                Some(&self.credentials.consumer_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let response = check_response(response).await?;
        let token: TokenResponse = response.json().await?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(TimelineError::Http {
                status: 200,
                body: format!("unexpected token type {}", token.token_type),
            });
        }
        Ok(token.access_token)
    }

    /// `oauth2/token` lives at the host root, outside the versioned path.
    fn oauth_base(&self) -> &str {
        self.api_base
            .strip_suffix("/1.1")
            .unwrap_or(self.api_base.as_str())
    }

    /// Build an authenticated GET request for an API endpoint.
    pub(crate) async fn get(&self, endpoint: &str) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.api_base, endpoint);
        let token = self.bearer_token().await?;
        Ok(self.client.get(url).bearer_auth(token))
    }
}

/// Check response status and convert errors.
pub(crate) async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::UNAUTHORIZED => Err(TimelineError::Unauthorized),
        status => Err(TimelineError::Http {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}
