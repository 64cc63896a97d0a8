//! Read-only client for the YouTube Data API v3.

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    comments::CommentSource,
    config::ApiConfig,
    error::{HarvestError, Result},
    search::VideoSearch,
    types::{ApiErrorResponse, CommentThreadListResponse, SearchListResponse},
};

/// Thin wrapper around a shared [`reqwest::Client`] that knows the API key
/// and the base URL of the Data API.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: ApiConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Issues a GET against `<base_url>/<resource>` and decodes the JSON body.
    ///
    /// The key is sent as the `X-Goog-Api-Key` header, so request URLs (and
    /// therefore transport errors) never carry it. Non-2xx responses become
    /// [`HarvestError::Api`] with Google's error message when one is present.
    #[instrument(skip(self, params), level = "debug")]
    async fn get<T: DeserializeOwned>(&self, resource: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);

        let response = self
            .http
            .get(&url)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::debug!(%status, "YouTube API returned an error");
            return Err(HarvestError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Pulls `error.message` out of Google's error envelope, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

impl VideoSearch for YouTubeClient {
    async fn search_page(
        &self,
        query: &str,
        published_after: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<SearchListResponse> {
        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", "id,snippet"),
            ("type", "video"),
            ("q", query),
            ("maxResults", max_results.as_str()),
            ("publishedAfter", published_after),
        ];
        if let Some(token) = page_token.as_deref() {
            params.push(("pageToken", token));
        }

        self.get("search", &params).await
    }
}

impl CommentSource for YouTubeClient {
    async fn comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<CommentThreadListResponse> {
        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("textFormat", "plainText"),
            ("order", "time"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token.as_deref() {
            params.push(("pageToken", token));
        }

        self.get("commentThreads", &params).await
    }
}
