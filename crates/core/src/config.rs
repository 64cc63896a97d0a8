use std::fmt;

use crate::error::{HarvestError, Result};

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";
pub const BASE_URL_ENV: &str = "YOUTUBE_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Credentials and endpoint for the YouTube Data API.
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ApiConfig {
    /// Builds a config around an explicit key, rejecting blank keys. The base
    /// URL still honours `YOUTUBE_API_BASE_URL` so the client can be pointed
    /// at a mock server.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(HarvestError::MissingApiKey {
                env_var: API_KEY_ENV.to_string(),
            });
        }

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    /// Uses `explicit` (the `--api-key` flag) when given, otherwise
    /// `YOUTUBE_API_KEY`. An explicit key never falls back to the environment.
    pub fn resolve(explicit: Option<String>) -> Result<Self> {
        Self::from_sources(explicit, std::env::var(API_KEY_ENV).ok())
    }

    fn from_sources(explicit: Option<String>, from_env: Option<String>) -> Result<Self> {
        Self::new(explicit.or(from_env).unwrap_or_default())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The four inputs that drive one harvest run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestOptions {
    pub query: String,
    pub max_videos: u32,
    pub max_comments: u32,
    pub years_back: u32,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_videos: 10,
            max_comments: 10,
            years_back: 1,
        }
    }
}
