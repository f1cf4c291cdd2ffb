//! Endpoint configuration for the REST service.

use reqwest::Url;

use crate::ApiError;

/// Environment variable overriding the configured base URL.
pub const API_URL_VAR: &str = "QUEST_API_URL";

/// Where the quest REST service lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    /// Parse a base URL. A trailing slash is implied so that endpoints nest under
    /// any path prefix (`https://host/api` → `https://host/api/mails`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url.trim())
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base_url: url })
    }

    /// Resolve the base URL from `QUEST_API_URL`, else `fallback`.
    ///
    /// Native builds read the variable at runtime (after loading `.env`); WASM builds
    /// take the value baked in at compile time.
    pub fn from_env(fallback: &str) -> Result<Self, ApiError> {
        match env_base_url() {
            Some(url) => {
                tracing::debug!("Using {} = {}", API_URL_VAR, url);
                Self::new(&url)
            }
            None => Self::new(fallback),
        }
    }

    /// Absolute URL for the given path segments below the base.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_base_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_VAR).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn env_base_url() -> Option<String> {
    option_env!("QUEST_API_URL")
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
