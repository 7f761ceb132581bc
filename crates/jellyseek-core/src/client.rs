//! Authenticated HTTP transport for a Jellyfin/Emby server
//!
//! This module wraps a `reqwest` client with the `MediaBrowser` token
//! authorization scheme and the catalog endpoints the search pipeline
//! consumes. Failures propagate unchanged; retry and backoff policy is
//! deliberately absent.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{JellyseekError, Result};
use crate::types::{CatalogItem, ItemsPage, PlaybackInfo};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a Jellyfin/Emby server connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL; a trailing slash is stripped at client construction.
    pub base_url: String,
    /// Identifier of the server user the credentials belong to.
    pub user_id: String,
    /// API key sent in the `MediaBrowser` authorization header.
    pub api_key: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for a Jellyfin/Emby-compatible server.
///
/// Every request carries `Authorization: MediaBrowser Token="<apiKey>"`.
pub struct JellyfinClient {
    http: reqwest::Client,
    base_url: String,
    user_id: String,
    api_key: String,
}

impl JellyfinClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    /// Returns [`JellyseekError::InvalidConfig`] when the base URL is empty
    /// or the API key cannot be carried in a header, and propagates the
    /// underlying error when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(JellyseekError::InvalidConfig(
                "server base URL cannot be empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let token = format!(r#"MediaBrowser Token="{}""#, config.api_key);
        let value = HeaderValue::from_str(&token).map_err(|_| {
            JellyseekError::InvalidConfig(
                "API key contains characters not allowed in a header".to_string(),
            )
        })?;
        headers.insert(AUTHORIZATION, value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            user_id: config.user_id,
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Issue an authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "jellyfin request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JellyseekError::Status { status, url });
        }

        Ok(response.json().await?)
    }

    /// Search the catalog for series matching `term`.
    pub async fn search_series(&self, term: &str) -> Result<Vec<CatalogItem>> {
        let page: ItemsPage = self
            .get_json(
                "/Items",
                &[
                    ("searchTerm", term),
                    ("includeItemTypes", "Series"),
                    ("fields", "CanDownload,ParentId,MediaSources"),
                    ("enableImages", "true"),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// List the seasons under a series.
    pub async fn seasons(&self, series_id: &str) -> Result<Vec<CatalogItem>> {
        let page: ItemsPage = self
            .get_json(
                "/Items",
                &[
                    ("parentId", series_id),
                    ("includeItemTypes", "Season"),
                    ("enableImages", "true"),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// List the episodes under a season, or directly under a series.
    pub async fn episodes(&self, parent_id: &str) -> Result<Vec<CatalogItem>> {
        let page: ItemsPage = self
            .get_json(
                "/Items",
                &[
                    ("parentId", parent_id),
                    ("includeItemTypes", "Episode"),
                    ("fields", "MediaSources"),
                    ("enableImages", "true"),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// Fetch the playback sources of an item.
    pub async fn playback_info(&self, item_id: &str) -> Result<PlaybackInfo> {
        self.get_json(&format!("/Items/{item_id}/PlaybackInfo"), &[])
            .await
    }

    /// Canonical URL of an item on the server.
    pub fn item_url(&self, item_id: &str) -> String {
        format!("{}/Items/{}", self.base_url, item_id)
    }

    /// Direct download/stream URL of an item, authenticated via query key.
    pub fn download_url(&self, item_id: &str) -> String {
        format!(
            "{}/Videos/{}/stream?api_key={}",
            self.base_url,
            item_id,
            urlencoding::encode(&self.api_key)
        )
    }

    /// URL of an external subtitle stream of an item.
    pub fn subtitle_url(&self, item_id: &str, stream_index: u32, codec: &str) -> String {
        format!(
            "{}/Videos/{}/{}/Subtitles/{}/0/Stream.{}",
            self.base_url, item_id, item_id, stream_index, codec
        )
    }
}
