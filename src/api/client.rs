//! Artwork API client implementation.
//!
//! This module provides the HTTP client for the Art Institute of Chicago
//! `/artworks` listing endpoint. It handles request construction, status
//! mapping and response decoding. There is no retry loop: a
//! failed fetch becomes an empty page at the [`PageSource`] boundary.

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::source::PageSource;
use super::types::{ArtworkPage, PageNumber, ARTWORK_FIELDS};
use crate::config::Settings;

/// Number of rows per page, fixed by the table layout.
pub const PAGE_SIZE: usize = 12;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The artwork API client.
#[derive(Debug, Clone)]
pub struct ArticClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, without trailing slash.
    base_url: String,
}

impl ArticClient {
    /// Create a new client from the application settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the HTTP client
    /// cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_base_url(
            &settings.api_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Create a new client for an explicit base URL.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Self::build_http_client(timeout)?;
        let base_url = normalize_base_url(base_url);
        debug!(base_url = %base_url, "Artwork client created");

        Ok(Self { client, base_url })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("artgrid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)
    }

    /// Fetch one page of artworks.
    ///
    /// Calls `GET /artworks?page={n}&limit=12&fields=...`.
    #[instrument(skip(self), fields(page = %page))]
    pub async fn get_page(&self, page: PageNumber) -> Result<ArtworkPage> {
        let url = self.artworks_url();
        let page_param = page.get().to_string();
        let limit_param = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", page_param.as_str()),
                ("limit", limit_param.as_str()),
                ("fields", ARTWORK_FIELDS),
            ])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let result: ArtworkPage = self.handle_response(response).await?;
        debug!(
            "Fetched {} artworks (total: {})",
            result.data.len(),
            result.total()
        );
        Ok(result)
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(ApiError::from_status(status, &url))
        }
    }

    /// The listing endpoint URL.
    fn artworks_url(&self) -> String {
        format!("{}/artworks", self.base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for ArticClient {
    async fn fetch_page(&self, page: PageNumber) -> ArtworkPage {
        match self.get_page(page).await {
            Ok(result) => result,
            Err(e) => {
                warn!(page = %page, error = %e, "Failed to fetch artworks, showing empty page");
                ArtworkPage::empty()
            }
        }
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1")
    {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
