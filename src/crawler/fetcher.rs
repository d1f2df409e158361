//! HTTP page fetcher
//!
//! This module is the crawler's document accessor:
//! - Building the HTTP client with a browser-like user agent
//! - GET requests for comic pages
//! - Error classification (transport, status, content type)
//!
//! There are no retries: any failure here is fatal to the current run.

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },
}

/// A fetched HTML document before parsing
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects
    pub url: Url,

    /// Page body content
    pub body: String,
}

/// Something that can retrieve a page by URL
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the document at `url`
    async fn fetch(&self, url: &Url) -> Result<FetchedDocument, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use comic_harvest::config::HttpConfig;
/// use comic_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value denotes a parseable markup page
fn is_markup(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml" || mime == "text/xml" || mime == "application/xml"
}

/// Page source backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &Url) -> Result<FetchedDocument, FetchError> {
        tracing::info!("Retrieving {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is given the benefit of the doubt
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_markup(content_type) {
                return Err(FetchError::ContentMismatch {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Retrieved {} successfully", final_url);
        Ok(FetchedDocument {
            url: final_url,
            body,
        })
    }
}
