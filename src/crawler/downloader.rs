//! Image downloader
//!
//! Streams one image to disk per call. Failures never escape this module: they
//! are logged and reported as an unsuccessful `DownloadOutcome`, because one
//! broken image must not stop an archive crawl.

use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Errors that can occur while saving a single image
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one image download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// The image URL that was requested
    pub url: Url,

    /// Where the image was (or would have been) saved
    pub path: PathBuf,

    /// Whether the image is now on disk
    pub success: bool,
}

/// Downloads images with the shared HTTP client
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Creates a downloader; the client carries the browser-like user agent
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Streams `url` into `path`, creating parent directories as needed
    ///
    /// The body is written to a `.part` sibling first and renamed over `path`
    /// once complete, so a failed attempt leaves any earlier copy untouched and
    /// a repeated download overwrites the same file.
    pub async fn download(&self, url: &Url, path: &Path) -> DownloadOutcome {
        tracing::debug!("Trying to download [{}]", path.display());

        let success = match self.save(url, path).await {
            Ok(bytes) => {
                tracing::info!("Saved [{}] ({} bytes)", path.display(), bytes);
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Could not save [{}] from [{}] because [{}]",
                    path.display(),
                    url,
                    e
                );
                false
            }
        };

        DownloadOutcome {
            url: url.clone(),
            path: path.to_path_buf(),
            success,
        }
    }

    async fn save(&self, url: &Url, path: &Path) -> Result<u64, DownloadError> {
        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let partial = partial_path(path);
        let written = match stream_to_file(&mut response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, path).await?;
        Ok(written)
    }
}

async fn stream_to_file(
    response: &mut reqwest::Response,
    path: &Path,
) -> Result<u64, DownloadError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
