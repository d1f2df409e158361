//! Crawler module for walking a comic archive
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of comic pages
//! - Streaming image downloads to disk
//! - Deterministic file and folder naming
//! - The per-comic pagination loop

mod downloader;
mod engine;
mod fetcher;
mod naming;

pub use downloader::{DownloadError, DownloadOutcome, Downloader};
pub use engine::{CrawlJob, Crawler, RunContext};
pub use fetcher::{build_http_client, FetchError, FetchedDocument, HttpPageSource, PageSource};
pub use naming::{directory_name, file_name, image_path, sanitize, FORBIDDEN_CHARS};
