//! Crawl engine - the pagination loop for one comic
//!
//! Each iteration fetches the current page, extracts its images and title,
//! records the page in the run history, downloads the images, then follows the
//! next link. The run ends `Done` when a page has no next link and `Aborted`
//! on the first fetch failure or structural error. Failed image downloads are
//! counted as misses and never stop the run.

use crate::config::ComicEntry;
use crate::crawler::naming::{directory_name, image_path};
use crate::crawler::{DownloadOutcome, Downloader, PageSource};
use crate::extract::{ExtractError, ExtractionStrategy, Page, Site};
use crate::output::{ReportSink, RunSummary};
use crate::state::{CrawlState, History};
use crate::{ConfigError, HarvestError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use url::Url;

/// One comic archive to crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    /// Comic title, used for reporting
    pub title: String,

    /// Extraction strategy selection
    pub site: Site,

    /// First page of the archive
    pub start_url: Url,

    /// Folder images are saved into
    pub destination: PathBuf,
}

impl CrawlJob {
    pub fn new(
        title: impl Into<String>,
        site: Site,
        start_url: Url,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            site,
            start_url,
            destination: destination.into(),
        }
    }

    /// Builds a job from a configured comic, saving under `root/<title>`
    pub fn from_entry(entry: &ComicEntry, root: &Path) -> Result<Self, ConfigError> {
        let start_url = Url::parse(&entry.start_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", entry.start_url, e))
        })?;

        Ok(Self::new(
            entry.title.clone(),
            entry.site,
            start_url,
            root.join(directory_name(&entry.title)),
        ))
    }
}

/// Per-run state owned by the engine
///
/// Carries the destination, the history (whose length is the naming sequence
/// index), the image counters and the sink for operator-facing output.
pub struct RunContext<'a> {
    comic_title: String,
    destination: PathBuf,
    history: History,
    images_found: usize,
    images_downloaded: usize,
    state: CrawlState,
    started_at: DateTime<Utc>,
    sink: &'a dyn ReportSink,
}

impl<'a> RunContext<'a> {
    pub fn new(job: &CrawlJob, sink: &'a dyn ReportSink) -> Self {
        Self {
            comic_title: job.title.clone(),
            destination: job.destination.clone(),
            history: History::new(),
            images_found: 0,
            images_downloaded: 0,
            state: CrawlState::Running,
            started_at: Utc::now(),
            sink,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    fn record_downloads(&mut self, outcomes: &[DownloadOutcome]) {
        self.images_found += outcomes.len();
        self.images_downloaded += outcomes.iter().filter(|o| o.success).count();
    }

    /// Moves the run into its terminal state and builds the summary
    fn finish(mut self, result: Result<(), HarvestError>) -> RunSummary {
        let (next, abort_reason) = match result {
            Ok(()) => (CrawlState::Done, None),
            Err(e) => (CrawlState::Aborted, Some(e.to_string())),
        };
        debug_assert!(next.is_terminal() && self.state.can_transition_to(next));
        self.state = next;

        RunSummary {
            comic_title: self.comic_title,
            state: self.state,
            pages_visited: self.history.len(),
            images_found: self.images_found,
            images_downloaded: self.images_downloaded,
            abort_reason,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

/// What one page contributed before its images are downloaded
struct PageExtraction {
    image_urls: Vec<Url>,
    title: String,
    next_link: Result<Option<Url>, ExtractError>,
}

/// Runs crawl jobs against a page source and a downloader
pub struct Crawler<'a> {
    source: &'a dyn PageSource,
    downloader: &'a Downloader,
    sink: &'a dyn ReportSink,
}

impl<'a> Crawler<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        downloader: &'a Downloader,
        sink: &'a dyn ReportSink,
    ) -> Self {
        Self {
            source,
            downloader,
            sink,
        }
    }

    /// Crawls one comic archive to completion
    ///
    /// Always returns a summary; an abort is reported through its
    /// `abort_reason` rather than as an error.
    pub async fn run(&self, job: &CrawlJob) -> RunSummary {
        tracing::info!(
            "Starting [{}] at {} with the {} strategy",
            job.title,
            job.start_url,
            job.site
        );

        let mut ctx = RunContext::new(job, self.sink);
        let result = self.crawl(job, &mut ctx).await;

        if let Err(e) = &result {
            tracing::error!(
                "[{}] aborted after {} pages (last: [{}]): {}",
                job.title,
                ctx.history().len(),
                ctx.history().last().unwrap_or("none"),
                e
            );
        }

        let summary = ctx.finish(result);
        tracing::info!(
            "[{}] finished ({}): {} pages, {}/{} images ({:.1}%)",
            summary.comic_title,
            summary.state,
            summary.pages_visited,
            summary.images_downloaded,
            summary.images_found,
            summary.success_rate()
        );
        summary
    }

    async fn crawl(&self, job: &CrawlJob, ctx: &mut RunContext<'_>) -> Result<(), HarvestError> {
        std::fs::create_dir_all(&ctx.destination)?;

        let strategy = job.site.strategy();
        let mut current = job.start_url.clone();

        while let Some(next) = self.crawl_page(strategy, &current, ctx).await? {
            current = next;
        }

        tracing::info!("[{}] reached the end of the archive", job.title);
        Ok(())
    }

    /// Processes one page and returns the next page to visit, if any
    async fn crawl_page(
        &self,
        strategy: &dyn ExtractionStrategy,
        url: &Url,
        ctx: &mut RunContext<'_>,
    ) -> Result<Option<Url>, HarvestError> {
        let document = self.source.fetch(url).await?;
        let extraction = extract(strategy, &document.body, document.url)?;

        let sequence = ctx.history.record(extraction.title.clone());

        let mut outcomes = Vec::with_capacity(extraction.image_urls.len());
        for image_url in &extraction.image_urls {
            let path = image_path(&ctx.destination, sequence, &extraction.title, image_url);
            outcomes.push(self.downloader.download(image_url, &path).await);
        }
        ctx.record_downloads(&outcomes);

        let saved = outcomes.iter().filter(|o| o.success).count();
        ctx.sink.emit(&format!(
            "[{}] {:04} {}: saved {}/{} images",
            ctx.comic_title,
            sequence,
            extraction.title,
            saved,
            outcomes.len()
        ));

        Ok(extraction.next_link?)
    }
}

/// Parses a fetched body and runs the strategy over it
///
/// The next-link lookup happens here, while the page is alive, but its error
/// is carried back unapplied so the page's images are still downloaded first.
fn extract(
    strategy: &dyn ExtractionStrategy,
    body: &str,
    url: Url,
) -> Result<PageExtraction, ExtractError> {
    let page = Page::parse(body, url);
    let image_urls = strategy.scrape_image_urls(&page)?;
    let title = strategy.title(&page)?;
    let next_link = strategy.find_next_link(&page);

    Ok(PageExtraction {
        image_urls,
        title,
        next_link,
    })
}
