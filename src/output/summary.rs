//! End-of-run statistics for one comic

use crate::state::CrawlState;
use chrono::{DateTime, Utc};

/// Summary statistics for a finished comic run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub comic_title: String,

    /// Terminal state the run ended in (`Done` or `Aborted`)
    pub state: CrawlState,

    /// Number of pages recorded in the run's history
    pub pages_visited: usize,

    /// Image URLs extracted across all visited pages
    pub images_found: usize,

    /// Images that were saved to disk
    pub images_downloaded: usize,

    /// Why the run stopped early, if it did
    pub abort_reason: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Returns true if the run stopped on a fetch or structural error
    pub fn is_aborted(&self) -> bool {
        self.state == CrawlState::Aborted
    }

    /// Images that were found but could not be saved
    pub fn images_missed(&self) -> usize {
        self.images_found.saturating_sub(self.images_downloaded)
    }

    /// Wall-clock duration of the run in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }

    /// Returns the download success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.images_found == 0 {
            return 0.0;
        }
        (self.images_downloaded as f64 / self.images_found as f64) * 100.0
    }
}
