//! Output module for run summaries
//!
//! This module handles:
//! - The `RunSummary` built by the crawl engine
//! - Rendering a summary as a plain-text block framed by a title banner
//! - The sinks human-readable output is written to

mod sink;
mod summary;

pub use sink::{MemorySink, ReportSink, StdoutSink};
pub use summary::RunSummary;

/// Formats the title banner that frames a summary
pub fn banner(comic_title: &str) -> String {
    format!("================ [{}] ================", comic_title)
}

/// Formats a run summary as plain text (without the banner)
///
/// Every run renders the same counters; aborted runs lead with the reason.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut lines = Vec::new();

    if let Some(reason) = &summary.abort_reason {
        lines.push(format!("EXITED ABRUPTLY! ({})", reason));
    }
    lines.push(format!("Visited {} pages.", summary.pages_visited));
    lines.push(format!("Found {} images.", summary.images_found));
    lines.push(format!("Downloaded {} images.", summary.images_downloaded));
    if summary.images_missed() > 0 {
        lines.push(format!("Missed {} images.", summary.images_missed()));
    }
    lines.push(format!(
        "Finished operation in {}s. Exiting...",
        summary.duration_seconds()
    ));

    lines.join("\n")
}

/// Writes a summary, framed by its title banner, to a sink
pub fn report(summary: &RunSummary, sink: &dyn ReportSink) {
    let banner = banner(&summary.comic_title);
    sink.emit(&format!(
        "\n{}\n{}\n{}\n",
        banner,
        render_summary(summary),
        banner
    ));
}
