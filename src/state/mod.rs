//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The state machine of one comic run (running, done, aborted)
//! - `History`: Append-only log of visited page titles, also the source of the
//!   sequence index used for file naming

mod crawl_state;
mod history;

// Re-export main types
pub use crawl_state::CrawlState;
pub use history::History;
