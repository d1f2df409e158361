//! URL handling module for Comic-Harvest
//!
//! This module resolves the relative references found in comic pages into
//! absolute URLs and extracts the trailing path segment used for file naming.

mod resolve;

use url::Url;

// Re-export main functions
pub use resolve::{ensure_http, resolve_url};

/// Returns the substring of a URL after its last `/`
///
/// The whole serialized URL is considered, so a query string that follows the
/// final path segment is kept (and later sanitized by the filename policy).
///
/// # Examples
///
/// ```
/// use comic_harvest::url::trailing_segment;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/img/042.png").unwrap();
/// assert_eq!(trailing_segment(&url), "042.png");
/// ```
pub fn trailing_segment(url: &Url) -> &str {
    let serialized = url.as_str();
    match serialized.rfind('/') {
        Some(index) => &serialized[index + 1..],
        None => serialized,
    }
}
