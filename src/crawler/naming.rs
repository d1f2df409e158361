//! File naming policy for downloaded images
//!
//! A saved image is named `NNNN <title> - <segment>` where `NNNN` is the
//! zero-padded page sequence index, `<title>` the page's chapter title and
//! `<segment>` whatever follows the last `/` of the image URL. Characters that
//! are illegal on common filesystems are stripped from the result, which also
//! removes every path separator.

use crate::url::trailing_segment;
use std::path::{Path, PathBuf};
use url::Url;

/// Characters removed from every derived name
pub const FORBIDDEN_CHARS: &[char] = &['?', '<', '>', '*', ':', '|', '/', '\\'];

/// Removes every character in `FORBIDDEN_CHARS`
///
/// # Examples
///
/// ```
/// use comic_harvest::crawler::sanitize;
///
/// assert_eq!(sanitize("What? <Really>*: a|b/c\\d"), "What Really abcd");
/// ```
pub fn sanitize(name: &str) -> String {
    name.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect()
}

/// Folder name used for a comic's downloads
pub fn directory_name(comic_title: &str) -> String {
    sanitize(comic_title).trim().to_string()
}

/// Derives the file name for an image
///
/// # Arguments
///
/// * `sequence` - Page sequence index (1-based, from `History::record`)
/// * `title` - Chapter/page title of the page the image was found on
/// * `image_url` - Absolute image URL
///
/// # Examples
///
/// ```
/// use comic_harvest::crawler::file_name;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/img/042.png").unwrap();
/// assert_eq!(file_name(7, "Nice Melon", &url), "0007 Nice Melon - 042.png");
/// ```
pub fn file_name(sequence: u32, title: &str, image_url: &Url) -> String {
    let raw = format!(
        "{:04} {} - {}",
        sequence,
        title,
        trailing_segment(image_url)
    );
    sanitize(&raw)
}

/// Joins the derived file name onto a destination directory
pub fn image_path(destination: &Path, sequence: u32, title: &str, image_url: &Url) -> PathBuf {
    destination.join(file_name(sequence, title, image_url))
}
