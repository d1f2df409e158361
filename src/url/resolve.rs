use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a raw attribute value (href, src, content) to an absolute URL
///
/// # Resolution Rules
///
/// 1. Trim surrounding whitespace; reject empty references
/// 2. Join the reference against the page's base URL (absolute references
///    replace the base entirely)
/// 3. Accept only HTTP and HTTPS results
///
/// # Arguments
///
/// * `base` - The base URL of the page the reference was found on
/// * `reference` - The raw attribute value
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(UrlError)` - The reference is empty, malformed, or not HTTP(S)
///
/// # Examples
///
/// ```
/// use comic_harvest::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://cad-comic.com/comic/nice-melon/").unwrap();
/// let url = resolve_url(&base, "/wp-content/uploads/042.png").unwrap();
/// assert_eq!(url.as_str(), "https://cad-comic.com/wp-content/uploads/042.png");
/// ```
pub fn resolve_url(base: &Url, reference: &str) -> UrlResult<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(UrlError::Empty);
    }

    let resolved = base
        .join(reference)
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))?;

    ensure_http(&resolved)?;
    Ok(resolved)
}

/// Rejects any URL whose scheme is not HTTP or HTTPS
pub fn ensure_http(url: &Url) -> UrlResult<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}
