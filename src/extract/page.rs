//! Parsed comic page
//!
//! A `Page` wraps the parsed HTML document together with the URL that relative
//! references on it resolve against. Pages are transient: the crawl engine keeps
//! one alive only while extracting from it.

use crate::extract::ExtractError;
use crate::url::resolve_url;
use crate::UrlError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched and parsed page plus its resolved base URL
pub struct Page {
    document: Html,
    base_url: Url,
    title: String,
}

impl Page {
    /// Parses an HTML body fetched from `url`
    ///
    /// The base URL is the fetched URL (after redirects), overridden by the
    /// first `<base href>` element when it resolves to an HTTP(S) URL.
    ///
    /// # Example
    ///
    /// ```
    /// use comic_harvest::extract::Page;
    /// use url::Url;
    ///
    /// let html = r#"<html><head><title>Nice Melon | CAD Comic</title></head></html>"#;
    /// let page = Page::parse(html, Url::parse("https://cad-comic.com/comic/nice-melon/").unwrap());
    /// assert_eq!(page.title(), "Nice Melon | CAD Comic");
    /// ```
    pub fn parse(body: &str, url: Url) -> Self {
        let document = Html::parse_document(body);
        let base_url = extract_base_href(&document, &url).unwrap_or(url);
        let title = extract_title(&document);

        Self {
            document,
            base_url,
            title,
        }
    }

    /// The parsed HTML document
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// The URL relative references resolve against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whitespace-collapsed text of the `<title>` element, empty if absent
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Resolves a raw attribute value against this page's base URL
    pub fn resolve(&self, reference: &str) -> Result<Url, UrlError> {
        resolve_url(&self.base_url, reference)
    }

    /// Runs a CSS query over the whole document
    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        let selector = selector(css)?;
        Ok(self.document.select(&selector).collect())
    }
}

/// Parses a CSS selector, reporting the offending query on failure
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector(format!("{}: {:?}", css, e)))
}

/// Direct child elements of `parent` with the given tag name
pub(crate) fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name().eq_ignore_ascii_case(tag))
}

fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

fn extract_base_href(document: &Html, url: &Url) -> Option<Url> {
    let base_selector = Selector::parse("base[href]").ok()?;
    let href = document.select(&base_selector).next()?.value().attr("href")?;
    resolve_url(url, href).ok()
}
