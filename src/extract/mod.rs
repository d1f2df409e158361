//! Site-specific extraction strategies
//!
//! Every supported comic site implements the same three-operation contract,
//! `ExtractionStrategy`, over a parsed `Page`:
//! - `scrape_image_urls`: the absolute URLs of the comic image(s) on the page
//! - `find_next_link`: the next strip, or `None` at the end of the archive
//! - `title`: a sanitized chapter/page label used for file naming
//!
//! The set of sites is closed (`Site`) and a strategy is chosen per comic when
//! its job is built. Strategies share the contract only; each site has its
//! own selector logic and title derivation.

mod cad;
mod interrobang;
mod page;

pub use cad::CtrlAltDel;
pub use interrobang::Interrobang;
pub use page::Page;

use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Errors raised while extracting data from a page
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page no longer matches the hardcoded selector contract for its site
    #[error("Unexpected website structure: {0}")]
    UnexpectedWebsiteStructure(String),

    #[error("Invalid selector {0}")]
    InvalidSelector(String),
}

impl ExtractError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Self::UnexpectedWebsiteStructure(message.into())
    }
}

/// The extraction contract every supported site fulfils
pub trait ExtractionStrategy: Send + Sync {
    /// Short site name used in logs
    fn name(&self) -> &'static str;

    /// Locates the comic image(s) on the page and resolves them to absolute URLs
    ///
    /// Fails with `UnexpectedWebsiteStructure` when the container or image count
    /// differs from what the site is known to render. References that cannot
    /// be resolved to an absolute URL are dropped with a warning.
    fn scrape_image_urls(&self, page: &Page) -> Result<Vec<Url>, ExtractError>;

    /// Locates the "next" control
    ///
    /// * `Ok(None)` - the control is structurally absent (end of archive)
    /// * `Ok(Some(url))` - absolute URL of the next page
    /// * `Err(UnexpectedWebsiteStructure)` - the control is present but
    ///   malformed or ambiguous
    fn find_next_link(&self, page: &Page) -> Result<Option<Url>, ExtractError>;

    /// Derives the sanitized chapter/page title
    fn title(&self, page: &Page) -> Result<String, ExtractError>;
}

/// Supported comic sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Site {
    /// cad-comic.com
    #[serde(rename = "cad", alias = "ctrl-alt-del")]
    CtrlAltDel,

    /// interrobangstudios.com
    #[serde(rename = "interrobang")]
    Interrobang,
}

impl Site {
    /// Returns the extraction strategy for this site
    pub fn strategy(&self) -> &'static dyn ExtractionStrategy {
        match self {
            Self::CtrlAltDel => &CtrlAltDel,
            Self::Interrobang => &Interrobang,
        }
    }

    /// The identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CtrlAltDel => "cad",
            Self::Interrobang => "interrobang",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything extracted from a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Absolute image URLs in document order (possibly empty)
    pub image_urls: Vec<Url>,

    /// Sanitized page/chapter title
    pub title: String,

    /// Absolute URL of the next page, `None` at the end of the archive
    pub next_page: Option<Url>,
}

/// Runs all three strategy operations against a page
///
/// The first structural error wins; nothing partial is returned.
pub fn extract_page(
    strategy: &dyn ExtractionStrategy,
    page: &Page,
) -> Result<ExtractionResult, ExtractError> {
    let image_urls = strategy.scrape_image_urls(page)?;
    let title = strategy.title(page)?;
    let next_page = strategy.find_next_link(page)?;

    Ok(ExtractionResult {
        image_urls,
        title,
        next_page,
    })
}
