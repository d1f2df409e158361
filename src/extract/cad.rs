//! Extraction strategy for Ctrl+Alt+Del (cad-comic.com)
//!
//! Strip pages render exactly one `.comicpage` container. The comic image is
//! an `<img>` wrapped in an anchor that is a direct child of the container,
//! and the next strip is a direct-child anchor carrying `rel="next"`. The page
//! title reads `<strip title> | <site name>`.

use crate::crawler::sanitize;
use crate::extract::page::child_elements;
use crate::extract::{ExtractError, ExtractionStrategy, Page};
use scraper::ElementRef;
use url::Url;

const COMIC_ELEMENT: &str = ".comicpage";
const TITLE_DELIMITER: char = '|';

/// Ctrl+Alt+Del extraction strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct CtrlAltDel;

impl CtrlAltDel {
    /// Returns the single comic container, failing on any other count
    fn comic_element<'a>(&self, page: &'a Page) -> Result<ElementRef<'a>, ExtractError> {
        tracing::debug!(
            "[{}]: Locating [{}] element",
            page.title(),
            COMIC_ELEMENT
        );
        let elements = page.select_all(COMIC_ELEMENT)?;
        match elements.as_slice() {
            [element] => Ok(*element),
            _ => Err(ExtractError::structure(format!(
                "Was expecting 1 [{}] element but instead found {}",
                COMIC_ELEMENT,
                elements.len()
            ))),
        }
    }
}

fn has_next_rel(anchor: &ElementRef<'_>) -> bool {
    anchor
        .value()
        .attr("rel")
        .map(|rel| {
            rel.split_whitespace()
                .any(|token| token.eq_ignore_ascii_case("next"))
        })
        .unwrap_or(false)
}

impl ExtractionStrategy for CtrlAltDel {
    fn name(&self) -> &'static str {
        "cad"
    }

    fn scrape_image_urls(&self, page: &Page) -> Result<Vec<Url>, ExtractError> {
        tracing::info!("[{}]: Processing [{}]", page.title(), page.base_url());
        let comic = self.comic_element(page)?;

        let images: Vec<ElementRef<'_>> = child_elements(comic, "a")
            .flat_map(|anchor| child_elements(anchor, "img"))
            .collect();
        if images.len() != 1 {
            return Err(ExtractError::structure(format!(
                "Was expecting 1 image but instead found {}",
                images.len()
            )));
        }

        tracing::debug!("[{}]: Constructing image URLs", page.title());
        Ok(images
            .iter()
            .filter_map(|image| {
                let src = image.value().attr("src").unwrap_or_default();
                match page.resolve(src) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!("[{}] was not a valid url ({}). Image URL ignored.", src, e);
                        None
                    }
                }
            })
            .collect())
    }

    fn find_next_link(&self, page: &Page) -> Result<Option<Url>, ExtractError> {
        tracing::info!(
            "[{}]: Finding next link in [{}]",
            page.title(),
            page.base_url()
        );
        let comic = self.comic_element(page)?;

        let next_links: Vec<ElementRef<'_>> =
            child_elements(comic, "a").filter(has_next_rel).collect();

        let next_link = match next_links.as_slice() {
            [] => {
                tracing::info!("There is no next link. Probably reached the end for now...");
                return Ok(None);
            }
            [link] => *link,
            _ => {
                return Err(ExtractError::structure(format!(
                    "Was expecting 1 next link but instead found {}",
                    next_links.len()
                )))
            }
        };

        let href = next_link.value().attr("href").unwrap_or_default();
        page.resolve(href).map(Some).map_err(|e| {
            ExtractError::structure(format!(
                "[{}]: Found next link element at [{}] but its href was unusable ({})",
                page.title(),
                page.base_url(),
                e
            ))
        })
    }

    fn title(&self, page: &Page) -> Result<String, ExtractError> {
        let raw = page.title();
        let Some(index) = raw.rfind(TITLE_DELIMITER) else {
            return Err(ExtractError::structure(format!(
                "Was expecting a [{}] delimiter in the page title [{}]",
                TITLE_DELIMITER, raw
            )));
        };

        let title = sanitize(raw[..index].trim());
        if title.trim().is_empty() {
            return Err(ExtractError::structure(format!(
                "Page title [{}] has no text before the [{}] delimiter",
                raw, TITLE_DELIMITER
            )));
        }
        Ok(title)
    }
}
