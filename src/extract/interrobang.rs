//! Extraction strategy for Interrobang Studios (interrobangstudios.com)
//!
//! The strip image and title are published as open-graph metadata in the
//! document head. Navigation lives in a `.comic-rightnav` bar whose first child
//! is an anchor to the next strip, or a non-link placeholder on the latest one.

use crate::crawler::sanitize;
use crate::extract::{ExtractError, ExtractionStrategy, Page};
use scraper::ElementRef;
use url::Url;

const META_ELEMENTS: &str = "head meta[property]";
const PROP_IMAGE: &str = "og:image";
const PROP_TITLE: &str = "og:title";
const NEXT_NAV: &str = ".comic-rightnav";

/// Interrobang Studios extraction strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct Interrobang;

fn property_is(element: &ElementRef<'_>, property: &str) -> bool {
    element.value().attr("property") == Some(property)
}

impl ExtractionStrategy for Interrobang {
    fn name(&self) -> &'static str {
        "interrobang"
    }

    fn scrape_image_urls(&self, page: &Page) -> Result<Vec<Url>, ExtractError> {
        tracing::info!("[{}]: Processing [{}]", page.title(), page.base_url());
        tracing::debug!(
            "[{}]: Locating [{}] elements containing images",
            page.title(),
            META_ELEMENTS
        );
        let metas = page.select_all(META_ELEMENTS)?;
        if metas.is_empty() {
            return Err(ExtractError::structure(format!(
                "Was expecting [{}] elements but instead found 0",
                META_ELEMENTS
            )));
        }

        let images: Vec<&ElementRef<'_>> = metas
            .iter()
            .filter(|meta| property_is(meta, PROP_IMAGE))
            .collect();
        if images.len() != 1 {
            return Err(ExtractError::structure(format!(
                "Was expecting 1 [{}] element but instead found {}",
                PROP_IMAGE,
                images.len()
            )));
        }

        tracing::debug!("[{}]: Constructing image URLs", page.title());
        Ok(images
            .iter()
            .filter_map(|meta| {
                let content = meta.value().attr("content").unwrap_or_default();
                match page.resolve(content) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!(
                            "[{}] was not a valid url ({}). Image URL ignored.",
                            content,
                            e
                        );
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
        let navs = page.select_all(NEXT_NAV)?;
        let Some(nav) = navs.first() else {
            return Err(ExtractError::structure(format!(
                "Was expecting a [{}] element but instead found 0",
                NEXT_NAV
            )));
        };

        let control = nav.children().find_map(ElementRef::wrap);
        let anchor = match control {
            Some(element) if element.value().name().eq_ignore_ascii_case("a") => element,
            Some(element) => {
                tracing::debug!(
                    "[{}]: Next control is a <{}>, not a link",
                    page.title(),
                    element.value().name()
                );
                tracing::info!("There is no next link. Probably reached the end for now...");
                return Ok(None);
            }
            None => {
                tracing::info!("There is no next link. Probably reached the end for now...");
                return Ok(None);
            }
        };

        let href = anchor.value().attr("href").unwrap_or_default();
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
        let metas = page.select_all(META_ELEMENTS)?;
        let content = metas
            .iter()
            .find(|meta| property_is(meta, PROP_TITLE))
            .and_then(|meta| meta.value().attr("content"))
            .unwrap_or_default();

        let title = sanitize(content.trim());
        if title.trim().is_empty() {
            return Err(ExtractError::structure(format!(
                "Was expecting a non-empty [{}] value at [{}]",
                PROP_TITLE,
                page.base_url()
            )));
        }
        Ok(title)
    }
}
