//! Franciscan Media Saint of the Day scraper.
//!
//! A single page at a fixed URL. The saint's name is the page `h1` and the
//! biography is the `.entry-content` block. The biography is cut hard at
//! [`SUMMARY_LIMIT`] characters, without looking for a sentence boundary.

use super::fetch::PageFetcher;
use super::{ExtractError, SaintSource, element_text};
use crate::models::SaintRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

pub const PAGE_URL: &str = "https://www.franciscanmedia.org/saint-of-the-day/";
pub const LABEL: &str = "Franciscan Media";

/// Longest summary kept from this source, in characters.
pub const SUMMARY_LIMIT: usize = 500;

static NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".entry-content").unwrap());

/// Scraper for the Franciscan Media page.
#[derive(Debug, Clone)]
pub struct FranciscanMedia<F> {
    fetcher: F,
    url: String,
}

impl<F: PageFetcher> FranciscanMedia<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            url: PAGE_URL.to_string(),
        }
    }
}

impl<F: PageFetcher> SaintSource for FranciscanMedia<F> {
    fn label(&self) -> &'static str {
        LABEL
    }

    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    async fn fetch_record(&self) -> Result<SaintRecord, ExtractError> {
        let html = self.fetcher.get(&self.url).await?;
        Ok(parse_page(&html)?.with_page_url(&self.url))
    }
}

/// Parse a Franciscan Media page. Both name and summary are required.
pub fn parse_page(html: &str) -> Result<SaintRecord, ExtractError> {
    let document = Html::parse_document(html);

    let name = document
        .select(&NAME_SELECTOR)
        .next()
        .map(element_text)
        .ok_or_else(|| ExtractError::Parse("no h1 heading".to_string()))?;
    let body = document
        .select(&BODY_SELECTOR)
        .next()
        .map(element_text)
        .ok_or_else(|| ExtractError::Parse("no .entry-content block".to_string()))?;

    if name.is_empty() {
        return Err(ExtractError::Empty("name"));
    }
    if body.is_empty() {
        return Err(ExtractError::Empty("summary"));
    }

    let summary = truncate_hard(&body, SUMMARY_LIMIT);
    debug!(%name, summary_chars = summary.chars().count(), "Parsed Franciscan Media page");

    SaintRecord::new(name, Some(summary), None, LABEL).ok_or(ExtractError::Empty("name"))
}

/// Keep the first `limit` characters and append `...` when anything was cut.
pub fn truncate_hard(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
