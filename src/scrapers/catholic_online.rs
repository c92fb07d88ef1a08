//! Catholic Online Saint of the Day scraper.
//!
//! Two requests:
//!
//! 1. The landing page, where the first link matching
//!    `/saints/saint.php?saint_id=<n>` points at today's saint.
//! 2. That saint page, which supplies:
//!    - the name, from the first `h1`
//!    - an image, from the first `img` whose `alt` mentions "Image of"
//!    - a summary, from up to [`MAX_PARAGRAPHS`] substantial paragraphs that
//!      are not site boilerplate
//!
//! Only the name is required. Summary and image are optional.

use super::fetch::PageFetcher;
use super::{ExtractError, SaintSource, element_text};
use crate::models::SaintRecord;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

pub const BASE_URL: &str = "https://www.catholic.org";
pub const LANDING_URL: &str = "https://www.catholic.org/saints/sofd.php";
pub const LABEL: &str = "Catholic Online";

/// Paragraphs with this many characters or fewer are ignored.
pub const MIN_PARAGRAPH_CHARS: usize = 50;
/// Accumulation stops after this many paragraphs.
pub const MAX_PARAGRAPHS: usize = 4;
/// Longest summary kept from this source, in characters.
pub const SUMMARY_LIMIT: usize = 1500;

/// Lowercased markers of paragraphs that are site chrome rather than biography.
pub const BOILERPLATE_MARKERS: &[&str] = &[
    "subscribe",
    "print this",
    "shop catholic",
    "copyright",
    "©",
    "all rights reserved",
    "publisher",
    "catholic online is a project",
    "your catholic voice foundation",
    "tax-exempt",
    "tax id",
    "501(c)(3)",
    "not-for-profit",
    "nonprofit",
];

const IMAGE_ALT_MARKER: &str = "Image of";

static SAINT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/saints/saint\.php\?saint_id=\d+").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img[alt]").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Scraper for Catholic Online.
#[derive(Debug, Clone)]
pub struct CatholicOnline<F> {
    fetcher: F,
    landing_url: String,
    base: Url,
}

impl<F: PageFetcher> CatholicOnline<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            landing_url: LANDING_URL.to_string(),
            base: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
        }
    }
}

impl<F: PageFetcher> SaintSource for CatholicOnline<F> {
    fn label(&self) -> &'static str {
        LABEL
    }

    #[instrument(level = "info", skip_all, fields(landing = %self.landing_url))]
    async fn fetch_record(&self) -> Result<SaintRecord, ExtractError> {
        let landing = self.fetcher.get(&self.landing_url).await?;
        let saint_url = find_saint_link(&landing, &self.base).ok_or_else(|| {
            ExtractError::Parse("no saint link on the landing page".to_string())
        })?;
        info!(%saint_url, "Resolved today's saint page");

        let html = self.fetcher.get(saint_url.as_str()).await?;
        Ok(parse_saint_page(&html, &self.base)?.with_page_url(saint_url))
    }
}

/// First landing-page link that points at a saint page, made absolute.
pub fn find_saint_link(html: &str, base: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| SAINT_LINK.is_match(href))
        .and_then(|href| base.join(href.trim()).ok())
}

/// Parse a saint page. Only the name is required.
pub fn parse_saint_page(html: &str, base: &Url) -> Result<SaintRecord, ExtractError> {
    let document = Html::parse_document(html);

    let name = document
        .select(&NAME_SELECTOR)
        .next()
        .map(element_text)
        .ok_or_else(|| ExtractError::Parse("no h1 heading".to_string()))?;
    if name.is_empty() {
        return Err(ExtractError::Empty("name"));
    }

    let image_url = pick_image(&document, base);
    let summary = collect_summary(document.select(&PARAGRAPH_SELECTOR).map(element_text));
    debug!(
        %name,
        has_image = image_url.is_some(),
        summary_chars = summary.as_ref().map(|s| s.chars().count()).unwrap_or(0),
        "Parsed Catholic Online page"
    );

    SaintRecord::new(name, summary, image_url, LABEL).ok_or(ExtractError::Empty("name"))
}

/// First "Image of ..." picture with a loadable URL.
///
/// `data-src` (lazy loading) wins over `src`; inline `data:` placeholders are
/// skipped.
pub fn pick_image(document: &Html, base: &Url) -> Option<String> {
    document
        .select(&IMAGE_SELECTOR)
        .filter(|img| {
            img.value()
                .attr("alt")
                .is_some_and(|alt| alt.contains(IMAGE_ALT_MARKER))
        })
        .find_map(|img| image_source(img, base))
}

fn image_source(img: ElementRef<'_>, base: &Url) -> Option<String> {
    let el = img.value();
    let non_empty = |name: &str| el.attr(name).map(str::trim).filter(|s| !s.is_empty());
    let src = non_empty("data-src").or_else(|| non_empty("src"))?;
    if src.starts_with("data:") {
        return None;
    }
    base.join(src).ok().map(String::from)
}

/// True when a paragraph is site chrome rather than biography.
pub fn is_boilerplate(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    BOILERPLATE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Join the first qualifying paragraphs into a summary.
///
/// A paragraph qualifies when it is not boilerplate and its trimmed text is
/// longer than [`MIN_PARAGRAPH_CHARS`]. Returns `None` when none qualify.
pub fn collect_summary<I>(paragraphs: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let joined = paragraphs
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !is_boilerplate(p))
        .filter(|p| p.chars().count() > MIN_PARAGRAPH_CHARS)
        .take(MAX_PARAGRAPHS)
        .join(" ");

    if joined.is_empty() {
        None
    } else {
        Some(truncate_at_sentence(&joined, SUMMARY_LIMIT))
    }
}

/// Cut to at most `limit` characters, ending on the last full stop in range.
///
/// With no full stop in the first `limit` characters, cut hard and append `...`.
pub fn truncate_at_sentence(text: &str, limit: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(limit) else {
        return text.to_string();
    };
    let window = &text[..cut];
    match window.rfind('.') {
        Some(period) => window[..=period].to_string(),
        None => format!("{window}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::fetch::testing::StaticPages;

    fn base() -> Url {
        Url::parse(BASE_URL).unwrap()
    }

    fn long(word: &str) -> String {
        format!("{word} {}", "lived a holy life in service of the poor. ".repeat(2))
    }

    const LANDING: &str = r#"<html><body>
        <a href="/saints/">All saints</a>
        <a href="/saints/saint.php?saint_id=311">Saint Hedwig</a>
        <a href="/saints/saint.php?saint_id=999">Yesterday</a>
    </body></html>"#;

    const SAINT_PAGE: &str = r#"<html><body>
        <h1> St. Hedwig </h1>
        <img alt="Catholic Online logo" src="/images/logo.png">
        <img alt="Image of St. Hedwig" src="data:image/gif;base64,R0lGOD">
        <img alt="Image of St. Hedwig" data-src="/files/images/saints/311.jpg" src="data:image/gif;base64,R0lGOD">
        <img alt="Image of St. Hedwig again" src="/files/images/saints/311b.jpg">
        <p>Hedwig was the daughter of the Duke of Carinthia and aunt of St. Elizabeth.</p>
        <p>Subscribe to our newsletter to receive the saint of the day in your inbox every morning.</p>
        <p>Short line.</p>
        <p>She married Henry, Duke of Silesia, and bore him seven children together.</p>
        <p>Catholic Online is a Project of Your Catholic Voice Foundation, a Not-for-Profit Corporation.</p>
    </body></html>"#;

    #[test]
    fn test_find_saint_link_takes_first_match_and_resolves() {
        let url = find_saint_link(LANDING, &base()).unwrap();
        assert_eq!(url.as_str(), "https://www.catholic.org/saints/saint.php?saint_id=311");
    }

    #[test]
    fn test_find_saint_link_keeps_absolute_links() {
        let html = r#"<a href="https://www.catholic.org/saints/saint.php?saint_id=42">x</a>"#;
        let url = find_saint_link(html, &base()).unwrap();
        assert_eq!(url.as_str(), "https://www.catholic.org/saints/saint.php?saint_id=42");
    }

    #[test]
    fn test_find_saint_link_none() {
        assert!(find_saint_link(r#"<a href="/saints/">All</a>"#, &base()).is_none());
    }

    #[test]
    fn test_parse_saint_page() {
        let record = parse_saint_page(SAINT_PAGE, &base()).unwrap();

        assert_eq!(record.name, "St. Hedwig");
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://www.catholic.org/files/images/saints/311.jpg")
        );
        assert_eq!(
            record.summary.as_deref(),
            Some(
                "Hedwig was the daughter of the Duke of Carinthia and aunt of St. Elizabeth. \
                 She married Henry, Duke of Silesia, and bore him seven children together."
            )
        );
        assert_eq!(record.source_label, LABEL);
    }

    #[test]
    fn test_parse_saint_page_name_only() {
        let record = parse_saint_page("<h1>St. Ignatius of Antioch</h1>", &base()).unwrap();
        assert_eq!(record.name, "St. Ignatius of Antioch");
        assert_eq!(record.summary, None);
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn test_parse_saint_page_requires_name() {
        assert!(matches!(
            parse_saint_page("<p>no heading</p>", &base()),
            Err(ExtractError::Parse(_))
        ));
        assert!(matches!(
            parse_saint_page("<h1>  </h1>", &base()),
            Err(ExtractError::Empty("name"))
        ));
    }

    #[test]
    fn test_pick_image_skips_placeholders_without_alternative() {
        let html = r#"<img alt="Image of St. Luke" src="data:image/png;base64,AAAA">"#;
        assert_eq!(pick_image(&Html::parse_document(html), &base()), None);
    }

    #[test]
    fn test_pick_image_falls_back_to_src() {
        let html = r#"<img alt="Image of St. Luke" src="https://cdn.example.com/luke.jpg">"#;
        assert_eq!(
            pick_image(&Html::parse_document(html), &base()).as_deref(),
            Some("https://cdn.example.com/luke.jpg")
        );
    }

    #[test]
    fn test_pick_image_empty_data_src_falls_back_to_src() {
        let html = r#"<img alt="Image of St. Luke" data-src="" src="/files/luke.jpg">"#;
        assert_eq!(
            pick_image(&Html::parse_document(html), &base()).as_deref(),
            Some("https://www.catholic.org/files/luke.jpg")
        );
    }

    #[test]
    fn test_subscribe_paragraph_excluded_regardless_of_length() {
        let p = format!("Please SUBSCRIBE today. {}", "x".repeat(200));
        assert!(is_boilerplate(&p));
        assert_eq!(collect_summary(vec![p]), None);
    }

    #[test]
    fn test_paragraph_length_threshold() {
        let forty = "a".repeat(40);
        let sixty = "b".repeat(60);
        assert_eq!(collect_summary(vec![forty]), None);
        assert_eq!(collect_summary(vec![sixty.clone()]), Some(sixty));
    }

    #[test]
    fn test_paragraph_of_exactly_fifty_chars_excluded() {
        assert_eq!(collect_summary(vec!["c".repeat(50)]), None);
    }

    #[test]
    fn test_accumulation_stops_after_four() {
        let paragraphs: Vec<String> = ["one", "two", "three", "four", "five"]
            .iter()
            .map(|w| long(w))
            .collect();
        let summary = collect_summary(paragraphs).unwrap();

        assert!(summary.starts_with("one "));
        assert!(summary.contains("four "));
        assert!(!summary.contains("five"));
    }

    #[test]
    fn test_truncate_at_sentence_uses_last_period() {
        let mut text = "a".repeat(1400);
        text.push('.');
        text.push_str(&"b".repeat(199));
        assert_eq!(text.chars().count(), 1600);

        let out = truncate_at_sentence(&text, SUMMARY_LIMIT);
        assert_eq!(out.chars().count(), 1401);
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_truncate_at_sentence_without_period() {
        let text = "a".repeat(1600);
        let out = truncate_at_sentence(&text, SUMMARY_LIMIT);
        assert_eq!(out, format!("{}...", "a".repeat(1500)));
    }

    #[test]
    fn test_truncate_at_sentence_ignores_period_past_limit() {
        let mut text = "a".repeat(1550);
        text.push('.');
        let out = truncate_at_sentence(&text, SUMMARY_LIMIT);
        assert_eq!(out, format!("{}...", "a".repeat(1500)));
    }

    #[test]
    fn test_truncate_at_sentence_short_text_untouched() {
        assert_eq!(truncate_at_sentence("Short. Text", SUMMARY_LIMIT), "Short. Text");
    }

    #[tokio::test]
    async fn test_fetch_record_follows_landing_link() {
        let saint_url = "https://www.catholic.org/saints/saint.php?saint_id=311";
        let pages = StaticPages::new()
            .with_page(LANDING_URL, LANDING)
            .with_page(saint_url, SAINT_PAGE);
        let source = CatholicOnline::new(pages);

        let record = source.fetch_record().await.unwrap();
        assert_eq!(record.name, "St. Hedwig");
        assert_eq!(record.page_url.as_deref(), Some(saint_url));
        assert_eq!(
            source.fetcher.requests(),
            vec![LANDING_URL.to_string(), saint_url.to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_record_without_link_is_parse_failure() {
        let pages = StaticPages::new().with_page(LANDING_URL, "<a href='/about'>About</a>");
        let source = CatholicOnline::new(pages);
        assert!(matches!(
            source.fetch_record().await,
            Err(ExtractError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_record_saint_page_failure() {
        let pages = StaticPages::new().with_page(LANDING_URL, LANDING);
        let source = CatholicOnline::new(pages);
        assert!(matches!(
            source.fetch_record().await,
            Err(ExtractError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_record_landing_failure() {
        let source = CatholicOnline::new(StaticPages::new());
        assert!(source.fetch_record().await.is_err());
        assert_eq!(source.fetcher.requests().len(), 1);
    }
}
