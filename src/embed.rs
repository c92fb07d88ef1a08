//! Rich-message rendering for saints.
//!
//! [`SaintEmbed`] serializes in the shape of a Discord webhook embed, so the
//! delivery layer can send it as-is.

use crate::models::{Merged, SaintRecord};
use serde::Serialize;

/// Accent color used for every saint embed.
pub const EMBED_COLOR: u32 = 0xC9A227;

/// Heading for the main saint.
pub const PRIMARY_HEADING: &str = "Saint of the Day";
/// Heading for a different saint reported by the second source.
pub const SECONDARY_HEADING: &str = "Also Celebrated Today";

const NO_SUMMARY: &str = "No biography available.";
const APOLOGY: &str =
    "Sorry, I couldn't fetch today's saint right now. Please try again later. 🙏";
const GREETING: &str = "Hello! I am your friendly Catholic Discord bot. Did you pray today?";

/// A rendered saint message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaintEmbed {
    pub title: String,
    pub description: String,
    /// Link on the title, back to the source page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Render one saint under `heading`.
pub fn render(record: &SaintRecord, heading: &str) -> SaintEmbed {
    SaintEmbed {
        title: format!("{heading}: {}", record.name),
        description: record
            .summary
            .clone()
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        url: record.page_url.clone(),
        color: EMBED_COLOR,
        image: record
            .image_url
            .as_ref()
            .map(|url| EmbedImage { url: url.clone() }),
        footer: EmbedFooter {
            text: format!("Source: {}", record.source_label),
        },
    }
}

/// Render the primary saint and, if present, the secondary one.
pub fn render_merged(merged: &Merged) -> Vec<SaintEmbed> {
    let primary = merged
        .primary
        .iter()
        .map(|record| render(record, PRIMARY_HEADING));
    let secondary = merged
        .secondary
        .iter()
        .map(|record| render(record, SECONDARY_HEADING));
    primary.chain(secondary).collect()
}

/// Reply sent when no source produced a saint.
pub fn apology() -> &'static str {
    APOLOGY
}

/// Reply to the `hello` command.
pub fn greeting() -> &'static str {
    GREETING
}
