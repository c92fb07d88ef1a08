//! Data models shared by the scrapers, the cache, and the renderers.
//!
//! - [`SaintRecord`]: one normalized saint as extracted from a single source
//! - [`Merged`]: the primary/secondary pair chosen by the merge policy

use serde::{Deserialize, Serialize};

/// A saint as scraped from one source.
///
/// A record is only ever built through [`SaintRecord::new`], which refuses an
/// empty name. `summary` and `image_url` are independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SaintRecord {
    /// Display name of the saint.
    pub name: String,
    /// Biography or description provided by the source.
    pub summary: Option<String>,
    /// Absolute URL of an illustrative image.
    pub image_url: Option<String>,
    /// Which source produced this record (used for attribution).
    pub source_label: String,
    /// Page the record was scraped from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

impl SaintRecord {
    /// Build a record, returning `None` when `name` is blank.
    ///
    /// Blank summaries and image URLs are normalized to `None`.
    pub fn new(
        name: impl Into<String>,
        summary: Option<String>,
        image_url: Option<String>,
        source_label: impl Into<String>,
    ) -> Option<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            summary: summary.filter(|s| !s.trim().is_empty()),
            image_url: image_url.filter(|s| !s.trim().is_empty()),
            source_label: source_label.into(),
            page_url: None,
        })
    }

    /// Attach the page the record was scraped from.
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }
}

/// Outcome of the merge policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged {
    /// The saint to show first, absent when every source failed.
    pub primary: Option<SaintRecord>,
    /// A different saint reported by the second source.
    pub secondary: Option<SaintRecord>,
}

impl Merged {
    /// True when neither source produced anything.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_name() {
        assert!(SaintRecord::new("   ", None, None, "test").is_none());
        assert!(SaintRecord::new("", Some("bio".into()), None, "test").is_none());
    }

    #[test]
    fn test_new_trims_name_and_drops_blank_optionals() {
        let record = SaintRecord::new(
            "  Saint Teresa of Avila ",
            Some("  ".into()),
            Some(String::new()),
            "Franciscan Media",
        )
        .unwrap();

        assert_eq!(record.name, "Saint Teresa of Avila");
        assert_eq!(record.summary, None);
        assert_eq!(record.image_url, None);
        assert_eq!(record.source_label, "Franciscan Media");
    }

    #[test]
    fn test_record_serialization() {
        let record = SaintRecord::new(
            "Saint Hedwig",
            Some("Duchess of Silesia.".into()),
            Some("https://example.com/hedwig.jpg".into()),
            "Catholic Online",
        )
        .unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("Saint Hedwig"));
        assert!(json.contains("Catholic Online"));
        assert!(!json.contains("page_url"));

        let linked = record.with_page_url("https://www.catholic.org/saints/saint.php?saint_id=311");
        let json = serde_json::to_value(&linked).unwrap();
        assert_eq!(
            json["page_url"],
            "https://www.catholic.org/saints/saint.php?saint_id=311"
        );
    }

    #[test]
    fn test_merged_is_empty() {
        assert!(Merged::default().is_empty());
        let merged = Merged {
            primary: SaintRecord::new("Saint Hedwig", None, None, "x"),
            secondary: None,
        };
        assert!(!merged.is_empty());
    }
}
