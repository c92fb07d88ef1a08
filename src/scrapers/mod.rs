//! Saint of the Day scrapers.
//!
//! Each source has its own page shape and its own boilerplate, so each one
//! gets its own module with its own parsing rules:
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Franciscan Media | [`franciscan`] | HTML scraping | One page; summary capped at 500 chars |
//! | Catholic Online | [`catholic_online`] | HTML scraping | Landing page, then saint page; image + up to 4 paragraphs |
//!
//! # Fault isolation
//!
//! Sources implement [`SaintSource::fetch_record`], which reports *why* it
//! failed through [`ExtractError`]. Callers go through [`extract`], which logs
//! the reason and collapses every failure (including a panic) to `None`, so one
//! broken site never takes the other down with it.

pub mod catholic_online;
pub mod fetch;
pub mod franciscan;

use crate::models::SaintRecord;
use futures::FutureExt;
use scraper::ElementRef;
use std::panic::AssertUnwindSafe;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Why a single source produced no record.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Connection failure or timeout.
    #[error("network failure fetching {url}: {reason}")]
    Network { url: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// An expected element is missing; the site layout probably changed.
    #[error("unexpected page structure: {0}")]
    Parse(String),

    /// The page parsed but a required field was empty.
    #[error("required field `{0}` was empty")]
    Empty(&'static str),
}

impl ExtractError {
    pub(crate) fn network(url: &str, e: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }

    /// Coarse failure class used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } | Self::Status { .. } => "network",
            Self::Parse(_) => "parse",
            Self::Empty(_) => "empty",
        }
    }
}

/// A site that can produce today's saint.
pub trait SaintSource: Send + Sync {
    /// Attribution label, copied into every record this source produces.
    fn label(&self) -> &'static str;

    /// Fetch and parse today's saint.
    fn fetch_record(&self) -> impl Future<Output = Result<SaintRecord, ExtractError>> + Send;
}

/// Run one source behind a fault-isolation boundary.
///
/// Errors and panics are logged and turned into `None`.
#[instrument(level = "info", skip_all, fields(source = source.label()))]
pub async fn extract<S: SaintSource>(source: &S) -> Option<SaintRecord> {
    match AssertUnwindSafe(source.fetch_record()).catch_unwind().await {
        Ok(Ok(record)) => {
            info!(name = %record.name, has_image = record.image_url.is_some(), "Extracted saint");
            Some(record)
        }
        Ok(Err(e)) => {
            warn!(kind = e.kind(), error = %e, "Source produced no saint");
            None
        }
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(%reason, "Source panicked while scraping");
            None
        }
    }
}

/// Text content of an element with whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Collapse whitespace runs to one space and trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
