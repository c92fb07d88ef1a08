//! Acquisition orchestrator.
//!
//! [`SaintService`] is the single entry point used by both the scheduled post
//! and the on-demand command. It owns the [`DailyCache`], runs both scrapers
//! concurrently on a miss, and applies the merge policy.

use crate::cache::DailyCache;
use crate::merge::merge;
use crate::models::{Merged, SaintRecord};
use crate::scrapers::{SaintSource, extract};
use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

/// Fetches, merges, and caches today's saint.
#[derive(Debug)]
pub struct SaintService<A, B> {
    primary_source: A,
    secondary_source: B,
    cache: DailyCache,
}

impl<A, B> SaintService<A, B>
where
    A: SaintSource,
    B: SaintSource,
{
    /// `primary_source` wins whenever both sources succeed.
    pub fn new(primary_source: A, secondary_source: B) -> Self {
        Self {
            primary_source,
            secondary_source,
            cache: DailyCache::new(),
        }
    }

    /// Today's saint, from the cache when possible.
    pub async fn todays_saint(&self) -> Option<SaintRecord> {
        self.saint_on(today()).await
    }

    /// Today's saint plus any different saint reported by the second source.
    pub async fn todays_saints(&self) -> Merged {
        self.saints_on(today()).await
    }

    /// The primary saint for `date`.
    #[instrument(level = "info", skip(self))]
    pub async fn saint_on(&self, date: NaiveDate) -> Option<SaintRecord> {
        let record = self
            .cache
            .get_or_acquire(date, move || async move { self.acquire().await.primary })
            .await;
        if record.is_none() {
            warn!("No source produced a saint");
        }
        record
    }

    /// Primary and secondary saints for `date`.
    ///
    /// The secondary is never cached. On a cache hit only the second source is
    /// scraped again, and it is merged against the cached primary.
    #[instrument(level = "info", skip(self))]
    pub async fn saints_on(&self, date: NaiveDate) -> Merged {
        let mut fresh_secondary = None;
        let mut acquired = false;
        let (secondary_slot, acquired_flag) = (&mut fresh_secondary, &mut acquired);
        let primary = self
            .cache
            .get_or_acquire(date, move || async move {
                *acquired_flag = true;
                let merged = self.acquire().await;
                *secondary_slot = merged.secondary;
                merged.primary
            })
            .await;

        let Some(primary) = primary else {
            warn!("No source produced a saint");
            return Merged::default();
        };
        if acquired {
            return Merged {
                primary: Some(primary),
                secondary: fresh_secondary,
            };
        }

        info!(name = %primary.name, "Primary served from cache; refreshing second source");
        let second = extract(&self.secondary_source).await;
        merge(Some(primary), second)
    }

    /// Run both scrapers concurrently and merge their results.
    #[instrument(level = "info", skip(self))]
    async fn acquire(&self) -> Merged {
        let (a, b) = futures::join!(
            extract(&self.primary_source),
            extract(&self.secondary_source)
        );
        info!(
            primary_ok = a.is_some(),
            secondary_ok = b.is_some(),
            "Scraped both sources"
        );
        merge(a, b)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
