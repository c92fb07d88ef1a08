//! Single-slot, date-keyed cache for today's saint.
//!
//! The slot holds at most one record, valid for exactly one calendar day.
//! A failed acquisition never overwrites it. The slot lock is held while an
//! acquisition runs, so concurrent callers on a miss wait for the first one
//! and then read its result instead of scraping again.

use crate::models::SaintRecord;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct Slot {
    entry: Option<(NaiveDate, SaintRecord)>,
}

impl Slot {
    fn get(&self, today: NaiveDate) -> Option<&SaintRecord> {
        match &self.entry {
            Some((date, record)) if *date == today => Some(record),
            _ => None,
        }
    }
}

/// Date-keyed cache holding the primary record.
#[derive(Debug, Default)]
pub struct DailyCache {
    slot: Mutex<Slot>,
}

impl DailyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return today's cached record without acquiring.
    #[cfg(test)]
    pub async fn peek(&self, today: NaiveDate) -> Option<SaintRecord> {
        self.slot.lock().await.get(today).cloned()
    }

    /// Return the record cached for `today`, or run `acquire` once to get one.
    ///
    /// A present result replaces whatever the slot held. An absent result
    /// leaves the slot untouched.
    pub async fn get_or_acquire<F, Fut>(&self, today: NaiveDate, acquire: F) -> Option<SaintRecord>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<SaintRecord>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(record) = slot.get(today) {
            debug!(%today, name = %record.name, "Cache hit");
            return Some(record.clone());
        }

        debug!(%today, "Cache miss; acquiring");
        let record = acquire().await?;
        info!(%today, name = %record.name, source = %record.source_label, "Cached today's saint");
        slot.entry = Some((today, record.clone()));
        Some(record)
    }
}
