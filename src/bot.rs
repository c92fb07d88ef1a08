//! Bot commands and the scheduled post.
//!
//! Thin glue between [`SaintService`], the renderers in [`crate::embed`], and
//! a [`Deliver`] sink. All failures end up in the log.

use crate::delivery::{Deliver, DeliveryError};
use crate::embed::{self, PRIMARY_HEADING};
use crate::scrapers::SaintSource;
use crate::service::SaintService;
use tracing::{error, info, instrument, warn};

/// What a trigger ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Saint embeds were posted (1 or 2).
    Posted(usize),
    /// No saint was available; the scheduled post was skipped.
    Skipped,
    /// No saint was available; the apology was posted.
    Apologized,
}

/// Scheduled trigger: post today's primary saint, or skip until next time.
#[instrument(level = "info", skip_all)]
pub async fn post_daily<A, B, D>(
    service: &SaintService<A, B>,
    sink: &D,
) -> Result<Outcome, DeliveryError>
where
    A: SaintSource,
    B: SaintSource,
    D: Deliver,
{
    let Some(record) = service.todays_saint().await else {
        warn!("No saint available; skipping scheduled post");
        return Ok(Outcome::Skipped);
    };

    sink.deliver(&[embed::render(&record, PRIMARY_HEADING)]).await?;
    info!(name = %record.name, "Posted daily saint");
    Ok(Outcome::Posted(1))
}

/// On-demand `saint` command: full detail, or an apology on total failure.
#[instrument(level = "info", skip_all)]
pub async fn saint_command<A, B, D>(
    service: &SaintService<A, B>,
    sink: &D,
) -> Result<Outcome, DeliveryError>
where
    A: SaintSource,
    B: SaintSource,
    D: Deliver,
{
    let merged = service.todays_saints().await;
    if merged.is_empty() {
        sink.deliver_text(embed::apology()).await?;
        return Ok(Outcome::Apologized);
    }

    let embeds = embed::render_merged(&merged);
    sink.deliver(&embeds).await?;
    Ok(Outcome::Posted(embeds.len()))
}

/// `hello` command.
pub async fn hello_command<D: Deliver>(sink: &D) -> Result<(), DeliveryError> {
    sink.deliver_text(embed::greeting()).await
}

/// Scheduled job body: never fails, only logs.
pub async fn run_scheduled_post<A, B, D>(service: &SaintService<A, B>, sink: &D)
where
    A: SaintSource,
    B: SaintSource,
    D: Deliver,
{
    match post_daily(service, sink).await {
        Ok(outcome) => info!(?outcome, "Scheduled post finished"),
        Err(e) => error!(error = %e, "Scheduled post could not be delivered"),
    }
}
