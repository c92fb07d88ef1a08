//! # Saint of the Day
//!
//! A chat bot that scrapes the Saint of the Day from two public sites,
//! caches it for the calendar day, and posts it as a rich embed, either on
//! request or once a day.
//!
//! ## Usage
//!
//! ```sh
//! saint_of_the_day saint
//! saint_of_the_day --post-time 07:30 run --post-now
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: Franciscan Media and Catholic Online are scraped concurrently;
//!    each failure is isolated to its own source
//! 2. **Merging**: Franciscan Media wins; a differently named Catholic Online
//!    saint is kept as a second saint
//! 3. **Caching**: the primary saint is cached for the calendar day, and
//!    concurrent misses scrape only once
//! 4. **Delivery**: embeds go to a channel webhook, or to stdout

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod bot;
mod cache;
mod cli;
mod config;
mod delivery;
mod embed;
mod merge;
mod models;
mod scheduler;
mod scrapers;
mod service;

use cli::{Cli, Command};
use config::BotConfig;
use delivery::Destination;
use scheduler::ScheduleHandle;
use scrapers::catholic_online::CatholicOnline;
use scrapers::fetch::HttpFetcher;
use scrapers::franciscan::FranciscanMedia;
use service::SaintService;

type Service = SaintService<FranciscanMedia<HttpFetcher>, CatholicOnline<HttpFetcher>>;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv::dotenv() {
        debug!(path = %path.display(), "Loaded .env file");
    }

    let args = Cli::parse();
    debug!(?args.command, ?args.config, "Parsed CLI arguments");

    let config = BotConfig::load(&args)?;
    info!(
        post_time = %config.post_time,
        interval_secs = ?config.interval_secs,
        timeout_secs = config.timeout_secs,
        webhook = config.webhook_url.is_some(),
        "Configuration loaded"
    );

    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout())?;
    let service: Arc<Service> = Arc::new(SaintService::new(
        FranciscanMedia::new(fetcher.clone()),
        CatholicOnline::new(fetcher),
    ));
    let sink = Arc::new(Destination::from_config(
        config.webhook_url.as_deref(),
        &config.username,
    )?);

    match args.command {
        Command::Hello => bot::hello_command(sink.as_ref()).await?,
        Command::Saint => {
            let outcome = bot::saint_command(service.as_ref(), sink.as_ref()).await?;
            info!(?outcome, "Saint command finished");
        }
        Command::Today => {
            let outcome = bot::post_daily(service.as_ref(), sink.as_ref()).await?;
            info!(?outcome, "Daily post finished");
        }
        Command::Run { post_now } => run(service, sink, &config, post_now).await?,
    }

    Ok(())
}

/// Post on schedule until Ctrl-C.
async fn run(
    service: Arc<Service>,
    sink: Arc<Destination>,
    config: &BotConfig,
    post_now: bool,
) -> Result<(), Box<dyn Error>> {
    if post_now {
        bot::run_scheduled_post(service.as_ref(), sink.as_ref()).await;
    }

    let schedule = config.schedule()?;
    let handle = ScheduleHandle::spawn(schedule, move || {
        let service = Arc::clone(&service);
        let sink = Arc::clone(&sink);
        async move { bot::run_scheduled_post(service.as_ref(), sink.as_ref()).await }
    });
    info!(?schedule, "Posting scheduled; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    handle.shutdown().await;
    Ok(())
}
