//! Command-line interface definitions for the Saint of the Day bot.
//!
//! Options can be given as flags or through environment variables (a `.env`
//! file in the working directory is loaded first).

use clap::{Parser, Subcommand};

/// Command-line arguments for the Saint of the Day bot.
///
/// # Examples
///
/// ```sh
/// # Print today's saints once
/// saint_of_the_day saint
///
/// # Post every morning at 07:30 through a channel webhook
/// DISCORD_WEBHOOK_URL=https://discord.com/api/webhooks/... saint_of_the_day --post-time 07:30 run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "SAINT_BOT_CONFIG")]
    pub config: Option<String>,

    /// Channel webhook URL; messages are printed to stdout when omitted
    #[arg(long, env = "DISCORD_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Per-request timeout for the saint sites, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Local time of the daily post (HH:MM)
    #[arg(long)]
    pub post_time: Option<String>,

    /// Post every N seconds instead of once a day at the post time
    #[arg(long)]
    pub interval_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Say hello
    Hello,
    /// Post today's saint, plus any other saint celebrated today
    Saint,
    /// Post only today's primary saint, as the daily post does
    Today,
    /// Post today's saint every day until interrupted
    Run {
        /// Also post once right away
        #[arg(long)]
        post_now: bool,
    },
}
