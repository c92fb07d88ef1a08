//! Delivery of rendered messages to the destination channel.
//!
//! The bot posts through a channel webhook when one is configured and falls
//! back to printing the payload otherwise.

use crate::embed::SaintEmbed;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook answered with HTTP {0}")]
    Status(u16),

    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Somewhere messages can be posted.
pub trait Deliver: Send + Sync {
    /// Post one message made of `embeds`.
    fn deliver(
        &self,
        embeds: &[SaintEmbed],
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;

    /// Post a plain text message.
    fn deliver_text(&self, text: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Webhook message body.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    #[serde(skip_serializing_if = "no_embeds")]
    pub embeds: &'a [SaintEmbed],
}

fn no_embeds(embeds: &&[SaintEmbed]) -> bool {
    embeds.is_empty()
}

/// Posts JSON payloads to a channel webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookDelivery {
    client: Client,
    url: String,
    username: String,
}

impl WebhookDelivery {
    pub fn new(url: impl Into<String>, username: impl Into<String>) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .use_rustls_tls()
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            username: username.into(),
        })
    }

    #[instrument(level = "info", skip_all)]
    async fn post(&self, payload: &WebhookPayload<'_>) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status.as_u16()));
        }
        info!(status = status.as_u16(), "Posted to webhook");
        Ok(())
    }
}

impl Deliver for WebhookDelivery {
    async fn deliver(&self, embeds: &[SaintEmbed]) -> Result<(), DeliveryError> {
        self.post(&WebhookPayload {
            username: &self.username,
            content: None,
            embeds,
        })
        .await
    }

    async fn deliver_text(&self, text: &str) -> Result<(), DeliveryError> {
        self.post(&WebhookPayload {
            username: &self.username,
            content: Some(text),
            embeds: &[],
        })
        .await
    }
}

/// Prints payloads to stdout as pretty JSON.
#[derive(Debug, Clone)]
pub struct StdoutDelivery {
    pub username: String,
}

impl StdoutDelivery {
    fn print(&self, payload: &WebhookPayload<'_>) -> Result<(), DeliveryError> {
        println!("{}", serde_json::to_string_pretty(payload)?);
        Ok(())
    }
}

impl Deliver for StdoutDelivery {
    async fn deliver(&self, embeds: &[SaintEmbed]) -> Result<(), DeliveryError> {
        self.print(&WebhookPayload {
            username: &self.username,
            content: None,
            embeds,
        })
    }

    async fn deliver_text(&self, text: &str) -> Result<(), DeliveryError> {
        self.print(&WebhookPayload {
            username: &self.username,
            content: Some(text),
            embeds: &[],
        })
    }
}

/// Either sink, picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum Destination {
    Webhook(WebhookDelivery),
    Stdout(StdoutDelivery),
}

impl Destination {
    /// Webhook when `webhook_url` is set, stdout otherwise.
    pub fn from_config(webhook_url: Option<&str>, username: &str) -> Result<Self, DeliveryError> {
        Ok(match webhook_url {
            Some(url) => Self::Webhook(WebhookDelivery::new(url, username)?),
            None => Self::Stdout(StdoutDelivery {
                username: username.to_string(),
            }),
        })
    }
}

impl Deliver for Destination {
    async fn deliver(&self, embeds: &[SaintEmbed]) -> Result<(), DeliveryError> {
        match self {
            Self::Webhook(d) => d.deliver(embeds).await,
            Self::Stdout(d) => d.deliver(embeds).await,
        }
    }

    async fn deliver_text(&self, text: &str) -> Result<(), DeliveryError> {
        match self {
            Self::Webhook(d) => d.deliver_text(text).await,
            Self::Stdout(d) => d.deliver_text(text).await,
        }
    }
}
