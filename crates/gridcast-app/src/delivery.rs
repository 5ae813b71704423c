// Discord webhook delivery.
//
// Discord rejects messages over 2000 characters, so reports go out as a
// sequence of posts of at most `DISCORD_CHUNK_CHARS` characters each.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DISCORD_CHUNK_CHARS: usize = 1700;
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("no Discord webhook configured (set discord_webhook in config/credentials.toml or DISCORD_WEBHOOK)")]
    MissingWebhook,

    #[error("Discord request failed: {source}")]
    Http { source: reqwest::Error },

    #[error("Discord rejected chunk {chunk} of {total}: HTTP {status} {body}")]
    Rejected {
        chunk: usize,
        total: usize,
        status: u16,
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Chunking
// ---------------------------------------------------------------------------

/// Split `body` into pieces of at most `max_chars` characters. Splits fall on
/// char boundaries, never inside a multi-byte character. An empty body yields
/// no chunks.
pub fn chunk_message(body: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in body.chars() {
        current.push(ch);
        count += 1;
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

// ---------------------------------------------------------------------------
// DiscordWebhook
// ---------------------------------------------------------------------------

pub struct DiscordWebhook {
    http: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: &str) -> Result<Self, DeliveryError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DeliveryError::MissingWebhook);
        }
        let http = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::Http { source: e })?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    /// Build from an optional configured URL.
    pub fn from_config(url: Option<&str>) -> Result<Self, DeliveryError> {
        Self::new(url.unwrap_or_default())
    }

    /// Post `body` in chunks, in order. Stops at the first rejected chunk.
    /// Returns the number of chunks delivered.
    pub async fn send(&self, body: &str) -> Result<usize, DeliveryError> {
        let chunks = chunk_message(body, DISCORD_CHUNK_CHARS);
        let total = chunks.len();

        for (i, chunk) in chunks.iter().enumerate() {
            let payload = serde_json::json!({ "content": chunk });
            let response = self
                .http
                .post(&self.url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| DeliveryError::Http { source: e })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(DeliveryError::Rejected {
                    chunk: i + 1,
                    total,
                    status: status.as_u16(),
                    body,
                });
            }
            debug!(chunk = i + 1, total, "Discord chunk delivered");
        }

        info!(chunks = total, "report delivered to Discord");
        Ok(total)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
