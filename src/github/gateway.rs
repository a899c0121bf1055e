use std::time::Duration;

use anyhow::Context;

use super::{RawRepository, SearchEnvelope};
use crate::config::Config;
use crate::error::{DiscoveryError, Result};
use crate::search::query::RemoteQueryDescriptor;

/// Characters of an error body kept in a failure message.
const ERROR_BODY_EXCERPT: usize = 200;

/// Issues one search request per call. No retries, no caching.
#[derive(Debug, Clone)]
pub struct SearchGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl SearchGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DiscoveryError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Run the remote search and return its raw items.
    ///
    /// A response without an item collection yields an empty list. Transport
    /// errors, non-success statuses and undecodable bodies all surface as
    /// [`DiscoveryError::SearchFailed`].
    pub async fn search(&self, descriptor: &RemoteQueryDescriptor) -> Result<Vec<RawRepository>> {
        self.fetch(descriptor)
            .await
            .map_err(DiscoveryError::SearchFailed)
    }

    async fn fetch(&self, descriptor: &RemoteQueryDescriptor) -> anyhow::Result<Vec<RawRepository>> {
        tracing::debug!(
            endpoint = %self.endpoint,
            q = %descriptor.search_expression,
            sort = descriptor.sort_key,
            "Sending repository search"
        );

        let resp = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/vnd.github+json")
            .query(&descriptor.query_pairs())
            .send()
            .await
            .context("Failed to call repository search API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "Repository search API returned {status}: {}",
                excerpt(&body, ERROR_BODY_EXCERPT)
            );
        }

        let body = resp
            .bytes()
            .await
            .context("Failed to read repository search response")?;
        let envelope: SearchEnvelope = serde_json::from_slice(&body)
            .context("Failed to parse repository search response")?;

        Ok(envelope.items.unwrap_or_default())
    }
}

/// Cut `text` to at most `max_chars` characters.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
