//! AI for Thai TNER (Thai named-entity recognition) client.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use summark_core::entity::{Entity, EntityTagger};

use crate::error::{ensure_ok, ProviderError};

pub const DEFAULT_TNER_URL: &str = "https://api.aiforthai.in.th/tner";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the TNER endpoint.
pub struct TnerClient {
    api_key: String,
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl TnerClient {
    pub fn new(api_key: &str, url: Option<String>, timeout_secs: Option<u64>) -> anyhow::Result<Self> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            url: url.unwrap_or_else(|| DEFAULT_TNER_URL.to_string()),
            timeout_secs,
            client,
        })
    }
}

#[derive(Deserialize)]
struct TnerResponse {
    #[serde(default)]
    entities: Vec<Entity>,
}

#[async_trait]
impl EntityTagger for TnerClient {
    fn name(&self) -> &str {
        "tner"
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn tag(&self, text: &str) -> anyhow::Result<Vec<Entity>> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationFailed("no TNER API key configured".into()).into());
        }

        let response = self
            .client
            .post(&self.url)
            .header("Apikey", &self.api_key)
            .form(&[("text", text)])
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(e, self.timeout_secs))?;

        let response = ensure_ok(response).await?;

        let body: TnerResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("failed to parse TNER response: {e}")))?;

        Ok(body.entities)
    }
}
