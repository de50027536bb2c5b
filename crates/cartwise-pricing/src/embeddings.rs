//! OpenAI-compatible embeddings client for query vector generation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Embeddings HTTP client.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// Creates a new embedder pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, PricingError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new embedder with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PricingError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/v1/embeddings", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Generate the embedding vector for one text.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Embedding`] if the request fails, the API
    /// rejects it, or the response carries no vector.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, PricingError> {
        let request = EmbedRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PricingError::Embedding(format!("embeddings request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PricingError::Embedding(format!(
                "embeddings API returned status {}",
                response.status()
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| PricingError::Embedding(format!("embeddings response parse error: {e}")))?;

        let Some(first) = parsed.data.into_iter().next() else {
            return Err(PricingError::Embedding(
                "embeddings response carried no data".to_owned(),
            ));
        };
        if first.embedding.is_empty() {
            return Err(PricingError::Embedding(
                "embeddings response carried an empty vector".to_owned(),
            ));
        }

        Ok(first.embedding)
    }
}
