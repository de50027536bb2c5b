//! Qdrant vector store client, query side only.
//!
//! Catalog ingestion (collection creation, upserts) happens in a separate
//! pipeline; this client covers similarity queries with payloads.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Qdrant HTTP client.
pub struct QdrantClient {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct QueryPointsRequest {
    query: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct QueryPointsResponse {
    result: QueryResult,
}

#[derive(Deserialize)]
struct QueryResult {
    #[serde(default)]
    points: Vec<ScoredPoint>,
}

/// One scored hit from a similarity query, payload included.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    pub score: f64,
    #[serde(default)]
    pub payload: HashMap<String, serde_json::Value>,
}

impl QdrantClient {
    /// Create a new `QdrantClient`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        qdrant_url: &str,
        collection: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, PricingError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: qdrant_url.trim_end_matches('/').to_owned(),
            collection: collection.to_owned(),
            api_key: api_key.map(str::to_owned),
        })
    }

    /// Run a similarity query and return scored points with payloads.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Qdrant`] on network or API failure, or if the
    /// response cannot be parsed.
    pub async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>, PricingError> {
        let url = format!(
            "{}/collections/{}/points/query",
            self.base_url, self.collection
        );
        let body = QueryPointsRequest {
            query: vector,
            limit: top_k,
            with_payload: true,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PricingError::Qdrant(format!("query request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PricingError::Qdrant(format!(
                "query returned status {}",
                response.status()
            )));
        }

        let parsed: QueryPointsResponse = response
            .json()
            .await
            .map_err(|e| PricingError::Qdrant(format!("query response parse error: {e}")))?;

        Ok(parsed.result.points)
    }
}
