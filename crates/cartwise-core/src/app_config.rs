use std::path::PathBuf;

/// Application configuration, loaded from environment variables.
///
/// API keys are optional at load time; each client constructor validates
/// the keys it actually needs, so commands that never touch a given
/// collaborator work without its credentials.
#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection: String,
    pub embedding_model: String,
    pub default_lat: f64,
    pub default_lng: f64,
    pub default_radius_m: u32,
    pub threads_dir: PathBuf,
    pub http_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub log_level: String,
    pub price_threshold_percent: f64,
    pub min_similarity: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("qdrant_url", &self.qdrant_url)
            .field(
                "qdrant_api_key",
                &self.qdrant_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("collection", &self.collection)
            .field("embedding_model", &self.embedding_model)
            .field("default_lat", &self.default_lat)
            .field("default_lng", &self.default_lng)
            .field("default_radius_m", &self.default_radius_m)
            .field("threads_dir", &self.threads_dir)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("log_level", &self.log_level)
            .field("price_threshold_percent", &self.price_threshold_percent)
            .field("min_similarity", &self.min_similarity)
            .finish()
    }
}
