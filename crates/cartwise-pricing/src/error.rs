use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embeddings error: {0}")]
    Embedding(String),

    #[error("Qdrant error: {0}")]
    Qdrant(String),
}
