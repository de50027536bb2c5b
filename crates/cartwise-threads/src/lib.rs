//! Conversation-thread persistence.
//!
//! Threads are addressed by opaque string identifiers through a small
//! key-value interface, keeping callers storage-agnostic. The shipped
//! backend is one JSON file per thread in a configured directory.

mod store;
mod types;

pub use store::{JsonThreadStore, ThreadStore};
pub use types::{ChatMessage, Role, ThreadData};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThreadStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid thread id: {0}")]
    InvalidThreadId(String),
}

/// Generate a fresh thread identifier.
#[must_use]
pub fn new_thread_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
