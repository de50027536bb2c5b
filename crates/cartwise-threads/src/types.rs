//! Thread payload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cartwise_places::Place;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn now(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_owned(),
            created_at: Utc::now(),
        }
    }
}

/// Everything persisted for one conversation thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadData {
    /// Location context supplied by the caller, if any.
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_m: Option<u32>,
    /// Snapshot of the last nearby-place resolution for this thread.
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}
