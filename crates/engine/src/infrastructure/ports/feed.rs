//! Chat feed port for narrative events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use guisebook_domain::{CharacterId, MessageId};

use super::error::FeedError;

/// A rendered message appended to the shared chat feed.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeMessage {
    pub speaker: String,
    pub actor: CharacterId,
    /// Escaped HTML fragment.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatFeed: Send + Sync {
    async fn post(&self, message: NarrativeMessage) -> Result<MessageId, FeedError>;
}
