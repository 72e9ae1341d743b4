//! In-memory chat feed.

use std::sync::Arc;

use async_trait::async_trait;
use guisebook_domain::MessageId;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ChatFeed, FeedError, NarrativeMessage};

/// Append-only message log.
#[derive(Clone, Default)]
pub struct InMemoryChatLog {
    messages: Arc<RwLock<Vec<NarrativeMessage>>>,
}

impl InMemoryChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<NarrativeMessage> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl ChatFeed for InMemoryChatLog {
    async fn post(&self, message: NarrativeMessage) -> Result<MessageId, FeedError> {
        let id = MessageId::new();
        tracing::debug!(
            message_id = %id,
            actor = %message.actor,
            speaker = %message.speaker,
            "Chat message posted"
        );
        self.messages.write().await.push(message);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use guisebook_domain::CharacterId;

    #[tokio::test]
    async fn keeps_messages_in_post_order() {
        let log = InMemoryChatLog::new();
        let actor = CharacterId::new();
        for content in ["first", "second"] {
            log.post(NarrativeMessage {
                speaker: "Game Master".to_string(),
                actor,
                content: content.to_string(),
                created_at: Utc::now(),
            })
            .await
            .expect("in-memory post succeeds");
        }

        let contents: Vec<String> = log.messages().await.into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }
}
