//! In-memory record store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use guisebook_domain::{CharacterId, CharacterRecord, Item, ItemId, RecordPatch};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{RecordStore, RepoError};

/// Record store backed by a map, last write wins per record.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<CharacterId, CharacterRecord>>>,
    durable: Arc<RwLock<HashMap<String, Item>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, mut record: CharacterRecord) {
        record.derived = None;
        self.records.write().await.insert(record.id, record);
    }

    /// Make an item resolvable by a durable reference.
    pub async fn register_durable(&self, reference: impl Into<String>, item: Item) {
        self.durable.write().await.insert(reference.into(), item);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_ids(&self) -> Result<Vec<CharacterId>, RepoError> {
        let mut ids: Vec<_> = self.records.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn update(&self, id: CharacterId, patch: &RecordPatch) -> Result<(), RepoError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Character", id))?;
        record.apply_patch(patch);
        Ok(())
    }

    async fn create_item(&self, owner: CharacterId, item: Item) -> Result<Item, RepoError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&owner)
            .ok_or_else(|| RepoError::not_found("Character", owner))?;
        if record.item(item.id).is_some() {
            return Err(RepoError::constraint(format!(
                "item {} already exists on {}",
                item.id, owner
            )));
        }
        record.items.push(item.clone());
        Ok(item)
    }

    async fn delete_item(&self, owner: CharacterId, item_id: ItemId) -> Result<(), RepoError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&owner)
            .ok_or_else(|| RepoError::not_found("Character", owner))?;
        let before = record.items.len();
        record.items.retain(|item| item.id != item_id);
        if record.items.len() == before {
            return Err(RepoError::not_found("Item", item_id));
        }
        Ok(())
    }

    async fn resolve_item(&self, reference: &str) -> Result<Option<Item>, RepoError> {
        Ok(self.durable.read().await.get(reference).cloned())
    }
}
