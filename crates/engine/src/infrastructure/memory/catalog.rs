//! In-memory content catalog keyed by pack then move id.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use guisebook_domain::Item;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ContentCatalog, RepoError};

#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    packs: Arc<RwLock<HashMap<String, HashMap<String, Item>>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_move(&self, pack: impl Into<String>, move_id: impl Into<String>, item: Item) {
        self.packs
            .write()
            .await
            .entry(pack.into())
            .or_default()
            .insert(move_id.into(), item);
    }
}

#[async_trait]
impl ContentCatalog for InMemoryCatalog {
    async fn fetch_move(&self, pack: &str, move_id: &str) -> Result<Option<Item>, RepoError> {
        let packs = self.packs.read().await;
        let pack = packs
            .get(pack)
            .ok_or_else(|| RepoError::not_found("Pack", pack))?;
        Ok(pack.get(move_id).cloned())
    }
}
