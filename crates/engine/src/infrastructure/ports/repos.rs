//! Port traits for the record store and the content catalog.

use async_trait::async_trait;
use guisebook_domain::{CharacterId, CharacterRecord, Item, ItemId, RecordPatch};

use super::error::RepoError;

// =============================================================================
// Record Store
// =============================================================================

/// The external document store that owns character records.
///
/// `get` returns the record as persisted; derivation happens above this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;
    async fn list_ids(&self) -> Result<Vec<CharacterId>, RepoError>;

    /// Merge a partial update into the stored record as one write.
    async fn update(&self, id: CharacterId, patch: &RecordPatch) -> Result<(), RepoError>;

    // Embedded items
    async fn create_item(&self, owner: CharacterId, item: Item) -> Result<Item, RepoError>;
    async fn delete_item(&self, owner: CharacterId, item_id: ItemId) -> Result<(), RepoError>;

    /// Resolve a durable (non-embedded) reference such as a catalog class.
    async fn resolve_item(&self, reference: &str) -> Result<Option<Item>, RepoError>;
}

// =============================================================================
// Content Catalog
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// Fetch a move template from a named pack.
    async fn fetch_move(&self, pack: &str, move_id: &str) -> Result<Option<Item>, RepoError>;
}
