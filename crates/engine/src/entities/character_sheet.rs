//! Character sheet entity operations.
//!
//! Loading a sheet always derives it: the persisted record is read, the class
//! reference resolved, and the derived view recomputed before it is handed
//! to callers.

use std::sync::Arc;

use guisebook_domain::{derive_sheet, CharacterId, CharacterRecord, Item, ItemId, RecordPatch};

use crate::infrastructure::ports::{RecordStore, RepoError};

/// Character sheet entity - derivation-on-load over the record store.
pub struct CharacterSheets {
    store: Arc<dyn RecordStore>,
}

impl CharacterSheets {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The record as persisted, without derived fields.
    pub async fn get_raw(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        self.store.get(id).await
    }

    pub async fn list_ids(&self) -> Result<Vec<CharacterId>, RepoError> {
        self.store.list_ids().await
    }

    /// Load a record and recompute its derived sheet.
    ///
    /// Gear capacity seeded during derivation is written back so it is only
    /// ever seeded once.
    pub async fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        let Some(mut record) = self.store.get(id).await? else {
            return Ok(None);
        };

        let resolved = self.resolve_external_class(&record).await;
        let report = derive_sheet(&mut record, resolved.as_ref());

        if let Some(err) = &report.rejected_class {
            tracing::warn!(
                character_id = %id,
                class_ref = ?record.class_ref,
                error = %err,
                "Ignoring invalid class data"
            );
        }

        if report.seeded_any() {
            let patch = report
                .seeded_capacity
                .iter()
                .fold(RecordPatch::new(), |patch, (item_id, capacity)| {
                    patch.with_remaining_capacity(*item_id, *capacity)
                });
            self.store.update(id, &patch).await?;
            tracing::debug!(
                character_id = %id,
                seeded = report.seeded_capacity.len(),
                "Seeded gear remaining capacity"
            );
        }

        if let Some(derived) = &record.derived {
            tracing::debug!(
                character_id = %id,
                level = %derived.level,
                tier = %derived.tier,
                "Derived character sheet"
            );
        }

        Ok(Some(record))
    }

    pub async fn update(&self, id: CharacterId, patch: &RecordPatch) -> Result<(), RepoError> {
        self.store.update(id, patch).await
    }

    pub async fn create_item(&self, owner: CharacterId, item: Item) -> Result<Item, RepoError> {
        self.store.create_item(owner, item).await
    }

    pub async fn delete_item(&self, owner: CharacterId, item_id: ItemId) -> Result<(), RepoError> {
        self.store.delete_item(owner, item_id).await
    }

    /// Store lookup for a class that is not embedded. Lookup failures leave
    /// the class unresolved.
    async fn resolve_external_class(&self, record: &CharacterRecord) -> Option<Item> {
        if !record.needs_external_class() {
            return None;
        }
        let reference = record.class_ref.as_ref()?;
        match self.store.resolve_item(reference.as_str()).await {
            Ok(item) => item,
            Err(err) => {
                tracing::warn!(
                    character_id = %record.id,
                    class_ref = %reference,
                    error = %err,
                    "Class reference lookup failed"
                );
                None
            }
        }
    }
}
