//! JSON seed data for the in-memory adapters.

use std::collections::BTreeMap;
use std::path::Path;

use guisebook_domain::{CharacterRecord, Item};
use serde::Deserialize;

use super::{InMemoryCatalog, InMemoryRecordStore};
use crate::infrastructure::ports::RepoError;

/// Seed file layout:
///
/// ```json
/// {
///   "records": [ { "id": "…", "name": "Vess", "level": 3 } ],
///   "classes": { "catalog.classes.cardsharp": { "id": "…", "name": "Cardsharp", "system": { "type": "class" } } },
///   "moves": { "guisebook.moves": { "read-the-room": { "id": "…", "name": "Read the Room", "system": { "type": "move" } } } }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub records: Vec<CharacterRecord>,
    /// Durable class references.
    pub classes: BTreeMap<String, Item>,
    /// Pack name to move id to template.
    pub moves: BTreeMap<String, BTreeMap<String, Item>>,
}

impl SeedFile {
    pub async fn load(path: &Path) -> Result<Self, RepoError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::database("read_seed", e))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, RepoError> {
        serde_json::from_str(raw).map_err(RepoError::serialization)
    }

    pub async fn install(self, store: &InMemoryRecordStore, catalog: &InMemoryCatalog) {
        for record in self.records {
            store.insert(record).await;
        }
        for (reference, item) in self.classes {
            store.register_durable(reference, item).await;
        }
        for (pack, moves) in self.moves {
            for (move_id, item) in moves {
                catalog.insert_move(pack.clone(), move_id, item).await;
            }
        }
    }
}
