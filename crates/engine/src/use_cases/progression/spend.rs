//! Spend pending reward use case.
//!
//! Consumes exactly one unit of a pending counter and applies it. Every
//! check runs before anything is written; the counters are persisted last.

use std::sync::Arc;

use guisebook_domain::{CharacterId, CharacterRecord, Item, ItemData, ItemId, RecordPatch};

use super::error::ProgressionError;
use super::types::{ActingContext, SpendOutcome, SpendRequest};
use crate::entities::CharacterSheets;
use crate::infrastructure::ports::ContentCatalog;

pub struct SpendPending {
    sheets: Arc<CharacterSheets>,
    catalog: Arc<dyn ContentCatalog>,
    move_pack: String,
}

impl SpendPending {
    pub fn new(
        sheets: Arc<CharacterSheets>,
        catalog: Arc<dyn ContentCatalog>,
        move_pack: impl Into<String>,
    ) -> Self {
        Self {
            sheets,
            catalog,
            move_pack: move_pack.into(),
        }
    }

    /// Execute a spend.
    ///
    /// # Returns
    /// * `SpendOutcome::Pending` - the updated counters
    /// * `SpendOutcome::Move` - the created move item (`move` only)
    pub async fn execute(
        &self,
        ctx: &ActingContext,
        character_id: CharacterId,
        request: SpendRequest,
    ) -> Result<SpendOutcome, ProgressionError> {
        let record = self
            .sheets
            .get_raw(character_id)
            .await?
            .ok_or(ProgressionError::CharacterNotFound(character_id))?;
        if record.is_group() {
            return Err(ProgressionError::NotACharacter(character_id));
        }

        let kind = request.pending_kind();
        let remaining = record
            .flags
            .pending
            .consume(kind)
            .ok_or(ProgressionError::NothingPendingToSpend(kind))?;

        let outcome = match &request {
            SpendRequest::Move { move_id } => {
                let template = self.fetch_move(move_id).await?;
                let created = self
                    .sheets
                    .create_item(character_id, instantiate(template, &self.move_pack, move_id))
                    .await?;
                let counters = RecordPatch::new().with_pending(remaining);
                if let Err(err) = self.sheets.update(character_id, &counters).await {
                    // The point was not consumed, so the move must not stay.
                    if let Err(cleanup) = self.sheets.delete_item(character_id, created.id).await {
                        tracing::error!(
                            character_id = %character_id,
                            item_id = %created.id,
                            error = %cleanup,
                            "Failed to remove move after counter update failed"
                        );
                    }
                    return Err(err.into());
                }
                SpendOutcome::Move(created)
            }
            other => {
                let patch = apply_spend(&record, other)?.with_pending(remaining);
                self.sheets.update(character_id, &patch).await?;
                SpendOutcome::Pending(remaining)
            }
        };

        tracing::info!(
            character_id = %character_id,
            user_id = %ctx.user_id,
            kind = request.kind(),
            remaining = remaining.get(kind),
            "Pending reward spent"
        );

        Ok(outcome)
    }

    async fn fetch_move(&self, move_id: &str) -> Result<Item, ProgressionError> {
        let template = self
            .catalog
            .fetch_move(&self.move_pack, move_id)
            .await?
            .ok_or_else(|| ProgressionError::MoveNotFound {
                pack: self.move_pack.clone(),
                move_id: move_id.to_string(),
            })?;
        if !matches!(template.system, ItemData::Move(_)) {
            return Err(ProgressionError::invalid_payload(
                SpendRequest::MOVE,
                format!("{} is not a move", move_id),
            ));
        }
        Ok(template)
    }
}

/// The field change for non-move spends.
fn apply_spend(
    record: &CharacterRecord,
    request: &SpendRequest,
) -> Result<RecordPatch, ProgressionError> {
    let patch = RecordPatch::new();
    Ok(match request {
        SpendRequest::Attribute(attribute) => {
            patch.with_base_attributes(record.base_attributes.incremented(*attribute))
        }
        SpendRequest::Skill(key) => patch.with_skills(record.skills.incremented(key)?),
        SpendRequest::Spark => patch.with_spark_bonus(record.spark_bonus.saturating_add(1)),
        SpendRequest::AckSignature | SpendRequest::AckFinalHand | SpendRequest::Move { .. } => {
            patch
        }
    })
}

/// A fresh owned copy of a catalog template.
fn instantiate(template: Item, pack: &str, move_id: &str) -> Item {
    template
        .with_id(ItemId::new())
        .with_source(format!("{}.{}", pack, move_id))
}
