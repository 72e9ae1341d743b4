//! Undo level use case.
//!
//! Restores the record to the exact state captured before the most recent
//! advance. Rewards spent since then are discarded along with it.

use std::sync::Arc;

use guisebook_domain::{CharacterId, RecordPatch};

use super::error::ProgressionError;
use super::narrative::NarrativeHook;
use super::types::{ActingContext, LevelRollback, UndoOutcome};
use crate::entities::CharacterSheets;

pub struct UndoLevel {
    sheets: Arc<CharacterSheets>,
    narrative: Arc<NarrativeHook>,
}

impl UndoLevel {
    pub fn new(sheets: Arc<CharacterSheets>, narrative: Arc<NarrativeHook>) -> Self {
        Self { sheets, narrative }
    }

    pub async fn execute(
        &self,
        ctx: &ActingContext,
        character_id: CharacterId,
    ) -> Result<UndoOutcome, ProgressionError> {
        let record = self
            .sheets
            .get_raw(character_id)
            .await?
            .ok_or(ProgressionError::CharacterNotFound(character_id))?;
        if record.is_group() {
            return Err(ProgressionError::NotACharacter(character_id));
        }

        let mut history = record.flags.level_history.clone();
        let Some(snapshot) = history.pop() else {
            tracing::info!(character_id = %character_id, "Nothing to undo");
            return Ok(UndoOutcome::NothingToUndo);
        };

        let patch = RecordPatch::new()
            .with_level(snapshot.prev_level)
            .with_base_attributes(snapshot.prev_data.base_attributes)
            .with_skills(snapshot.prev_data.skills)
            .with_spark_bonus(snapshot.prev_data.spark_bonus)
            .with_pending(snapshot.prev_pending)
            .with_level_history(history);
        self.sheets.update(character_id, &patch).await?;

        let rollback = LevelRollback {
            from: record.current_level(),
            to: snapshot.prev_level,
            pending: snapshot.prev_pending,
        };
        tracing::info!(
            character_id = %character_id,
            user_id = %ctx.user_id,
            from = %rollback.from,
            to = %rollback.to,
            snapshot_taken = %snapshot.timestamp,
            "Level undone"
        );

        self.narrative
            .level_undone(ctx, character_id, &record.name, &rollback)
            .await;

        Ok(UndoOutcome::Undone(rollback))
    }
}
