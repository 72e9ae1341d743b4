//! Advance level use case.
//!
//! Moves a character up one level and banks the level's grants as pending
//! rewards, keeping a snapshot so the advance can be undone.

use std::sync::Arc;

use guisebook_domain::{
    progression_at, CharacterId, LevelSnapshot, RecordPatch, SnapshotData,
};

use super::error::ProgressionError;
use super::narrative::NarrativeHook;
use super::types::{ActingContext, AdvanceOutcome, LevelAdvance};
use crate::entities::CharacterSheets;
use crate::infrastructure::ports::ClockPort;

/// Advance level use case.
///
/// Orchestrates: sheet load, snapshot, grant accumulation, one grouped
/// write, then the narrative event.
pub struct AdvanceLevel {
    sheets: Arc<CharacterSheets>,
    clock: Arc<dyn ClockPort>,
    narrative: Arc<NarrativeHook>,
}

impl AdvanceLevel {
    pub fn new(
        sheets: Arc<CharacterSheets>,
        clock: Arc<dyn ClockPort>,
        narrative: Arc<NarrativeHook>,
    ) -> Self {
        Self {
            sheets,
            clock,
            narrative,
        }
    }

    /// Execute the advance.
    ///
    /// `guided` is echoed back in the outcome for callers that run an
    /// allocation flow afterwards.
    pub async fn execute(
        &self,
        ctx: &ActingContext,
        character_id: CharacterId,
        guided: bool,
    ) -> Result<AdvanceOutcome, ProgressionError> {
        let record = self
            .sheets
            .load(character_id)
            .await?
            .ok_or(ProgressionError::CharacterNotFound(character_id))?;
        if record.is_group() {
            return Err(ProgressionError::NotACharacter(character_id));
        }

        let current = record.current_level();
        let Some(next) = current.next() else {
            tracing::info!(character_id = %character_id, level = %current, "Already at max level");
            return Ok(AdvanceOutcome::AlreadyAtMax { level: current });
        };
        let row = progression_at(next).map_err(|_| ProgressionError::MissingProgressionData(next))?;

        let caster_type = record
            .derived
            .as_ref()
            .map(|derived| derived.caster_type)
            .unwrap_or_default();
        let grants = row.grants.for_caster(caster_type);
        let pending = record.flags.pending.accumulate(&grants);

        let mut history = record.flags.level_history.clone();
        history.push(LevelSnapshot {
            timestamp: self.clock.now(),
            prev_level: current,
            prev_pending: record.flags.pending,
            prev_data: SnapshotData {
                base_attributes: record.base_attributes,
                skills: record.skills.clone(),
                spark_bonus: record.spark_bonus,
            },
        });

        let patch = RecordPatch::new()
            .with_level(next)
            .with_pending(pending)
            .with_level_history(history);
        self.sheets.update(character_id, &patch).await?;

        let advance = LevelAdvance {
            from: current,
            to: next,
            tier: row.tier_id().to_string(),
            grants,
            pending,
            guided,
        };
        tracing::info!(
            character_id = %character_id,
            user_id = %ctx.user_id,
            from = %current,
            to = %next,
            guided,
            pending_total = pending.total(),
            "Level advanced"
        );

        self.narrative
            .level_advanced(ctx, character_id, &record.name, &advance)
            .await;

        Ok(AdvanceOutcome::Advanced(advance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockChatFeed, MockRecordStore, RepoError};
    use chrono::{TimeZone, Utc};
    use guisebook_domain::{
        CasterType, CharacterRecord, GuiseData, Item, ItemData, Level, PendingRewards, UserId,
    };

    fn ctx() -> ActingContext {
        ActingContext::new(UserId::new("player-1").expect("user id"), "Vess")
    }

    fn use_case(store: MockRecordStore, feed: MockChatFeed) -> AdvanceLevel {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).single().expect("time");
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(now));
        AdvanceLevel::new(
            Arc::new(CharacterSheets::new(Arc::new(store))),
            clock.clone(),
            Arc::new(NarrativeHook::new(Arc::new(feed), clock)),
        )
    }

    fn quiet_feed() -> MockChatFeed {
        let mut feed = MockChatFeed::new();
        feed.expect_post()
            .returning(|_| Ok(guisebook_domain::MessageId::new()));
        feed
    }

    #[tokio::test]
    async fn when_character_missing_then_not_found() {
        let mut store = MockRecordStore::new();
        store.expect_get().returning(|_| Ok(None));

        let result = use_case(store, MockChatFeed::new())
            .execute(&ctx(), CharacterId::new(), false)
            .await;

        assert!(matches!(result, Err(ProgressionError::CharacterNotFound(_))));
    }

    #[tokio::test]
    async fn when_record_is_a_group_then_rejected() {
        let group = CharacterRecord::new_group("The Long Odds");
        let id = group.id;
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(group.clone())));
        store.expect_update().never();

        let result = use_case(store, MockChatFeed::new())
            .execute(&ctx(), id, false)
            .await;

        assert!(matches!(result, Err(ProgressionError::NotACharacter(got)) if got == id));
    }

    #[tokio::test]
    async fn at_max_level_nothing_is_written() {
        let record = CharacterRecord::new("Vess").with_level(12);
        let id = record.id;
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        store.expect_update().never();
        let mut feed = MockChatFeed::new();
        feed.expect_post().never();

        let result = use_case(store, feed).execute(&ctx(), id, false).await;

        assert!(matches!(
            result,
            Ok(AdvanceOutcome::AlreadyAtMax { level }) if level == Level::MAX
        ));
    }

    #[tokio::test]
    async fn non_caster_gets_no_spark_slots() {
        let record = CharacterRecord::new("Vess")
            .with_level(1)
            .with_pending(PendingRewards {
                skills: 2,
                ..PendingRewards::default()
            });
        let id = record.id;
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        store
            .expect_update()
            .withf(move |got, patch| {
                *got == id
                    && patch.level == Some(Level::clamped(2))
                    && patch.pending.map(|p| (p.skills, p.moves, p.spark_slots)) == Some((3, 1, 0))
                    && patch.level_history.as_ref().map(|h| h.len()) == Some(1)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let result = use_case(store, quiet_feed())
            .execute(&ctx(), id, true)
            .await;

        match result {
            Ok(AdvanceOutcome::Advanced(advance)) => {
                assert_eq!(advance.grants.spark_slots, 0);
                assert!(advance.guided);
                assert_eq!(advance.tier, "rookie");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn full_caster_banks_spark_slots() {
        let class = Item::new(
            "Hexer",
            ItemData::Class(GuiseData {
                caster_type: CasterType::Full,
                ..GuiseData::default()
            }),
        );
        let record = CharacterRecord::new("Vess").with_equipped_class(class);
        let id = record.id;
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        store
            .expect_update()
            .withf(|_, patch| patch.pending.map(|p| p.spark_slots) == Some(1))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = use_case(store, quiet_feed())
            .execute(&ctx(), id, false)
            .await;

        assert!(matches!(result, Ok(AdvanceOutcome::Advanced(_))));
    }

    #[tokio::test]
    async fn when_write_fails_no_event_is_posted() {
        let record = CharacterRecord::new("Vess");
        let id = record.id;
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        store
            .expect_update()
            .returning(|_, _| Err(RepoError::database("update", "disk full")));
        let mut feed = MockChatFeed::new();
        feed.expect_post().never();

        let result = use_case(store, feed).execute(&ctx(), id, false).await;

        assert!(matches!(result, Err(ProgressionError::Repo(_))));
    }
}
