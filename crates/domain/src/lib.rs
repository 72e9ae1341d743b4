//! Character progression domain for guisebook sheets.
//!
//! Pure, synchronous code: the record model, the level table, sheet
//! derivation and typed patches. Persistence and side effects live in
//! `guisebook-engine`.

pub mod common;
pub mod derivation;
pub mod entities;
pub mod error;
pub mod ids;
pub mod patch;
pub mod progression;
pub mod tags;
pub mod value_objects;

pub use derivation::{derive_sheet, DerivationReport};
pub use entities::{
    CharacterRecord, ClassRef, DerivedSheet, GambitCaps, GambitCard, GambitPiles, GearData,
    GroupBiography, GroupData, GuiseData, GuiseProfile, Item, ItemData, MoveData,
    ProgressionFlags, RecordKind, SharedGambitDeck,
};
pub use error::DomainError;
pub use ids::{CharacterId, ItemId, MessageId, UserId};
pub use patch::RecordPatch;
pub use progression::{
    max_draw_size, progression_at, progression_for, LevelCaps, LevelGrants, LevelUnlocks,
    ProgressionLevel, DEFAULT_TIER,
};
pub use tags::{TagDefinition, ASSET_TAGS, ITEM_TAGS};
pub use value_objects::{
    Attribute, AttributeScores, CapacityTrack, CasterType, GuiseModifiers, Level, LevelHistory,
    LevelSnapshot, PendingKind, PendingRewards, SkillRanks, SnapshotData, Strain, StrainCapacity,
    ATTRIBUTE_MAX, ATTRIBUTE_MIN, MAX_HISTORY,
};
