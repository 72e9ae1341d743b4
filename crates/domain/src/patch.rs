//! Typed partial updates for character records.
//!
//! The record store accepts a [`RecordPatch`] instead of dotted-path
//! updates; every `Some` field replaces the stored value wholesale, and
//! all fields in one patch are applied as a single grouped write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{
    AttributeScores, Level, LevelHistory, PendingRewards, SkillRanks, StrainCapacity,
};
use crate::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_attributes: Option<AttributeScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillRanks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spark_bonus: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingRewards>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_history: Option<LevelHistory>,
    /// Fill-if-absent seeding of equipped gear capacity, keyed by item.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub remaining_capacity: BTreeMap<ItemId, StrainCapacity>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_base_attributes(mut self, attributes: AttributeScores) -> Self {
        self.base_attributes = Some(attributes);
        self
    }

    pub fn with_skills(mut self, skills: SkillRanks) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_spark_bonus(mut self, spark_bonus: i32) -> Self {
        self.spark_bonus = Some(spark_bonus);
        self
    }

    pub fn with_pending(mut self, pending: PendingRewards) -> Self {
        self.pending = Some(pending);
        self
    }

    pub fn with_level_history(mut self, history: LevelHistory) -> Self {
        self.level_history = Some(history);
        self
    }

    pub fn with_remaining_capacity(mut self, item_id: ItemId, capacity: StrainCapacity) -> Self {
        self.remaining_capacity.insert(item_id, capacity);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
