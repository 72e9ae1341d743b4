//! Character record - the persisted sheet plus its derived view
//!
//! The record mirrors what the external document store holds for one
//! actor. Persisted fields are the source of truth; [`DerivedSheet`] is
//! recomputed from them on every load and never persisted.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::common::{loose_i32, loose_i64, loose_u32};
use crate::patch::RecordPatch;
use crate::progression::LevelUnlocks;
use crate::value_objects::{
    AttributeScores, CasterType, Level, LevelHistory, PendingRewards, SkillRanks, Strain,
    StrainCapacity,
};
use crate::{CharacterId, ItemId};

/// Whether the record is an individual character or a group (crew).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Character,
    Group,
}

/// Reference to the equipped class: an embedded item id, or a durable
/// identifier the store can resolve (e.g. a catalog entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassRef(String);

impl ClassRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn embedded(item_id: ItemId) -> Self {
        Self(item_id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The embedded item id this reference names, if it is one.
    pub fn as_item_id(&self) -> Option<ItemId> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted gambit piles; caps are derived from level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GambitPiles {
    pub deck: Vec<ItemId>,
    pub drawn: Vec<ItemId>,
    pub discard: Vec<ItemId>,
    #[serde(deserialize_with = "loose_u32")]
    pub hand_size: u32,
}

/// Level-up bookkeeping kept in the auxiliary flag bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionFlags {
    pub pending: PendingRewards,
    pub level_history: LevelHistory,
}

/// Free-form group biography.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupBiography {
    pub look_and_feel: String,
    pub weakness: String,
    pub location: String,
    pub features: String,
    pub tags: Vec<String>,
}

/// Gambit deck shared by a whole group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedGambitDeck {
    #[serde(default)]
    pub deck: Vec<ItemId>,
    #[serde(default)]
    pub drawn: Vec<ItemId>,
    #[serde(default)]
    pub discard: Vec<ItemId>,
    #[serde(default = "SharedGambitDeck::default_hand_size")]
    pub hand_size: u32,
    #[serde(default = "SharedGambitDeck::default_max_deck_size")]
    pub max_deck_size: u32,
}

impl SharedGambitDeck {
    pub const DEFAULT_HAND_SIZE: u32 = 3;
    pub const DEFAULT_MAX_DECK_SIZE: u32 = 6;

    fn default_hand_size() -> u32 {
        Self::DEFAULT_HAND_SIZE
    }

    fn default_max_deck_size() -> u32 {
        Self::DEFAULT_MAX_DECK_SIZE
    }
}

impl Default for SharedGambitDeck {
    fn default() -> Self {
        Self {
            deck: Vec::new(),
            drawn: Vec::new(),
            discard: Vec::new(),
            hand_size: Self::DEFAULT_HAND_SIZE,
            max_deck_size: Self::DEFAULT_MAX_DECK_SIZE,
        }
    }
}

/// Group-only persisted fields. Absent parts are filled with defaults on
/// load; present values are never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<GroupBiography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gambits: Option<SharedGambitDeck>,
}

impl GroupData {
    pub fn ensure_defaults(&mut self) {
        self.currency.get_or_insert(0);
        self.biography.get_or_insert_with(GroupBiography::default);
        self.gambits.get_or_insert_with(SharedGambitDeck::default);
    }
}

/// Level-derived gambit limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GambitCaps {
    pub max_deck_size: u32,
    pub max_draw_size: u32,
    pub max_equip: u32,
}

/// Fields recomputed from persisted state on every load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSheet {
    pub level: Level,
    pub attributes: AttributeScores,
    pub spark_slots: i32,
    pub risk_dice: i32,
    pub caster_type: CasterType,
    pub gambits: GambitCaps,
    pub tier: String,
    pub unlocks: LevelUnlocks,
    /// The class whose data was applied, if one resolved.
    pub class_item: Option<ItemId>,
}

/// One character (or group) as held by the record store.
///
/// Fields are public; invariants on derived data are maintained by
/// [`crate::derivation::derive_sheet`], and on level/pending by the
/// level-up use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: RecordKind,
    #[serde(default = "default_level", deserialize_with = "loose_i64")]
    pub level: i64,
    #[serde(default)]
    pub base_attributes: AttributeScores,
    #[serde(default)]
    pub skills: SkillRanks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<ClassRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: Option<Strain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_strain_capacity: Option<StrainCapacity>,
    #[serde(default, deserialize_with = "loose_i32")]
    pub spark_bonus: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub spark_used: i32,
    #[serde(default)]
    pub gambits: GambitPiles,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub flags: ProgressionFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupData>,
    #[serde(skip)]
    pub derived: Option<DerivedSheet>,
}

fn default_level() -> i64 {
    1
}

impl CharacterRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            kind: RecordKind::Character,
            level: default_level(),
            base_attributes: AttributeScores::default(),
            skills: SkillRanks::default(),
            class_ref: None,
            strain: None,
            base_strain_capacity: None,
            spark_bonus: 0,
            spark_used: 0,
            gambits: GambitPiles::default(),
            items: Vec::new(),
            flags: ProgressionFlags::default(),
            group: None,
            derived: None,
        }
    }

    pub fn new_group(name: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Group,
            ..Self::new(name)
        }
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    pub fn with_base_attributes(mut self, attributes: AttributeScores) -> Self {
        self.base_attributes = attributes;
        self
    }

    pub fn with_skills(mut self, skills: SkillRanks) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_pending(mut self, pending: PendingRewards) -> Self {
        self.flags.pending = pending;
        self
    }

    /// Add an item and point the class reference at it.
    pub fn with_equipped_class(mut self, class: Item) -> Self {
        self.class_ref = Some(ClassRef::embedded(class.id));
        self.items.push(class);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_group(&self) -> bool {
        self.kind == RecordKind::Group
    }

    /// The persisted level clamped into range.
    pub fn current_level(&self) -> Level {
        Level::clamped(self.level)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The class item named by `class_ref` among the embedded items.
    pub fn embedded_class(&self) -> Option<&Item> {
        let id = self.class_ref.as_ref()?.as_item_id()?;
        self.item(id)
    }

    /// True when the class reference can only be resolved by the store.
    pub fn needs_external_class(&self) -> bool {
        self.class_ref.is_some() && self.embedded_class().is_none()
    }

    /// Merge a partial update into this record.
    ///
    /// Derived data is dropped; callers re-derive after patching.
    pub fn apply_patch(&mut self, patch: &RecordPatch) {
        if let Some(level) = patch.level {
            self.level = i64::from(level.get());
        }
        if let Some(attributes) = patch.base_attributes {
            self.base_attributes = attributes;
        }
        if let Some(skills) = &patch.skills {
            self.skills = skills.clone();
        }
        if let Some(spark_bonus) = patch.spark_bonus {
            self.spark_bonus = spark_bonus;
        }
        if let Some(pending) = patch.pending {
            self.flags.pending = pending;
        }
        if let Some(history) = &patch.level_history {
            self.flags.level_history = history.clone();
        }
        apply_remaining_capacity(&mut self.items, &patch.remaining_capacity);
        self.derived = None;
    }
}

fn apply_remaining_capacity(items: &mut [Item], seeded: &BTreeMap<ItemId, StrainCapacity>) {
    for item in items.iter_mut() {
        if let Some(capacity) = seeded.get(&item.id) {
            if let Some(gear) = item.equipped_gear_mut() {
                gear.remaining_capacity.get_or_insert(*capacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{GearData, GuiseData, ItemData};
    use crate::value_objects::Attribute;
    use serde_json::json;

    #[test]
    fn sparse_store_documents_deserialize() {
        let record: CharacterRecord = serde_json::from_value(json!({
            "id": "0d5e6a39-7c55-4c43-9a8c-3a7c2c1c9e01",
            "name": "Vess",
            "level": "four",
            "baseAttributes": { "finesse": 2 }
        }))
        .expect("sparse record");

        assert_eq!(record.kind, RecordKind::Character);
        assert_eq!(record.level, 1);
        assert_eq!(record.base_attributes.get(Attribute::Finesse), 2);
        assert!(record.strain.is_none());
        assert!(record.flags.pending.is_empty());
        assert!(record.derived.is_none());
    }

    #[test]
    fn untyped_items_and_loose_counters_still_load() {
        let mut record: CharacterRecord = serde_json::from_value(json!({
            "id": "0d5e6a39-7c55-4c43-9a8c-3a7c2c1c9e01",
            "name": "Vess",
            "level": 3,
            "items": [
                { "system": { "type": "asset", "tags": ["contact"] } },
                { "name": "Notes", "system": { "description": "no type at all" } }
            ],
            "flags": {
                "pending": { "attributes": "1", "skills": -1 },
                "levelHistory": [{ "prevLevel": 0 }]
            }
        }))
        .expect("tolerant record");

        assert_eq!(record.items.len(), 2);
        assert!(record
            .items
            .iter()
            .all(|item| matches!(item.system, ItemData::Other(_))));
        assert_eq!(record.flags.pending.attributes, 1);
        assert_eq!(record.flags.pending.skills, 0);
        assert_eq!(
            record.flags.level_history.latest().map(|s| s.prev_level),
            Some(Level::MIN)
        );

        let report = crate::derivation::derive_sheet(&mut record, None);
        assert!(!report.seeded_any());
        assert_eq!(record.derived.as_ref().map(|d| d.level.get()), Some(3));
    }

    #[test]
    fn embedded_class_follows_class_ref() {
        let class = Item::new("Cardsharp", ItemData::Class(GuiseData::default()));
        let class_id = class.id;
        let record = CharacterRecord::new("Vess").with_equipped_class(class);

        assert_eq!(record.embedded_class().map(|i| i.id), Some(class_id));
        assert!(!record.needs_external_class());
    }

    #[test]
    fn durable_class_ref_needs_the_store() {
        let mut record = CharacterRecord::new("Vess");
        record.class_ref = Some(ClassRef::new("catalog.classes.cardsharp"));

        assert!(record.embedded_class().is_none());
        assert!(record.needs_external_class());
    }

    #[test]
    fn apply_patch_only_touches_named_fields() {
        let mut record = CharacterRecord::new("Vess")
            .with_level(3)
            .with_skills(SkillRanks::new().with_skill("stealth", 1));
        record.spark_bonus = 2;

        let patch = RecordPatch::new().with_level(Level::clamped(4)).with_pending(
            PendingRewards {
                moves: 1,
                ..PendingRewards::default()
            },
        );
        record.apply_patch(&patch);

        assert_eq!(record.level, 4);
        assert_eq!(record.flags.pending.moves, 1);
        assert_eq!(record.spark_bonus, 2);
        assert_eq!(record.skills.get("stealth"), Some(1));
    }

    #[test]
    fn apply_patch_never_overwrites_existing_remaining_capacity() {
        let coat = Item::new(
            "Coat",
            ItemData::Armor(GearData {
                equipped: true,
                mortal_capacity: 3,
                soul_capacity: 0,
                remaining_capacity: Some(StrainCapacity::new(1, 0)),
            }),
        );
        let coat_id = coat.id;
        let mut record = CharacterRecord::new("Vess").with_item(coat);

        record.apply_patch(
            &RecordPatch::new().with_remaining_capacity(coat_id, StrainCapacity::new(3, 0)),
        );

        match record.item(coat_id).map(|i| &i.system) {
            Some(ItemData::Armor(gear)) => {
                assert_eq!(gear.remaining_capacity, Some(StrainCapacity::new(1, 0)))
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn group_defaults_fill_only_missing_parts() {
        let mut group = GroupData {
            currency: Some(40),
            biography: None,
            gambits: None,
        };
        group.ensure_defaults();

        assert_eq!(group.currency, Some(40));
        assert_eq!(group.biography, Some(GroupBiography::default()));
        assert_eq!(
            group.gambits.as_ref().map(|g| g.hand_size),
            Some(SharedGambitDeck::DEFAULT_HAND_SIZE)
        );
    }
}
