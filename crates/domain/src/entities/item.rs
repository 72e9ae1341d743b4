//! Item entity - sub-records embedded in a character record
//!
//! Classes (guises), armor, miscellaneous gear, moves, and gambit cards all
//! live in the record's item list. The item type lives inside `system`:
//!
//! ```json
//! { "id": "…", "name": "Cardsharp", "system": { "type": "class", "sparkSlots": 2 } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::loose_i32;
use crate::error::DomainError;
use crate::value_objects::{Attribute, CasterType, GuiseModifiers, StrainCapacity};
use crate::ItemId;

/// An embedded item owned by a character record.
///
/// All fields are public; any combination of values is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    pub system: ItemData,
    /// Catalog reference the item was instantiated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, system: ItemData) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            system,
            source_id: None,
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn is_class(&self) -> bool {
        matches!(self.system, ItemData::Class(_))
    }

    /// Gear data for equipped armor and misc items.
    pub fn equipped_gear_mut(&mut self) -> Option<&mut GearData> {
        match &mut self.system {
            ItemData::Armor(gear) | ItemData::Misc(gear) if gear.equipped => Some(gear),
            _ => None,
        }
    }

    /// Validated class profile, `Ok(None)` when this is not a class.
    pub fn guise_profile(&self) -> Result<Option<GuiseProfile>, DomainError> {
        match &self.system {
            ItemData::Class(data) => data.validate(&self.name).map(Some),
            _ => Ok(None),
        }
    }
}

/// Type-specific item data.
///
/// Item types this crate does not interpret (assets, feats, ...) are kept
/// verbatim in [`ItemData::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemData {
    Class(GuiseData),
    Armor(GearData),
    Misc(GearData),
    Move(MoveData),
    Gambit(GambitCard),
    #[serde(untagged)]
    Other(Value),
}

/// Class (guise) data as persisted. Validate with [`GuiseData::validate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuiseData {
    #[serde(default)]
    pub modifiers: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "loose_i32")]
    pub mortal_capacity: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub soul_capacity: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub spark_slots: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub risk_dice: i32,
    #[serde(default)]
    pub caster_type: CasterType,
}

impl GuiseData {
    /// Check the modifier map and produce a typed profile.
    pub fn validate(&self, class_name: &str) -> Result<GuiseProfile, DomainError> {
        Ok(GuiseProfile {
            modifiers: GuiseModifiers::from_raw(class_name, &self.modifiers)?,
            capacity: StrainCapacity::new(self.mortal_capacity, self.soul_capacity),
            spark_slots: self.spark_slots,
            risk_dice: self.risk_dice,
            caster_type: self.caster_type,
        })
    }
}

/// Validated class data consumed by derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiseProfile {
    pub modifiers: GuiseModifiers,
    pub capacity: StrainCapacity,
    pub spark_slots: i32,
    pub risk_dice: i32,
    pub caster_type: CasterType,
}

/// Armor and miscellaneous gear that absorbs strain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearData {
    #[serde(default)]
    pub equipped: bool,
    #[serde(default, deserialize_with = "loose_i32")]
    pub mortal_capacity: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub soul_capacity: i32,
    /// Seeded once from the capacities above; never resynced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_capacity: Option<StrainCapacity>,
}

impl GearData {
    /// Fill `remaining_capacity` if absent. Returns the seeded value.
    pub fn seed_remaining_capacity(&mut self) -> Option<StrainCapacity> {
        if self.remaining_capacity.is_some() {
            return None;
        }
        let seeded = StrainCapacity::new(self.mortal_capacity, self.soul_capacity);
        self.remaining_capacity = Some(seeded);
        Some(seeded)
    }
}

/// A move the character can make.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_with: Option<Attribute>,
}

/// A drawable gambit card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GambitCard {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub equipped: bool,
}
