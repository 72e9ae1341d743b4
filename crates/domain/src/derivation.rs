//! Derived-sheet computation.
//!
//! [`derive_sheet`] recomputes every derived field of a record from its
//! persisted fields and its equipped class. It never fails: missing or
//! malformed input degrades to defaults. The only persisted mutations it
//! performs are fill-if-absent defaults (strain containers, gear
//! `remaining_capacity`, group fields), so running it repeatedly is safe.

use std::collections::BTreeMap;

use crate::entities::{CharacterRecord, DerivedSheet, GambitCaps, GroupData, Item};
use crate::error::DomainError;
use crate::progression::{max_draw_size, progression_at};
use crate::value_objects::{Strain, StrainCapacity};
use crate::ItemId;

/// What a derivation pass did besides computing the derived sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivationReport {
    /// Equipped gear whose `remaining_capacity` was seeded by this pass.
    pub seeded_capacity: BTreeMap<ItemId, StrainCapacity>,
    /// Class data that failed validation and was ignored.
    pub rejected_class: Option<DomainError>,
}

impl DerivationReport {
    pub fn seeded_any(&self) -> bool {
        !self.seeded_capacity.is_empty()
    }
}

/// Recompute derived fields in place.
///
/// `resolved_class` is the store's resolution of a durable class reference
/// and is only consulted when the reference does not name an embedded item.
pub fn derive_sheet(
    record: &mut CharacterRecord,
    resolved_class: Option<&Item>,
) -> DerivationReport {
    if record.is_group() {
        record
            .group
            .get_or_insert_with(GroupData::default)
            .ensure_defaults();
        return DerivationReport::default();
    }

    let mut report = DerivationReport::default();

    let mut attributes = record.base_attributes;

    let base_capacity = *record
        .base_strain_capacity
        .get_or_insert_with(StrainCapacity::default);
    record
        .strain
        .get_or_insert_with(Strain::default)
        .set_capacity_unless_overridden(base_capacity);

    for item in record.items.iter_mut() {
        let item_id = item.id;
        if let Some(seeded) = item
            .equipped_gear_mut()
            .and_then(|gear| gear.seed_remaining_capacity())
        {
            report.seeded_capacity.insert(item_id, seeded);
        }
    }

    let class_item = record
        .embedded_class()
        .or_else(|| {
            resolved_class.filter(|_| record.class_ref.is_some())
        })
        .cloned();

    // Spark slots, risk dice and caster type come only from a resolved class.
    let mut derived = DerivedSheet::default();

    if let Some(class_item) = class_item {
        match class_item.guise_profile() {
            Ok(Some(profile)) => {
                attributes = attributes.apply(&profile.modifiers);
                if let Some(strain) = record.strain.as_mut() {
                    strain.set_capacity_unless_overridden(profile.capacity);
                }
                derived.spark_slots = profile.spark_slots.saturating_add(record.spark_bonus);
                derived.risk_dice = profile.risk_dice;
                derived.caster_type = profile.caster_type;
                derived.class_item = Some(class_item.id);
            }
            Ok(None) => {}
            Err(err) => report.rejected_class = Some(err),
        }
    }

    derived.attributes = attributes.clamped();

    let level = record.current_level();
    record.level = i64::from(level.get());
    derived.level = level;

    if let Ok(row) = progression_at(level) {
        derived.gambits = GambitCaps {
            max_deck_size: row.caps.draw_pool_size,
            max_draw_size: max_draw_size(level),
            max_equip: row.caps.equip_max,
        };
        derived.tier = row.tier_id().to_string();
        derived.unlocks = row.unlocks;
    }

    record.derived = Some(derived);
    report
}
