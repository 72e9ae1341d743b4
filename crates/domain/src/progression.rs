//! Level progression table.
//!
//! Maps each level (1-12) to its caps, feature unlocks, and the rewards
//! granted when a character advances *into* that level. Grants are per
//! level-up deltas, not running totals. Unlock flags are monotonic across
//! the table: once a feature unlocks it stays unlocked at higher levels.

use serde::Serialize;

use crate::error::DomainError;
use crate::value_objects::{CasterType, Level};

/// Tier label used when a table entry carries none.
pub const DEFAULT_TIER: &str = "rookie";

/// Level-derived capacity limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelCaps {
    pub draw_pool_size: u32,
    pub equip_max: u32,
    pub tier_id: Option<&'static str>,
}

/// Feature flags unlocked at a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUnlocks {
    pub trick_deck: bool,
    pub ace_in_sleeve: bool,
    pub signature_perk: bool,
    pub final_hand: bool,
    pub all_tiers: bool,
    pub dual_class: bool,
}

/// Rewards granted by advancing into a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelGrants {
    pub attribute_points: u32,
    pub skill_points: u32,
    pub moves: u32,
    pub spark_slots: u32,
    pub signature_perk: u32,
    pub final_hand_discoverable: u32,
}

impl LevelGrants {
    /// Spark slots are only granted to full and half casters.
    pub fn for_caster(self, caster: CasterType) -> Self {
        if caster.gains_spark() {
            self
        } else {
            Self {
                spark_slots: 0,
                ..self
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Human-readable gain lines, zero grants omitted.
    ///
    /// ```
    /// use guisebook_domain::progression::LevelGrants;
    ///
    /// let grants = LevelGrants { attribute_points: 1, skill_points: 1, signature_perk: 1, ..Default::default() };
    /// assert_eq!(grants.gain_lines(), vec!["+1 Attribute", "+1 Skill", "Signature Perk"]);
    /// ```
    pub fn gain_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let counted = [
            (self.attribute_points, "Attribute"),
            (self.skill_points, "Skill"),
            (self.moves, "Move"),
            (self.spark_slots, "Spark Slot"),
        ];
        for (count, noun) in counted {
            if count > 0 {
                let plural = if count == 1 { "" } else { "s" };
                lines.push(format!("+{} {}{}", count, noun, plural));
            }
        }
        if self.signature_perk > 0 {
            lines.push("Signature Perk".to_string());
        }
        if self.final_hand_discoverable > 0 {
            lines.push("Final Hand Discoverable".to_string());
        }
        lines
    }
}

/// One row of the progression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionLevel {
    pub level: u8,
    pub caps: LevelCaps,
    pub unlocks: LevelUnlocks,
    pub grants: LevelGrants,
}

impl ProgressionLevel {
    pub fn tier_id(&self) -> &'static str {
        self.caps.tier_id.unwrap_or(DEFAULT_TIER)
    }
}

const fn caps(draw_pool_size: u32, equip_max: u32, tier_id: &'static str) -> LevelCaps {
    LevelCaps {
        draw_pool_size,
        equip_max,
        tier_id: Some(tier_id),
    }
}

const fn unlocks(
    trick_deck: bool,
    ace_in_sleeve: bool,
    signature_perk: bool,
    dual_class: bool,
    final_hand: bool,
    all_tiers: bool,
) -> LevelUnlocks {
    LevelUnlocks {
        trick_deck,
        ace_in_sleeve,
        signature_perk,
        final_hand,
        all_tiers,
        dual_class,
    }
}

const fn grants(
    attribute_points: u32,
    skill_points: u32,
    moves: u32,
    spark_slots: u32,
    signature_perk: u32,
    final_hand_discoverable: u32,
) -> LevelGrants {
    LevelGrants {
        attribute_points,
        skill_points,
        moves,
        spark_slots,
        signature_perk,
        final_hand_discoverable,
    }
}

static PROGRESSION_TABLE: [ProgressionLevel; 12] = [
    ProgressionLevel {
        level: 1,
        caps: caps(6, 2, "rookie"),
        unlocks: unlocks(false, false, false, false, false, false),
        grants: grants(0, 0, 0, 0, 0, 0),
    },
    ProgressionLevel {
        level: 2,
        caps: caps(6, 2, "rookie"),
        unlocks: unlocks(true, false, false, false, false, false),
        grants: grants(0, 1, 1, 1, 0, 0),
    },
    ProgressionLevel {
        level: 3,
        caps: caps(7, 3, "rookie"),
        unlocks: unlocks(true, false, false, false, false, false),
        grants: grants(1, 1, 0, 1, 0, 0),
    },
    ProgressionLevel {
        level: 4,
        caps: caps(7, 3, "veteran"),
        unlocks: unlocks(true, true, false, false, false, false),
        grants: grants(0, 1, 1, 1, 0, 0),
    },
    ProgressionLevel {
        level: 5,
        caps: caps(8, 3, "veteran"),
        unlocks: unlocks(true, true, true, false, false, false),
        grants: grants(1, 1, 0, 1, 1, 0),
    },
    ProgressionLevel {
        level: 6,
        caps: caps(8, 4, "veteran"),
        unlocks: unlocks(true, true, true, false, false, false),
        grants: grants(0, 1, 1, 1, 0, 0),
    },
    ProgressionLevel {
        level: 7,
        caps: caps(9, 4, "elite"),
        unlocks: unlocks(true, true, true, false, false, false),
        grants: grants(1, 1, 0, 1, 0, 0),
    },
    ProgressionLevel {
        level: 8,
        caps: caps(9, 4, "elite"),
        unlocks: unlocks(true, true, true, true, false, false),
        grants: grants(0, 1, 1, 1, 0, 0),
    },
    ProgressionLevel {
        level: 9,
        caps: caps(10, 5, "elite"),
        unlocks: unlocks(true, true, true, true, false, false),
        grants: grants(1, 1, 0, 1, 0, 0),
    },
    ProgressionLevel {
        level: 10,
        caps: caps(10, 5, "legend"),
        unlocks: unlocks(true, true, true, true, true, false),
        grants: grants(0, 1, 1, 1, 0, 1),
    },
    ProgressionLevel {
        level: 11,
        caps: caps(12, 5, "legend"),
        unlocks: unlocks(true, true, true, true, true, false),
        grants: grants(1, 1, 0, 1, 0, 0),
    },
    ProgressionLevel {
        level: 12,
        caps: caps(12, 6, "legend"),
        unlocks: unlocks(true, true, true, true, true, true),
        grants: grants(0, 1, 1, 1, 1, 0),
    },
];

/// Look up the table row for a raw level number.
pub fn progression_for(level: i64) -> Result<&'static ProgressionLevel, DomainError> {
    PROGRESSION_TABLE
        .iter()
        .find(|row| i64::from(row.level) == level)
        .ok_or(DomainError::OutOfRangeLevel(level))
}

/// Table row for an already validated level.
pub fn progression_at(level: Level) -> Result<&'static ProgressionLevel, DomainError> {
    progression_for(i64::from(level.get()))
}

/// Hand size band: 3 for levels 1-5, 4 for 6-9, 5 for 10-12.
pub fn max_draw_size(level: Level) -> u32 {
    match level.get() {
        0..=5 => 3,
        6..=9 => 4,
        _ => 5,
    }
}

/// Every table row, in level order.
pub fn table() -> &'static [ProgressionLevel] {
    &PROGRESSION_TABLE
}
