//! Pending (earned but unspent) level-up rewards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::loose_u32;
use crate::error::DomainError;
use crate::progression::LevelGrants;

/// One of the pending reward counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingKind {
    Attributes,
    Skills,
    Moves,
    SparkSlots,
    SignaturePerk,
    FinalHandDiscoverable,
}

impl PendingKind {
    pub fn key(&self) -> &'static str {
        match self {
            PendingKind::Attributes => "attributes",
            PendingKind::Skills => "skills",
            PendingKind::Moves => "moves",
            PendingKind::SparkSlots => "sparkSlots",
            PendingKind::SignaturePerk => "signaturePerk",
            PendingKind::FinalHandDiscoverable => "finalHandDiscoverable",
        }
    }
}

impl fmt::Display for PendingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PendingKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attributes" => Ok(PendingKind::Attributes),
            "skills" => Ok(PendingKind::Skills),
            "moves" => Ok(PendingKind::Moves),
            "sparkSlots" => Ok(PendingKind::SparkSlots),
            "signaturePerk" => Ok(PendingKind::SignaturePerk),
            "finalHandDiscoverable" => Ok(PendingKind::FinalHandDiscoverable),
            _ => Err(DomainError::parse(format!("Unknown pending reward: {}", s))),
        }
    }
}

/// Unspent reward counters. Every counter is non-negative by type;
/// negative or non-numeric stored values read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingRewards {
    #[serde(deserialize_with = "loose_u32")]
    pub attributes: u32,
    #[serde(deserialize_with = "loose_u32")]
    pub skills: u32,
    #[serde(deserialize_with = "loose_u32")]
    pub moves: u32,
    #[serde(deserialize_with = "loose_u32")]
    pub spark_slots: u32,
    #[serde(deserialize_with = "loose_u32")]
    pub signature_perk: u32,
    #[serde(deserialize_with = "loose_u32")]
    pub final_hand_discoverable: u32,
}

impl PendingRewards {
    pub fn get(&self, kind: PendingKind) -> u32 {
        match kind {
            PendingKind::Attributes => self.attributes,
            PendingKind::Skills => self.skills,
            PendingKind::Moves => self.moves,
            PendingKind::SparkSlots => self.spark_slots,
            PendingKind::SignaturePerk => self.signature_perk,
            PendingKind::FinalHandDiscoverable => self.final_hand_discoverable,
        }
    }

    fn slot(&mut self, kind: PendingKind) -> &mut u32 {
        match kind {
            PendingKind::Attributes => &mut self.attributes,
            PendingKind::Skills => &mut self.skills,
            PendingKind::Moves => &mut self.moves,
            PendingKind::SparkSlots => &mut self.spark_slots,
            PendingKind::SignaturePerk => &mut self.signature_perk,
            PendingKind::FinalHandDiscoverable => &mut self.final_hand_discoverable,
        }
    }

    /// Adds a level's grants on top of whatever is still unspent.
    pub fn accumulate(mut self, grants: &LevelGrants) -> Self {
        self.attributes = self.attributes.saturating_add(grants.attribute_points);
        self.skills = self.skills.saturating_add(grants.skill_points);
        self.moves = self.moves.saturating_add(grants.moves);
        self.spark_slots = self.spark_slots.saturating_add(grants.spark_slots);
        self.signature_perk = self.signature_perk.saturating_add(grants.signature_perk);
        self.final_hand_discoverable = self
            .final_hand_discoverable
            .saturating_add(grants.final_hand_discoverable);
        self
    }

    /// Takes one unit of `kind`, or `None` when the counter is already 0.
    pub fn consume(mut self, kind: PendingKind) -> Option<Self> {
        let slot = self.slot(kind);
        *slot = slot.checked_sub(1)?;
        Some(self)
    }

    pub fn total(&self) -> u64 {
        [
            self.attributes,
            self.skills,
            self.moves,
            self.spark_slots,
            self.signature_perk,
            self.final_hand_discoverable,
        ]
        .into_iter()
        .map(u64::from)
        .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_decrements_by_one() {
        let pending = PendingRewards {
            attributes: 2,
            ..PendingRewards::default()
        };
        let next = pending.consume(PendingKind::Attributes).expect("one available");
        assert_eq!(next.attributes, 1);
        assert_eq!(pending.attributes, 2);
    }

    #[test]
    fn consume_at_zero_is_none() {
        assert_eq!(PendingRewards::default().consume(PendingKind::Moves), None);
    }

    #[test]
    fn accumulate_adds_to_unspent_rewards() {
        let pending = PendingRewards {
            skills: 1,
            ..PendingRewards::default()
        };
        let grants = LevelGrants {
            skill_points: 1,
            signature_perk: 1,
            ..LevelGrants::default()
        };
        let next = pending.accumulate(&grants);
        assert_eq!(next.skills, 2);
        assert_eq!(next.signature_perk, 1);
        assert_eq!(next.total(), 3);
    }

    #[test]
    fn stored_counters_are_read_leniently() {
        let pending: PendingRewards = serde_json::from_value(serde_json::json!({
            "attributes": "1",
            "skills": -1,
            "moves": "none",
            "sparkSlots": 2.7
        }))
        .expect("lenient counters");

        assert_eq!(pending.attributes, 1);
        assert_eq!(pending.skills, 0);
        assert_eq!(pending.moves, 0);
        assert_eq!(pending.spark_slots, 2);
        assert_eq!(pending.signature_perk, 0);
    }

    #[test]
    fn total_does_not_overflow() {
        let pending = PendingRewards {
            attributes: u32::MAX,
            skills: u32::MAX,
            moves: 1,
            ..PendingRewards::default()
        };
        assert_eq!(pending.total(), 2 * u64::from(u32::MAX) + 1);
        assert!(!pending.is_empty());
    }

    #[test]
    fn kind_keys_round_trip() {
        for kind in [
            PendingKind::Attributes,
            PendingKind::Skills,
            PendingKind::Moves,
            PendingKind::SparkSlots,
            PendingKind::SignaturePerk,
            PendingKind::FinalHandDiscoverable,
        ] {
            assert_eq!(kind.key().parse::<PendingKind>(), Ok(kind));
        }
    }
}
