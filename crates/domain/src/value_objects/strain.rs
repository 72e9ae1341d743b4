//! Two-track strain (mortal and soul) with capacity overrides.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::common::loose_i32;

/// A capacity track that a player may pin by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapacityTrack {
    #[serde(rename = "mortal capacity")]
    Mortal,
    #[serde(rename = "soul capacity")]
    Soul,
}

/// Mortal and soul capacity values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrainCapacity {
    #[serde(default, deserialize_with = "loose_i32")]
    pub mortal: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub soul: i32,
}

impl StrainCapacity {
    pub fn new(mortal: i32, soul: i32) -> Self {
        Self { mortal, soul }
    }
}

/// Current strain and its capacities.
///
/// Capacities are derived from the base capacity or the equipped class
/// unless the track is listed in `manual_override`, in which case the
/// stored value is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strain {
    #[serde(default, deserialize_with = "loose_i32")]
    pub mortal: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub soul: i32,
    #[serde(rename = "mortal capacity", default, deserialize_with = "loose_i32")]
    pub mortal_capacity: i32,
    #[serde(rename = "soul capacity", default, deserialize_with = "loose_i32")]
    pub soul_capacity: i32,
    #[serde(default)]
    pub manual_override: BTreeSet<CapacityTrack>,
}

impl Strain {
    pub fn is_overridden(&self, track: CapacityTrack) -> bool {
        self.manual_override.contains(&track)
    }

    pub fn capacity(&self, track: CapacityTrack) -> i32 {
        match track {
            CapacityTrack::Mortal => self.mortal_capacity,
            CapacityTrack::Soul => self.soul_capacity,
        }
    }

    /// Writes both capacities, skipping any track that is manually overridden.
    pub fn set_capacity_unless_overridden(&mut self, capacity: StrainCapacity) {
        if !self.is_overridden(CapacityTrack::Mortal) {
            self.mortal_capacity = capacity.mortal;
        }
        if !self.is_overridden(CapacityTrack::Soul) {
            self.soul_capacity = capacity.soul;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overridden_track_keeps_its_value() {
        let mut strain = Strain {
            mortal_capacity: 9,
            soul_capacity: 1,
            manual_override: BTreeSet::from([CapacityTrack::Mortal]),
            ..Strain::default()
        };

        strain.set_capacity_unless_overridden(StrainCapacity::new(4, 5));

        assert_eq!(strain.capacity(CapacityTrack::Mortal), 9);
        assert_eq!(strain.capacity(CapacityTrack::Soul), 5);
    }

    #[test]
    fn capacity_keys_use_spaced_names() {
        let strain: Strain = serde_json::from_value(json!({
            "mortal": 1,
            "mortal capacity": 6,
            "manualOverride": ["soul capacity"]
        }))
        .expect("strain");

        assert_eq!(strain.mortal_capacity, 6);
        assert!(strain.is_overridden(CapacityTrack::Soul));
        assert!(!strain.is_overridden(CapacityTrack::Mortal));
    }
}
