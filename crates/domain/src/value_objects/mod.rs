//! Value objects - Immutable objects defined by their attributes

mod attributes;
mod caster;
mod history;
mod level;
mod rewards;
mod skills;
mod strain;

pub use attributes::{Attribute, AttributeScores, GuiseModifiers, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
pub use caster::CasterType;
pub use history::{LevelHistory, LevelSnapshot, SnapshotData, MAX_HISTORY};
pub use level::Level;
pub use rewards::{PendingKind, PendingRewards};
pub use skills::SkillRanks;
pub use strain::{CapacityTrack, Strain, StrainCapacity};
