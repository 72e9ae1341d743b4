//! Domain entities - the character record and its embedded items

mod character;
mod item;

pub use character::{
    CharacterRecord, ClassRef, DerivedSheet, GambitCaps, GambitPiles, GroupBiography, GroupData,
    ProgressionFlags, RecordKind, SharedGambitDeck,
};
pub use item::{GambitCard, GearData, GuiseData, GuiseProfile, Item, ItemData, MoveData};
