//! Level-up use cases.
//!
//! Advance, undo, and spending of pending rewards. Each operation either
//! completes its grouped write or fails before writing anything.

use std::sync::Arc;

mod advance;
mod error;
mod narrative;
mod spend;
mod types;
mod undo;

pub use advance::AdvanceLevel;
pub use error::ProgressionError;
pub use narrative::{render_advance, render_undo, NarrativeHook};
pub use spend::SpendPending;
pub use types::{
    ActingContext, AdvanceOutcome, LevelAdvance, LevelRollback, SpendOutcome, SpendRequest,
    UndoOutcome,
};
pub use undo::UndoLevel;

/// Container for level-up use cases.
pub struct ProgressionUseCases {
    pub advance: Arc<AdvanceLevel>,
    pub undo: Arc<UndoLevel>,
    pub spend: Arc<SpendPending>,
}

impl ProgressionUseCases {
    pub fn new(
        advance: Arc<AdvanceLevel>,
        undo: Arc<UndoLevel>,
        spend: Arc<SpendPending>,
    ) -> Self {
        Self {
            advance,
            undo,
            spend,
        }
    }
}
