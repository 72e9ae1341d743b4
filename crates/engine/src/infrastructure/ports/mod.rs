//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The record store (host document persistence)
//! - The content catalog (move packs)
//! - The chat feed (narrative events)
//! - Clock (for testing)

mod error;
mod feed;
mod repos;
mod testing;

pub use error::{FeedError, RepoError};
pub use feed::{ChatFeed, NarrativeMessage};
pub use repos::{ContentCatalog, RecordStore};
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use feed::MockChatFeed;
#[cfg(test)]
pub use repos::{MockContentCatalog, MockRecordStore};
#[cfg(test)]
pub use testing::MockClockPort;
