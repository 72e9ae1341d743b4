//! In-memory adapters for development and testing.
//!
//! Nothing here persists past the process. The binary seeds these from a
//! JSON file; tests build them directly.

mod catalog;
mod chat_log;
mod record_store;
mod seed;

pub use catalog::InMemoryCatalog;
pub use chat_log::InMemoryChatLog;
pub use record_store::InMemoryRecordStore;
pub use seed::SeedFile;
