//! Guisebook Engine library.
//!
//! Level-up orchestration for guisebook character sheets.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping the record store
//! - `use_cases/` - Level-up operations orchestrating entities
//! - `infrastructure/` - Ports and in-memory adapters
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
