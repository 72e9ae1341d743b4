//! Application state and composition.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::entities::CharacterSheets;
use crate::infrastructure::ports::{ChatFeed, ClockPort, ContentCatalog, RecordStore};
use crate::use_cases::progression::{
    ActingContext, AdvanceLevel, NarrativeHook, SpendPending, UndoLevel,
};
use crate::use_cases::ProgressionUseCases;

/// Main application state.
///
/// Holds the entity modules and use cases, wired over the injected ports.
pub struct App {
    pub config: EngineConfig,
    pub sheets: Arc<CharacterSheets>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub progression: ProgressionUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn RecordStore>,
        catalog: Arc<dyn ContentCatalog>,
        feed: Arc<dyn ChatFeed>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let sheets = Arc::new(CharacterSheets::new(store));
        let narrative = Arc::new(NarrativeHook::new(feed, clock.clone()));

        let progression = ProgressionUseCases::new(
            Arc::new(AdvanceLevel::new(sheets.clone(), clock, narrative.clone())),
            Arc::new(UndoLevel::new(sheets.clone(), narrative)),
            Arc::new(SpendPending::new(
                sheets.clone(),
                catalog,
                config.move_pack.clone(),
            )),
        );

        Self {
            config,
            sheets,
            use_cases: UseCases { progression },
        }
    }

    /// Acting context for the configured speaker.
    pub fn acting_as(&self, user_id: guisebook_domain::UserId) -> ActingContext {
        ActingContext::new(user_id, self.config.speaker.clone())
    }
}
