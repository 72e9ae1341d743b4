//! Level-up operation errors.

use guisebook_domain::{CharacterId, DomainError, Level, PendingKind};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during level-up operations.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Record {0} is a group, not a character")]
    NotACharacter(CharacterId),
    #[error("Nothing pending to spend for {0}")]
    NothingPendingToSpend(PendingKind),
    #[error("Unknown spend kind: {0}")]
    UnknownSpendKind(String),
    #[error("Invalid payload for {kind}: {reason}")]
    InvalidPayload { kind: &'static str, reason: String },
    #[error("Move {move_id} not found in pack {pack}")]
    MoveNotFound { pack: String, move_id: String },
    #[error("No progression data for level {0}")]
    MissingProgressionData(Level),
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ProgressionError {
    pub fn invalid_payload(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            kind,
            reason: reason.into(),
        }
    }

    /// Conditions a player can cause through normal use; show as a notice.
    pub fn is_user_notice(&self) -> bool {
        matches!(self, Self::NothingPendingToSpend(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_counters_are_user_notices() {
        assert!(ProgressionError::NothingPendingToSpend(PendingKind::Skills).is_user_notice());
        assert!(!ProgressionError::UnknownSpendKind("juggle".into()).is_user_notice());
        assert!(!ProgressionError::from(DomainError::unknown_attribute("luck")).is_user_notice());
    }
}
