//! Inputs and outcomes of the level-up operations.

use std::str::FromStr;

use guisebook_domain::{
    Attribute, Item, Level, LevelGrants, PendingKind, PendingRewards, UserId,
};
use serde_json::Value;

use super::error::ProgressionError;

/// Who is acting. Passed into every operation instead of ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingContext {
    pub user_id: UserId,
    /// Display name used on narrative messages.
    pub speaker: String,
}

impl ActingContext {
    pub fn new(user_id: UserId, speaker: impl Into<String>) -> Self {
        Self {
            user_id,
            speaker: speaker.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAdvance {
    pub from: Level,
    pub to: Level,
    pub tier: String,
    /// Grants for `to`, after caster scaling.
    pub grants: LevelGrants,
    pub pending: PendingRewards,
    /// Caller asked for the interactive allocation flow.
    pub guided: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced(LevelAdvance),
    AlreadyAtMax { level: Level },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRollback {
    pub from: Level,
    pub to: Level,
    /// Pending counters as restored from the snapshot.
    pub pending: PendingRewards,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    Undone(LevelRollback),
    NothingToUndo,
}

/// One unit of a pending reward and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpendRequest {
    Attribute(Attribute),
    Skill(String),
    Spark,
    AckSignature,
    AckFinalHand,
    Move { move_id: String },
}

impl SpendRequest {
    pub const ATTRIBUTE: &'static str = "attribute";
    pub const SKILL: &'static str = "skill";
    pub const SPARK: &'static str = "spark";
    pub const ACK_SIGNATURE: &'static str = "ack-signature";
    pub const ACK_FINAL_HAND: &'static str = "ack-finalhand";
    pub const MOVE: &'static str = "move";

    /// Parse a caller's `(kind, payload)` pair.
    ///
    /// Attribute and skill payloads carry `{"key": …}`, moves carry
    /// `{"id": …}`; a bare string is accepted for either.
    pub fn parse(kind: &str, payload: &Value) -> Result<Self, ProgressionError> {
        match kind {
            Self::ATTRIBUTE => {
                let key = payload_str(payload, "key")
                    .ok_or_else(|| ProgressionError::invalid_payload(Self::ATTRIBUTE, "missing key"))?;
                Ok(Self::Attribute(Attribute::from_str(key)?))
            }
            Self::SKILL => {
                let key = payload_str(payload, "key")
                    .ok_or_else(|| ProgressionError::invalid_payload(Self::SKILL, "missing key"))?;
                Ok(Self::Skill(key.to_string()))
            }
            Self::SPARK => Ok(Self::Spark),
            Self::ACK_SIGNATURE => Ok(Self::AckSignature),
            Self::ACK_FINAL_HAND => Ok(Self::AckFinalHand),
            Self::MOVE => {
                let move_id = payload_str(payload, "id")
                    .ok_or_else(|| ProgressionError::invalid_payload(Self::MOVE, "missing id"))?;
                Ok(Self::Move {
                    move_id: move_id.to_string(),
                })
            }
            other => Err(ProgressionError::UnknownSpendKind(other.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Attribute(_) => Self::ATTRIBUTE,
            Self::Skill(_) => Self::SKILL,
            Self::Spark => Self::SPARK,
            Self::AckSignature => Self::ACK_SIGNATURE,
            Self::AckFinalHand => Self::ACK_FINAL_HAND,
            Self::Move { .. } => Self::MOVE,
        }
    }

    /// The counter this request consumes.
    pub fn pending_kind(&self) -> PendingKind {
        match self {
            Self::Attribute(_) => PendingKind::Attributes,
            Self::Skill(_) => PendingKind::Skills,
            Self::Spark => PendingKind::SparkSlots,
            Self::AckSignature => PendingKind::SignaturePerk,
            Self::AckFinalHand => PendingKind::FinalHandDiscoverable,
            Self::Move { .. } => PendingKind::Moves,
        }
    }
}

fn payload_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    let raw = match payload {
        Value::String(s) => Some(s.as_str()),
        other => other.get(field).and_then(Value::as_str),
    }?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Result of a spend: updated counters, or the created move.
#[derive(Debug, Clone, PartialEq)]
pub enum SpendOutcome {
    Pending(PendingRewards),
    Move(Item),
}

#[cfg(test)]
mod tests {
    use super::*;
    use guisebook_domain::DomainError;
    use serde_json::json;

    #[test]
    fn parses_each_kind() {
        assert_eq!(
            SpendRequest::parse("attribute", &json!({ "key": "finesse" })).expect("attribute"),
            SpendRequest::Attribute(Attribute::Finesse)
        );
        assert_eq!(
            SpendRequest::parse("skill", &json!("stealth")).expect("skill"),
            SpendRequest::Skill("stealth".into())
        );
        assert_eq!(
            SpendRequest::parse("move", &json!({ "id": "read-the-room" })).expect("move"),
            SpendRequest::Move {
                move_id: "read-the-room".into()
            }
        );
        assert_eq!(
            SpendRequest::parse("ack-finalhand", &Value::Null).expect("ack"),
            SpendRequest::AckFinalHand
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = SpendRequest::parse("juggle", &Value::Null);

        assert!(matches!(result, Err(ProgressionError::UnknownSpendKind(k)) if k == "juggle"));
    }

    #[test]
    fn unknown_attribute_is_a_domain_error() {
        let result = SpendRequest::parse("attribute", &json!({ "key": "luck" }));

        assert!(matches!(
            result,
            Err(ProgressionError::Domain(DomainError::UnknownAttribute(_)))
        ));
    }

    #[test]
    fn missing_payload_is_invalid() {
        let result = SpendRequest::parse("skill", &json!({ "key": "  " }));

        assert!(matches!(
            result,
            Err(ProgressionError::InvalidPayload { kind: "skill", .. })
        ));
    }

    #[test]
    fn requests_map_to_their_counters() {
        assert_eq!(SpendRequest::Spark.pending_kind(), PendingKind::SparkSlots);
        assert_eq!(
            SpendRequest::AckSignature.pending_kind(),
            PendingKind::SignaturePerk
        );
    }
}
