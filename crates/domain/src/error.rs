//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The progression table has no entry for this level
    #[error("No progression data for level {0} (valid levels are 1-12)")]
    OutOfRangeLevel(i64),

    /// Attribute key outside the fixed attribute set
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Skill key not present on the character
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// Class modifier naming something other than an attribute
    #[error("Unknown modifier key '{key}' on class {class_name}")]
    UnknownModifier { class_name: String, key: String },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if value.is_nan() {
    ///     return Err(DomainError::validation("Modifier must be a finite number"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an unknown attribute error
    pub fn unknown_attribute(key: impl Into<String>) -> Self {
        Self::UnknownAttribute(key.into())
    }

    /// Create an unknown skill error
    pub fn unknown_skill(key: impl Into<String>) -> Self {
        Self::UnknownSkill(key.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("modifier must be finite");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: modifier must be finite");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Character", "123e4567-e89b-12d3-a456-426614174000");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Character"));
        assert!(err.to_string().contains("123e4567"));
    }

    #[test]
    fn test_out_of_range_level_message() {
        let err = DomainError::OutOfRangeLevel(13);
        assert_eq!(
            err.to_string(),
            "No progression data for level 13 (valid levels are 1-12)"
        );
    }

    #[test]
    fn test_unknown_modifier_names_the_class() {
        let err = DomainError::UnknownModifier {
            class_name: "Gambler".to_string(),
            key: "luck".to_string(),
        };
        assert!(err.to_string().contains("Gambler"));
        assert!(err.to_string().contains("luck"));
    }
}
