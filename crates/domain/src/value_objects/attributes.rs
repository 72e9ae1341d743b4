//! Attribute keys, attribute scores, and class attribute modifiers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{finite_number, loose_i32};
use crate::error::DomainError;

/// Lowest effective attribute value after modifiers.
pub const ATTRIBUTE_MIN: i32 = -2;
/// Highest effective attribute value after modifiers.
pub const ATTRIBUTE_MAX: i32 = 3;

/// The six fixed attributes of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Tenacity,
    Finesse,
    Resolve,
    Guile,
    Instinct,
    Presence,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Tenacity,
        Attribute::Finesse,
        Attribute::Resolve,
        Attribute::Guile,
        Attribute::Instinct,
        Attribute::Presence,
    ];

    /// Persisted key for this attribute.
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Tenacity => "tenacity",
            Attribute::Finesse => "finesse",
            Attribute::Resolve => "resolve",
            Attribute::Guile => "guile",
            Attribute::Instinct => "instinct",
            Attribute::Presence => "presence",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Tenacity => "Tenacity",
            Attribute::Finesse => "Finesse",
            Attribute::Resolve => "Resolve",
            Attribute::Guile => "Guile",
            Attribute::Instinct => "Instinct",
            Attribute::Presence => "Presence",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.key() == normalized)
            .ok_or_else(|| DomainError::unknown_attribute(s))
    }
}

/// One integer per attribute.
///
/// Deserialization is lenient: each of the six keys is coerced to a finite
/// number and defaults to 0 when absent or non-numeric. Unknown keys are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeScores {
    #[serde(default, deserialize_with = "loose_i32")]
    pub tenacity: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub finesse: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub resolve: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub guile: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub instinct: i32,
    #[serde(default, deserialize_with = "loose_i32")]
    pub presence: i32,
}

impl AttributeScores {
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Tenacity => self.tenacity,
            Attribute::Finesse => self.finesse,
            Attribute::Resolve => self.resolve,
            Attribute::Guile => self.guile,
            Attribute::Instinct => self.instinct,
            Attribute::Presence => self.presence,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Tenacity => &mut self.tenacity,
            Attribute::Finesse => &mut self.finesse,
            Attribute::Resolve => &mut self.resolve,
            Attribute::Guile => &mut self.guile,
            Attribute::Instinct => &mut self.instinct,
            Attribute::Presence => &mut self.presence,
        }
    }

    pub fn with(mut self, attribute: Attribute, value: i32) -> Self {
        *self.get_mut(attribute) = value;
        self
    }

    /// Returns a copy with one attribute raised by 1.
    pub fn incremented(mut self, attribute: Attribute) -> Self {
        let slot = self.get_mut(attribute);
        *slot = slot.saturating_add(1);
        self
    }

    /// Adds each modifier to its attribute.
    pub fn apply(mut self, modifiers: &GuiseModifiers) -> Self {
        for (attribute, delta) in modifiers.iter() {
            let slot = self.get_mut(attribute);
            *slot = slot.saturating_add(delta);
        }
        self
    }

    /// Clamps every attribute into `[ATTRIBUTE_MIN, ATTRIBUTE_MAX]`.
    pub fn clamped(mut self) -> Self {
        for attribute in Attribute::ALL {
            let slot = self.get_mut(attribute);
            *slot = (*slot).clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.into_iter().map(move |attr| (attr, self.get(attr)))
    }
}

/// Attribute deltas granted by an equipped class.
///
/// Built from loosely typed class data through [`GuiseModifiers::from_raw`],
/// which rejects keys outside the attribute set and non-finite values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct GuiseModifiers(BTreeMap<Attribute, i32>);

impl GuiseModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: Attribute, delta: i32) -> Self {
        self.0.insert(attribute, delta);
        self
    }

    /// Validate raw class modifiers.
    pub fn from_raw(class_name: &str, raw: &BTreeMap<String, Value>) -> Result<Self, DomainError> {
        let mut modifiers = BTreeMap::new();
        for (key, value) in raw {
            let attribute = key.parse::<Attribute>().map_err(|_| DomainError::UnknownModifier {
                class_name: class_name.to_string(),
                key: key.clone(),
            })?;
            let delta = finite_number(value).ok_or_else(|| {
                DomainError::validation(format!(
                    "Modifier '{}' on class {} is not a finite number",
                    key, class_name
                ))
            })?;
            modifiers.insert(attribute, delta.trunc() as i32);
        }
        Ok(Self(modifiers))
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        self.0.get(&attribute).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        self.0.iter().map(|(attr, delta)| (*attr, *delta))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
