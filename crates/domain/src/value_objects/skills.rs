//! Skill ranks keyed by skill id.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::finite_number;
use crate::error::DomainError;

/// Skill ranks as persisted on the record.
///
/// The set of valid skill keys is whatever the record carries; raising a
/// skill that is not present is an error. Non-numeric ranks read as 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SkillRanks(BTreeMap<String, i32>);

impl SkillRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, key: impl Into<String>, rank: i32) -> Self {
        self.0.insert(key.into(), rank);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.0.get(key).copied()
    }

    /// Returns a copy with `key` raised by 1.
    pub fn incremented(&self, key: &str) -> Result<Self, DomainError> {
        let mut next = self.clone();
        let rank = next
            .0
            .get_mut(key)
            .ok_or_else(|| DomainError::unknown_skill(key))?;
        *rank = rank.saturating_add(1);
        Ok(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(key, rank)| (key.as_str(), *rank))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SkillRanks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self(
            raw.into_iter()
                .map(|(key, value)| {
                    let rank = finite_number(&value).map(|n| n.trunc() as i32).unwrap_or(0);
                    (key, rank)
                })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn increment_raises_known_skill() {
        let skills = SkillRanks::new().with_skill("stealth", 1);
        let raised = skills.incremented("stealth").expect("known skill");
        assert_eq!(raised.get("stealth"), Some(2));
        assert_eq!(skills.get("stealth"), Some(1));
    }

    #[test]
    fn increment_rejects_unknown_skill() {
        let skills = SkillRanks::new().with_skill("stealth", 1);
        assert!(matches!(
            skills.incremented("alchemy"),
            Err(DomainError::UnknownSkill(_))
        ));
    }

    #[test]
    fn ranks_deserialize_leniently() {
        let skills: SkillRanks =
            serde_json::from_value(json!({ "stealth": "2", "lore": null })).expect("lenient");
        assert_eq!(skills.get("stealth"), Some(2));
        assert_eq!(skills.get("lore"), Some(0));
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn null_skills_are_empty() {
        let skills: SkillRanks = serde_json::from_value(json!(null)).expect("lenient");
        assert!(skills.is_empty());
    }
}
