//! Level-up snapshots and the bounded history used for undo.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{AttributeScores, Level, PendingRewards, SkillRanks};
use crate::common::{loose_i32, loose_i64};

/// Maximum number of snapshots kept; one per level transition.
pub const MAX_HISTORY: usize = (Level::MAX.get() - Level::MIN.get()) as usize;

/// The fields that spending and leveling mutate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    #[serde(default)]
    pub base_attributes: AttributeScores,
    #[serde(default)]
    pub skills: SkillRanks,
    #[serde(default, deserialize_with = "loose_i32")]
    pub spark_bonus: i32,
}

/// State captured immediately before a level advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSnapshot {
    #[serde(default, deserialize_with = "loose_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "clamped_level")]
    pub prev_level: Level,
    #[serde(default)]
    pub prev_pending: PendingRewards,
    #[serde(default)]
    pub prev_data: SnapshotData,
}

fn clamped_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    loose_i64(deserializer).map(Level::clamped)
}

/// Unparseable timestamps read as the Unix epoch.
fn loose_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Fixed-capacity stack of snapshots, oldest evicted first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LevelHistory(VecDeque<LevelSnapshot>);

impl LevelHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot, evicting from the front past `MAX_HISTORY`.
    pub fn push(&mut self, snapshot: LevelSnapshot) {
        self.0.push_back(snapshot);
        while self.0.len() > MAX_HISTORY {
            self.0.pop_front();
        }
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<LevelSnapshot> {
        self.0.pop_back()
    }

    pub fn latest(&self) -> Option<&LevelSnapshot> {
        self.0.back()
    }

    pub fn oldest(&self) -> Option<&LevelSnapshot> {
        self.0.front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSnapshot> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for LevelHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let snapshots = Option::<Vec<LevelSnapshot>>::deserialize(deserializer)?.unwrap_or_default();
        let mut history = LevelHistory::new();
        for snapshot in snapshots {
            history.push(snapshot);
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(level: i64) -> LevelSnapshot {
        LevelSnapshot {
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
            prev_level: Level::clamped(level),
            prev_pending: PendingRewards::default(),
            prev_data: SnapshotData::default(),
        }
    }

    #[test]
    fn capacity_is_eleven() {
        assert_eq!(MAX_HISTORY, 11);
    }

    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let mut history = LevelHistory::new();
        for level in 1..=12 {
            history.push(snapshot(level));
        }

        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.oldest().map(|s| s.prev_level.get()), Some(2));
        assert_eq!(history.latest().map(|s| s.prev_level.get()), Some(12));
    }

    #[test]
    fn pop_returns_most_recent() {
        let mut history = LevelHistory::new();
        history.push(snapshot(1));
        history.push(snapshot(2));

        assert_eq!(history.pop().map(|s| s.prev_level.get()), Some(2));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn oversized_persisted_history_is_trimmed_on_load() {
        let snapshots: Vec<LevelSnapshot> = (1..=12).map(snapshot).collect();
        let json = serde_json::to_value(&snapshots).expect("serialize");
        let history: LevelHistory = serde_json::from_value(json).expect("deserialize");
        assert_eq!(history.len(), MAX_HISTORY);
    }

    #[test]
    fn malformed_snapshots_are_clamped_not_rejected() {
        let history: LevelHistory = serde_json::from_value(serde_json::json!([
            { "timestamp": "yesterday", "prevLevel": 0, "prevPending": { "skills": "2" } },
            { "prevLevel": "30", "prevData": { "sparkBonus": "1" } }
        ]))
        .expect("lenient snapshots");

        let levels: Vec<u8> = history.iter().map(|s| s.prev_level.get()).collect();
        assert_eq!(levels, vec![1, 12]);
        assert_eq!(history.oldest().map(|s| s.timestamp), Some(DateTime::<Utc>::default()));
        assert_eq!(history.oldest().map(|s| s.prev_pending.skills), Some(2));
        assert_eq!(history.latest().map(|s| s.prev_data.spark_bonus), Some(1));
    }
}
