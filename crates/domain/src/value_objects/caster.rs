use serde::{Deserialize, Deserializer, Serialize};

/// How much spark a class channels.
///
/// Only full and half casters receive spark slots on level up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    Full,
    Half,
    #[default]
    None,
}

impl CasterType {
    /// Parse a persisted caster type; anything unrecognised is `None`.
    pub fn from_loose(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => CasterType::Full,
            "half" => CasterType::Half,
            _ => CasterType::None,
        }
    }

    pub fn gains_spark(&self) -> bool {
        matches!(self, CasterType::Full | CasterType::Half)
    }
}

impl<'de> Deserialize<'de> for CasterType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(CasterType::from_loose).unwrap_or_default())
    }
}
