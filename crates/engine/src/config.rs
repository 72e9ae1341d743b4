//! Engine configuration from the environment.
//!
//! `.env` is loaded by the binary before [`EngineConfig::from_env`] runs.

use std::path::PathBuf;

pub const MOVE_PACK_VAR: &str = "GUISEBOOK_MOVE_PACK";
pub const SEED_PATH_VAR: &str = "GUISEBOOK_SEED_PATH";
pub const SPEAKER_VAR: &str = "GUISEBOOK_SPEAKER";

pub const DEFAULT_MOVE_PACK: &str = "guisebook.moves";
pub const DEFAULT_SPEAKER: &str = "Game Master";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Content pack that move templates are fetched from.
    pub move_pack: String,
    /// JSON seed for the in-memory store.
    pub seed_path: Option<PathBuf>,
    /// Speaker shown on narrative messages.
    pub speaker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_pack: DEFAULT_MOVE_PACK.to_string(),
            seed_path: None,
            speaker: DEFAULT_SPEAKER.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank or malformed values fall back to
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            move_pack: non_blank(&lookup, MOVE_PACK_VAR)
                .filter(|pack| {
                    let valid = !pack.chars().any(char::is_whitespace);
                    if !valid {
                        tracing::warn!(
                            var = MOVE_PACK_VAR,
                            value = %pack,
                            default = DEFAULT_MOVE_PACK,
                            "Pack names cannot contain whitespace, using default"
                        );
                    }
                    valid
                })
                .unwrap_or(defaults.move_pack),
            seed_path: non_blank(&lookup, SEED_PATH_VAR).map(PathBuf::from),
            speaker: non_blank(&lookup, SPEAKER_VAR).unwrap_or(defaults.speaker),
        }
    }
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Option<String> {
    let raw = lookup(key)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!(var = key, "Ignoring blank configuration value");
        return None;
    }
    Some(trimmed.to_string())
}
