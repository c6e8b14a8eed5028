use crate::catalog::Mood;
use serde::{Deserialize, Serialize};
use std::fs;

/// Automatically saved session state
/// stored in `state.toml`. Playback position is deliberately not kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_mood: Option<Mood>,
}

fn default_volume() -> f32 {
    0.5
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            last_mood: None,
        }
    }
}

impl PersistentState {
    pub fn save(&self) {
        let path = super::AppConfig::get_state_path();
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to save state");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize state"),
        }
    }
}
