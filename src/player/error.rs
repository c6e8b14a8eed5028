//! Error types for playback

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The source could not be opened or decoded
    #[error("cannot load {src}: {reason}")]
    Load { src: String, reason: String },

    /// The decoder does not support seeking in this source
    #[error("seek failed: {0}")]
    Seek(String),

    /// No usable audio output
    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl PlayerError {
    pub fn load(src: &str, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            src: src.to_string(),
            reason: reason.to_string(),
        }
    }
}
