pub mod loader;

pub use loader::{CatalogLoader, CatalogSource, MediaBase};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The fixed set of moods a listener can pick from 🎭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Inspired,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Relaxed,
        Mood::Inspired,
        Mood::Stressed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Relaxed => "relaxed",
            Mood::Inspired => "inspired",
            Mood::Stressed => "stressed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Energetic => "Energetic",
            Mood::Relaxed => "Relaxed",
            Mood::Inspired => "Inspired",
            Mood::Stressed => "Stressed",
        }
    }

    /// Parse a catalog key. Accepts the Spanish keys older catalogs were written with.
    pub fn from_key(key: &str) -> Option<Mood> {
        match key.trim().to_lowercase().as_str() {
            "happy" | "feliz" => Some(Mood::Happy),
            "sad" | "triste" => Some(Mood::Sad),
            "energetic" | "energetico" | "energético" => Some(Mood::Energetic),
            "relaxed" | "relajado" => Some(Mood::Relaxed),
            "inspired" | "inspirado" => Some(Mood::Inspired),
            "stressed" | "estresado" => Some(Mood::Stressed),
            _ => None,
        }
    }

    /// Cycle forward through `None -> Happy -> ... -> Stressed -> None`
    pub fn cycle_next(current: Option<Mood>) -> Option<Mood> {
        match current {
            None => Some(Self::ALL[0]),
            Some(m) => {
                let idx = Self::ALL.iter().position(|x| *x == m).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }

    pub fn cycle_prev(current: Option<Mood>) -> Option<Mood> {
        match current {
            None => Self::ALL.last().copied(),
            Some(m) => {
                let idx = Self::ALL.iter().position(|x| *x == m).unwrap_or(0);
                if idx == 0 {
                    None
                } else {
                    Some(Self::ALL[idx - 1])
                }
            }
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Mood {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::from_key(s).ok_or_else(|| CatalogError::UnknownMood(s.to_string()))
    }
}

/// Metadata and source locator for one playable track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub image: String,
    pub src: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog location: {0}")]
    InvalidSource(String),

    #[error("unknown mood: {0}")]
    UnknownMood(String),
}

/// Mood -> ordered track list. A mood missing from the map has no tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: HashMap<Mood, Vec<TrackDescriptor>>,
}

impl Catalog {
    pub fn new(entries: HashMap<Mood, Vec<TrackDescriptor>>) -> Self {
        Self { entries }
    }

    /// Parse a catalog document and resolve relative `src`/`image` locators
    /// against `base`.
    pub fn from_json(text: &str, base: &MediaBase) -> Result<Self, CatalogError> {
        // Only mood keys are decoded as track lists; anything else is left alone
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(text)?;

        let mut entries: HashMap<Mood, Vec<TrackDescriptor>> = HashMap::new();
        for (key, value) in raw {
            let Some(mood) = Mood::from_key(&key) else {
                tracing::debug!(key = %key, "skipping unknown mood in catalog");
                continue;
            };
            let tracks: Vec<TrackDescriptor> = serde_json::from_value(value)?;
            let resolved = tracks
                .into_iter()
                .map(|t| TrackDescriptor {
                    image: if t.image.is_empty() {
                        t.image
                    } else {
                        base.resolve(&t.image)
                    },
                    src: base.resolve(&t.src),
                    ..t
                })
                .collect::<Vec<_>>();
            entries.entry(mood).or_default().extend(resolved);
        }

        Ok(Self { entries })
    }

    pub fn tracks(&self, mood: Mood) -> &[TrackDescriptor] {
        self.entries.get(&mood).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn moods(&self) -> Vec<Mood> {
        Mood::ALL
            .iter()
            .copied()
            .filter(|m| self.entries.contains_key(m))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file_source() -> MediaBase {
        CatalogSource::File(PathBuf::from("/srv/music/data/songsData.json")).media_base()
    }

    #[test]
    fn test_parse_resolves_relative_locators() {
        let json = r#"{
            "sad": [
                {"title": "Rain", "artist": "Low", "image": "img/rain.png", "src": "audio/rain.mp3"},
                {"title": "Fog", "artist": "Low", "image": "https://cdn.example.com/fog.png", "src": "/abs/fog.mp3"}
            ]
        }"#;
        let catalog = Catalog::from_json(json, &file_source()).unwrap();
        let sad = catalog.tracks(Mood::Sad);

        assert_eq!(sad.len(), 2);
        assert_eq!(sad[0].src, "/srv/music/data/audio/rain.mp3");
        assert_eq!(sad[0].image, "/srv/music/data/img/rain.png");
        assert_eq!(sad[1].image, "https://cdn.example.com/fog.png");
        assert_eq!(sad[1].src, "/abs/fog.mp3");
    }

    #[test]
    fn test_missing_mood_is_empty() {
        let json = r#"{"happy": [{"title": "Sun", "artist": "A", "image": "", "src": "sun.mp3"}]}"#;
        let catalog = Catalog::from_json(json, &file_source()).unwrap();

        assert!(catalog.tracks(Mood::Stressed).is_empty());
        assert_eq!(catalog.moods(), vec![Mood::Happy]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_spanish_keys_and_unknown_keys() {
        let json = r#"{
            "triste": [{"title": "T", "artist": "A", "image": "", "src": "t.mp3"}],
            "nostalgic": [{"title": "N", "artist": "A", "image": "", "src": "n.mp3"}]
        }"#;
        let catalog = Catalog::from_json(json, &file_source()).unwrap();

        assert_eq!(catalog.tracks(Mood::Sad).len(), 1);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_non_track_keys_are_ignored() {
        let json = r#"{
            "version": 2,
            "meta": {"curator": "someone"},
            "sad": [{"title": "Rain", "artist": "Low", "image": "", "src": "rain.mp3"}]
        }"#;
        let catalog = Catalog::from_json(json, &file_source()).unwrap();

        assert_eq!(catalog.tracks(Mood::Sad).len(), 1);
        assert_eq!(catalog.moods(), vec![Mood::Sad]);
    }

    #[test]
    fn test_malformed_mood_list_is_an_error() {
        let result = Catalog::from_json(r#"{"sad": {"title": "x"}}"#, &file_source());
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_malformed_document() {
        let result = Catalog::from_json("{ not json", &file_source());
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_mood_cycle() {
        assert_eq!(Mood::cycle_next(None), Some(Mood::Happy));
        assert_eq!(Mood::cycle_next(Some(Mood::Stressed)), None);
        assert_eq!(Mood::cycle_prev(None), Some(Mood::Stressed));
        assert_eq!(Mood::cycle_prev(Some(Mood::Happy)), None);
        assert_eq!("Relajado".parse::<Mood>().unwrap(), Mood::Relaxed);
        assert!("angry".parse::<Mood>().is_err());
    }
}
