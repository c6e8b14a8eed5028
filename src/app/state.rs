use super::config::{PersistentState, UserConfig};
use super::keys::KeyConfig;
use crate::audio::media::RemoteMedia;
use crate::audio::visualizer::{FrequencySource, Visualizer};
use crate::catalog::Mood;
use crate::player::Player;
use crate::ui::theme::Theme;
use image::DynamicImage;
use ratatui::layout::Rect;
use std::time::Instant;

pub enum ArtworkState {
    Idle,
    Loading,
    Loaded(DynamicImage),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// A catalog fetch the event loop should start
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRequest {
    pub mood: Mood,
    pub generation: u64,
}

/// Cover art the event loop should fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkRequest {
    pub src: String,
    pub generation: u64,
}

/// Remote track body the event loop should download before it can be loaded
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRequest {
    pub src: String,
    pub generation: u64,
}

/// Track load waiting on a [`MediaRequest`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DeferredLoad {
    pub index: usize,
    pub play: bool,
    pub generation: u64,
}

/// Screen regions recorded during the last render, used for mouse hits 🖱️
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub seek_bar: Rect,
    pub volume_bar: Rect,
    pub track_list: Rect,
    /// Index of the first visible row in `track_list`
    pub list_offset: usize,
    pub moods: Vec<(Rect, Option<Mood>)>,
}

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,

    /// Selected mood. `None` means nothing is chosen yet.
    pub mood: Option<Mood>,
    pub catalog_loading: bool,
    pub(crate) catalog_generation: u64,
    pub(crate) pending_catalog: Option<CatalogRequest>,

    pub engine: Player,
    pub(crate) media: RemoteMedia,
    pub(crate) media_generation: u64,
    pub(crate) pending_media: Option<MediaRequest>,
    pub(crate) deferred_load: Option<DeferredLoad>,

    /// Equalizer 📊
    pub visualizer: Visualizer,
    pub(crate) spectrum: Box<dyn FrequencySource>,
    pub bin_offset: usize,

    /// Highlighted row in the track list
    pub list_selected: usize,
    /// Seek slider value in `0.0..=1.0`, written by the position poll
    pub seek_slider: f64,

    pub artwork: ArtworkState,
    pub(crate) artwork_src: Option<String>,
    pub(crate) artwork_generation: u64,
    pub(crate) pending_artwork: Option<ArtworkRequest>,

    /// UI State
    pub show_help: bool,
    pub toast: Option<Toast>,
    pub hit: HitAreas,
}

impl App {
    pub fn new(
        engine: Player,
        spectrum: Box<dyn FrequencySource>,
        config: &UserConfig,
        theme: Theme,
    ) -> Self {
        Self {
            theme,
            keys: config.keys.clone(),
            is_running: true,
            mood: None,
            catalog_loading: false,
            catalog_generation: 0,
            pending_catalog: None,
            engine,
            media: RemoteMedia::new(),
            media_generation: 0,
            pending_media: None,
            deferred_load: None,
            visualizer: Visualizer::new(spectrum.bin_count()),
            spectrum,
            bin_offset: config.visualizer.bin_offset,
            list_selected: 0,
            seek_slider: 0.0,
            artwork: ArtworkState::Idle,
            artwork_src: None,
            artwork_generation: 0,
            pending_artwork: None,
            show_help: false,
            toast: None,
            hit: HitAreas::default(),
        }
    }

    /// Share the download store the audio backend decodes remote tracks from
    pub fn with_remote_media(mut self, media: RemoteMedia) -> Self {
        self.media = media;
        self
    }

    /// A remote track is being downloaded before it can be bound
    pub fn is_fetching_media(&self) -> bool {
        self.deferred_load.is_some()
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let duration = std::time::Duration::from_millis(2000); // 2s display time
        let deadline = now + duration;

        if let Some(ref mut current) = self.toast {
            // Keep start_time so rapid updates don't replay the entrance slide
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    pub fn save_state(&self) {
        PersistentState {
            volume: self.engine.volume(),
            last_mood: self.mood,
        }
        .save();
    }
}
