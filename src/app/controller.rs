//! Wiring between listener actions, the catalog, the playback engine and
//! the equalizer. Everything here runs on the event-loop thread; async work
//! (catalog, artwork and remote track fetches) is handed out as requests and
//! comes back as [`AppEvent`](super::events::AppEvent)s.

use super::state::{App, ArtworkRequest, ArtworkState, CatalogRequest, DeferredLoad, MediaRequest};
use crate::catalog::loader::is_remote;
use crate::catalog::{Catalog, Mood};
use crate::player::{PlaybackStatus, PlayerError};
use std::time::Instant;

impl App {
    /// Mood selector changed: stop, drop the old list and ask for the new one.
    /// Picking the current mood again does nothing.
    pub fn select_mood(&mut self, mood: Option<Mood>) {
        if mood == self.mood {
            return;
        }
        self.stop();
        self.cancel_media();
        self.mood = mood;
        self.catalog_generation += 1;
        self.engine.clear();
        self.list_selected = 0;
        self.sync_artwork();

        match mood {
            Some(mood) => {
                tracing::info!(%mood, generation = self.catalog_generation, "mood selected");
                self.catalog_loading = true;
                self.pending_catalog = Some(CatalogRequest {
                    mood,
                    generation: self.catalog_generation,
                });
            }
            None => {
                tracing::info!("mood cleared");
                self.catalog_loading = false;
                self.pending_catalog = None;
            }
        }
    }

    /// Fetched catalog arrived. Results for a mood the listener already left are dropped.
    /// The first track is bound but not started.
    pub fn on_catalog_loaded(&mut self, generation: u64, mood: Mood, catalog: Catalog) {
        if generation != self.catalog_generation || Some(mood) != self.mood {
            tracing::debug!(%mood, generation, current = self.catalog_generation, "stale catalog dropped");
            return;
        }
        self.catalog_loading = false;

        let tracks = catalog.tracks(mood).to_vec();
        tracing::info!(%mood, count = tracks.len(), "track list ready");
        self.engine.set_tracks(tracks);
        self.list_selected = 0;
        self.seek_slider = 0.0;

        if self.engine.tracks().is_empty() {
            self.show_toast(&format!("🫥 No tracks for {}", mood.label()));
            self.sync_artwork();
            return;
        }

        if self.fetch_first(0, false) {
            return;
        }
        match self.engine.load_track(0) {
            Ok(()) => self.sync_track(),
            Err(e) => self.report("Load failed", &e),
        }
    }

    /// Track list click: stop, bind `index`, play
    pub fn select_track(&mut self, index: usize) {
        if index >= self.engine.tracks().len() {
            return;
        }
        self.stop();
        if !self.fetch_first(index, true) {
            match self.engine.load_track(index) {
                Ok(()) => {
                    self.engine.play();
                    self.sync_track();
                }
                Err(e) => self.report("Load failed", &e),
            }
        }
        self.sync_visualizer();
    }

    pub fn play_selected(&mut self) {
        self.select_track(self.list_selected);
    }

    /// Move the list highlight, wrapping at both ends
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.engine.tracks().len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.list_selected = (self.list_selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn toggle_playback(&mut self) {
        self.engine.toggle();
        self.sync_visualizer();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.seek_slider = 0.0;
        self.sync_visualizer();
    }

    pub fn next_track(&mut self) {
        if let Some(index) = self.engine.next_index() {
            if self.needs_download(index).is_some() {
                self.stop();
                self.fetch_first(index, true);
                return;
            }
        }
        self.cancel_media();
        match self.engine.next() {
            Ok(()) => {
                self.sync_track();
                self.show_toast("⏭ Next Track");
            }
            Err(e) => self.report("Skip failed", &e),
        }
        self.sync_visualizer();
    }

    pub fn prev_track(&mut self) {
        if let Some(index) = self.engine.prev_index() {
            if self.needs_download(index).is_some() {
                self.stop();
                self.fetch_first(index, true);
                return;
            }
        }
        self.cancel_media();
        match self.engine.prev() {
            Ok(()) => {
                self.sync_track();
                self.show_toast("⏮ Previous Track");
            }
            Err(e) => self.report("Skip failed", &e),
        }
        self.sync_visualizer();
    }

    /// Seek slider input. Ignored unless a track is playing or paused.
    pub fn seek_to(&mut self, fraction: f64) {
        if !matches!(
            self.engine.status(),
            PlaybackStatus::Playing | PlaybackStatus::Paused
        ) {
            return;
        }
        match self.engine.seek(fraction) {
            Ok(()) => self.seek_slider = self.engine.progress(),
            Err(e) => self.report("Seek failed", &e),
        }
    }

    pub fn seek_by(&mut self, seconds: f64) {
        self.engine.refresh();
        match self.engine.seek_by(seconds) {
            Ok(()) => {
                if self.engine.status() != PlaybackStatus::Loaded {
                    self.seek_slider = self.engine.progress();
                }
            }
            Err(e) => self.report("Seek failed", &e),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.engine.set_volume(volume);
        let pct = (self.engine.volume() * 100.0).round() as u8;
        self.show_toast(&format!("🔊 Volume: {}%", pct));
    }

    pub fn change_volume(&mut self, delta: f32) {
        self.set_volume(self.engine.volume() + delta);
    }

    /// Periodic position poll. Only moves the slider while playing.
    pub fn poll_position(&mut self) {
        if !self.engine.is_playing() {
            return;
        }
        self.engine.refresh();
        self.seek_slider = self.engine.progress();
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        // Handle Toast Expiry
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }

        if self.engine.reached_end() {
            if let Some(index) = self.engine.next_index() {
                if self.needs_download(index).is_some() {
                    self.stop();
                    self.fetch_first(index, true);
                }
            }
        }

        match self.engine.poll_end_of_track() {
            Ok(true) => {
                self.seek_slider = 0.0;
                self.sync_track();
            }
            Ok(false) => {}
            Err(e) => self.report("Auto-advance failed", &e),
        }
        self.sync_visualizer();
    }

    /// One equalizer frame
    pub fn on_frame(&mut self) {
        let playing = self.engine.is_playing();
        self.visualizer.frame(playing, self.spectrum.as_mut());
    }

    /// Frames run exactly while the engine is playing
    pub fn sync_visualizer(&mut self) {
        if self.engine.is_playing() {
            self.visualizer.start();
        } else if self.visualizer.is_scheduled() || !self.visualizer.is_silent() {
            self.visualizer.cancel();
        }
    }

    pub fn take_catalog_request(&mut self) -> Option<CatalogRequest> {
        self.pending_catalog.take()
    }

    pub fn take_artwork_request(&mut self) -> Option<ArtworkRequest> {
        self.pending_artwork.take()
    }

    pub fn take_media_request(&mut self) -> Option<MediaRequest> {
        self.pending_media.take()
    }

    /// A remote track download finished. Completes the load it was holding up,
    /// unless the listener has moved on since.
    pub fn on_media_loaded(&mut self, generation: u64, result: Result<(), String>) {
        let Some(deferred) = self.deferred_load else {
            return;
        };
        if deferred.generation != generation || generation != self.media_generation {
            tracing::debug!(generation, current = self.media_generation, "stale download dropped");
            return;
        }
        self.deferred_load = None;

        if let Err(e) = result {
            tracing::warn!(error = %e, "Download failed");
            self.show_toast(&format!("⚠ Download failed: {}", e));
            return;
        }
        match self.engine.load_track(deferred.index) {
            Ok(()) => {
                if deferred.play {
                    self.engine.play();
                }
                self.seek_slider = 0.0;
                self.sync_track();
            }
            Err(e) => self.report("Load failed", &e),
        }
        self.sync_visualizer();
    }

    pub fn on_artwork_loaded(&mut self, generation: u64, artwork: ArtworkState) {
        if generation == self.artwork_generation {
            self.artwork = artwork;
        }
    }

    pub fn catalog_generation(&self) -> u64 {
        self.catalog_generation
    }

    /// Source of the track at `index` if it is remote and not downloaded yet
    fn needs_download(&self, index: usize) -> Option<String> {
        let src = &self.engine.tracks().get(index)?.src;
        (is_remote(src) && !self.media.contains(src)).then(|| src.clone())
    }

    /// Queue a download when the track at `index` needs one; the load then
    /// finishes in `on_media_loaded`. Returns whether it was deferred.
    fn fetch_first(&mut self, index: usize, play: bool) -> bool {
        self.cancel_media();
        let Some(src) = self.needs_download(index) else {
            return false;
        };
        self.media_generation += 1;
        let generation = self.media_generation;
        if let Some(track) = self.engine.tracks().get(index) {
            let message = format!("⏳ Loading {}…", track.title);
            self.show_toast(&message);
        }
        tracing::debug!(index, src = %src, generation, "downloading remote track");
        self.list_selected = index;
        self.deferred_load = Some(DeferredLoad {
            index,
            play,
            generation,
        });
        self.pending_media = Some(MediaRequest { src, generation });
        true
    }

    fn cancel_media(&mut self) {
        self.deferred_load = None;
        self.pending_media = None;
    }

    /// Follow the engine's current track with the list highlight and artwork
    fn sync_track(&mut self) {
        if let Some(index) = self.engine.current_index() {
            self.list_selected = index;
        }
        self.sync_artwork();
    }

    fn sync_artwork(&mut self) {
        let image = self
            .engine
            .current_track()
            .map(|t| t.image.clone())
            .filter(|s| !s.is_empty());
        if image == self.artwork_src {
            return;
        }
        self.artwork_generation += 1;
        self.artwork_src = image.clone();
        match image {
            Some(src) => {
                self.artwork = ArtworkState::Loading;
                self.pending_artwork = Some(ArtworkRequest {
                    src,
                    generation: self.artwork_generation,
                });
            }
            None => {
                self.artwork = ArtworkState::Idle;
                self.pending_artwork = None;
            }
        }
    }

    fn report(&mut self, context: &str, error: &PlayerError) {
        tracing::warn!(error = %error, "{}", context);
        self.show_toast(&format!("⚠ {}: {}", context, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::UserConfig;
    use crate::audio::visualizer::FrequencySource;
    use crate::catalog::TrackDescriptor;
    use crate::player::{AudioBackend, NullBackend, PlaybackEngine};
    use crate::ui::theme::Theme;
    use std::collections::HashMap;

    struct Flat;

    impl FrequencySource for Flat {
        fn bin_count(&self) -> usize {
            8
        }

        fn fill(&mut self, out: &mut [u8]) {
            out.fill(128);
        }
    }

    fn app() -> App {
        let backend: Box<dyn AudioBackend> = Box::new(NullBackend::new());
        let engine = PlaybackEngine::new(backend, 0.5);
        App::new(engine, Box::new(Flat), &UserConfig::default(), Theme::default())
    }

    fn track(name: &str, image: &str) -> TrackDescriptor {
        TrackDescriptor {
            title: name.to_string(),
            artist: "Artist".to_string(),
            image: image.to_string(),
            src: format!("/music/{}.mp3", name),
        }
    }

    fn catalog(mood: Mood, tracks: Vec<TrackDescriptor>) -> Catalog {
        let mut entries = HashMap::new();
        entries.insert(mood, tracks);
        Catalog::new(entries)
    }

    #[test]
    fn test_mood_change_requests_catalog() {
        let mut app = app();
        app.select_mood(Some(Mood::Sad));

        let request = app.take_catalog_request().unwrap();
        assert_eq!(request.mood, Mood::Sad);
        assert!(app.catalog_loading);
        assert!(app.take_catalog_request().is_none());

        // Same mood again is not a change
        app.select_mood(Some(Mood::Sad));
        assert!(app.take_catalog_request().is_none());
    }

    #[test]
    fn test_catalog_binds_first_track_without_playing() {
        let mut app = app();
        app.select_mood(Some(Mood::Sad));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(
            req.generation,
            Mood::Sad,
            catalog(Mood::Sad, vec![track("a", ""), track("b", "")]),
        );

        assert!(!app.catalog_loading);
        assert_eq!(app.engine.status(), PlaybackStatus::Loaded);
        assert_eq!(app.engine.current_index(), Some(0));
        assert!(!app.visualizer.is_scheduled());
    }

    #[test]
    fn test_stale_catalog_ignored() {
        let mut app = app();
        app.select_mood(Some(Mood::Sad));
        let old = app.take_catalog_request().unwrap();
        app.select_mood(Some(Mood::Happy));
        let new = app.take_catalog_request().unwrap();

        app.on_catalog_loaded(old.generation, Mood::Sad, catalog(Mood::Sad, vec![track("a", "")]));
        assert!(app.engine.tracks().is_empty());
        assert!(app.catalog_loading);

        app.on_catalog_loaded(new.generation, Mood::Happy, catalog(Mood::Happy, vec![track("h", "")]));
        assert_eq!(app.engine.tracks()[0].title, "h");
    }

    #[test]
    fn test_empty_mood_leaves_engine_empty() {
        let mut app = app();
        app.select_mood(Some(Mood::Stressed));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(req.generation, Mood::Stressed, Catalog::default());

        assert_eq!(app.engine.status(), PlaybackStatus::Empty);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_select_track_plays_and_starts_frames() {
        let mut app = app();
        app.select_mood(Some(Mood::Happy));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(
            req.generation,
            Mood::Happy,
            catalog(Mood::Happy, vec![track("a", ""), track("b", "")]),
        );

        app.select_track(1);
        assert!(app.engine.is_playing());
        assert_eq!(app.list_selected, 1);
        assert!(app.visualizer.is_scheduled());

        app.on_frame();
        assert_eq!(app.visualizer.bins(), &[128; 8]);

        app.toggle_playback();
        assert_eq!(app.engine.status(), PlaybackStatus::Paused);
        assert!(app.visualizer.is_silent());
        assert!(!app.visualizer.is_scheduled());

        // Out of range click is ignored
        app.select_track(9);
        assert_eq!(app.engine.current_index(), Some(1));
    }

    fn remote(name: &str) -> TrackDescriptor {
        TrackDescriptor {
            src: format!("https://cdn.example.com/{}.mp3", name),
            ..track(name, "")
        }
    }

    fn remote_app() -> App {
        let mut app = app();
        app.select_mood(Some(Mood::Energetic));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(
            req.generation,
            Mood::Energetic,
            catalog(Mood::Energetic, vec![remote("a"), remote("b")]),
        );
        app
    }

    #[test]
    fn test_remote_track_loads_after_download() {
        let mut app = remote_app();

        // Nothing is bound until the body is in
        assert_eq!(app.engine.status(), PlaybackStatus::Empty);
        assert!(app.is_fetching_media());
        let first = app.take_media_request().unwrap();
        assert_eq!(first.src, "https://cdn.example.com/a.mp3");

        app.media.insert(&first.src, vec![0; 16]);
        app.on_media_loaded(first.generation, Ok(()));
        assert_eq!(app.engine.status(), PlaybackStatus::Loaded);
        assert_eq!(app.engine.current_index(), Some(0));
        assert!(!app.is_fetching_media());

        // Click: stop now, play once downloaded
        app.select_track(1);
        let second = app.take_media_request().unwrap();
        assert_eq!(app.engine.current_index(), Some(0));
        assert!(!app.engine.is_playing());

        app.media.insert(&second.src, vec![0; 16]);
        app.on_media_loaded(second.generation, Ok(()));
        assert!(app.engine.is_playing());
        assert_eq!(app.engine.current_index(), Some(1));
        assert!(app.visualizer.is_scheduled());

        // Already downloaded: loads straight away
        app.prev_track();
        assert!(app.take_media_request().is_none());
        assert_eq!(app.engine.current_index(), Some(0));
        assert!(app.engine.is_playing());
    }

    #[test]
    fn test_superseded_or_failed_download() {
        let mut app = remote_app();
        let first = app.take_media_request().unwrap();

        app.select_track(1);
        let second = app.take_media_request().unwrap();
        assert!(second.generation > first.generation);

        // The listener moved on; the first body is not bound
        app.on_media_loaded(first.generation, Ok(()));
        assert_eq!(app.engine.status(), PlaybackStatus::Empty);
        assert!(app.is_fetching_media());

        app.on_media_loaded(second.generation, Err("404 Not Found".to_string()));
        assert_eq!(app.engine.status(), PlaybackStatus::Empty);
        assert!(!app.is_fetching_media());
        assert!(app.toast.as_ref().unwrap().message.contains("Download failed"));
    }

    #[test]
    fn test_mood_change_cancels_download() {
        let mut app = remote_app();
        let pending = app.take_media_request().unwrap();

        app.select_mood(Some(Mood::Sad));
        assert!(!app.is_fetching_media());
        app.on_media_loaded(pending.generation, Ok(()));
        assert_eq!(app.engine.status(), PlaybackStatus::Empty);
    }

    #[test]
    fn test_clearing_mood_resets_everything() {
        let mut app = app();
        app.select_mood(Some(Mood::Happy));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(req.generation, Mood::Happy, catalog(Mood::Happy, vec![track("a", "")]));
        app.select_track(0);

        app.select_mood(None);
        assert_eq!(app.engine.status(), PlaybackStatus::Empty);
        assert!(app.engine.tracks().is_empty());
        assert!(!app.catalog_loading);
        assert!(app.take_catalog_request().is_none());
        assert_eq!(app.seek_slider, 0.0);
    }

    #[test]
    fn test_artwork_follows_current_track() {
        let mut app = app();
        app.select_mood(Some(Mood::Relaxed));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(
            req.generation,
            Mood::Relaxed,
            catalog(
                Mood::Relaxed,
                vec![track("a", "/art/a.jpg"), track("b", "/art/a.jpg"), track("c", "")],
            ),
        );

        let first = app.take_artwork_request().unwrap();
        assert_eq!(first.src, "/art/a.jpg");
        assert!(matches!(app.artwork, ArtworkState::Loading));

        // Same cover, no refetch
        app.next_track();
        assert!(app.take_artwork_request().is_none());

        app.next_track();
        assert!(app.take_artwork_request().is_none());
        assert!(matches!(app.artwork, ArtworkState::Idle));

        // Late result for an old cover is dropped
        app.on_artwork_loaded(first.generation, ArtworkState::Failed);
        assert!(matches!(app.artwork, ArtworkState::Idle));
    }

    #[test]
    fn test_volume_and_selection() {
        let mut app = app();
        app.change_volume(0.8);
        assert_eq!(app.engine.volume(), 1.0);
        app.set_volume(-3.0);
        assert_eq!(app.engine.volume(), 0.0);

        app.move_selection(1);
        assert_eq!(app.list_selected, 0);

        app.select_mood(Some(Mood::Happy));
        let req = app.take_catalog_request().unwrap();
        app.on_catalog_loaded(
            req.generation,
            Mood::Happy,
            catalog(Mood::Happy, vec![track("a", ""), track("b", ""), track("c", "")]),
        );
        app.move_selection(-1);
        assert_eq!(app.list_selected, 2);
        app.move_selection(2);
        assert_eq!(app.list_selected, 1);
    }

    #[test]
    fn test_seek_ignored_when_not_started() {
        let mut app = app();
        app.seek_to(0.5);
        assert_eq!(app.seek_slider, 0.0);
        app.poll_position();
        assert_eq!(app.seek_slider, 0.0);
    }
}
