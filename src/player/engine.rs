//! Playback engine - the transport state machine
//!
//! Owns the active track list, the current index and the transport state,
//! and drives an [`AudioBackend`]. Every operation is infallible from the
//! listener's point of view: bad indices and bad inputs are ignored or
//! clamped, and a failing load leaves the previous state in place.

use super::error::PlayerError;
use super::traits::{AudioBackend, PlaybackState, PlaybackStatus};
use crate::catalog::TrackDescriptor;
use std::time::Duration;

pub struct PlaybackEngine<B: AudioBackend> {
    backend: B,
    tracks: Vec<TrackDescriptor>,
    current: Option<usize>,
    status: PlaybackStatus,
    volume: f32,
    position: Duration,
    duration: Duration,
}

impl<B: AudioBackend> PlaybackEngine<B> {
    pub fn new(mut backend: B, volume: f32) -> Self {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.5
        };
        backend.set_volume(volume);
        Self {
            backend,
            tracks: Vec::new(),
            current: None,
            status: PlaybackStatus::Empty,
            volume,
            position: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Replace the active list (mood change). Playback goes back to `Empty`.
    pub fn set_tracks(&mut self, tracks: Vec<TrackDescriptor>) {
        if self.status != PlaybackStatus::Empty {
            self.backend.stop();
        }
        self.tracks = tracks;
        self.current = None;
        self.status = PlaybackStatus::Empty;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    pub fn clear(&mut self) {
        self.set_tracks(Vec::new());
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    /// Bind the track at `index`, paused at the start. Out-of-range indices are ignored.
    pub fn load_track(&mut self, index: usize) -> Result<(), PlayerError> {
        let Some(track) = self.tracks.get(index) else {
            tracing::debug!(index, len = self.tracks.len(), "load_track out of range");
            return Ok(());
        };
        let src = track.src.clone();

        self.backend.load(&src)?;
        self.backend.set_volume(self.volume);

        self.current = Some(index);
        self.status = PlaybackStatus::Loaded;
        self.position = Duration::ZERO;
        self.duration = self.backend.duration().unwrap_or_default();
        tracing::debug!(index, src = %src, "track loaded");
        Ok(())
    }

    pub fn play(&mut self) {
        if matches!(self.status, PlaybackStatus::Loaded | PlaybackStatus::Paused) {
            self.backend.play();
            self.status = PlaybackStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.backend.pause();
            self.position = self.backend.position();
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Play/pause button semantics
    pub fn toggle(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Halt and rewind. Keeps the track bound if there is one.
    pub fn stop(&mut self) {
        if self.status != PlaybackStatus::Empty {
            self.backend.stop();
        }
        self.position = Duration::ZERO;
        self.status = if self.current.is_some() {
            PlaybackStatus::Loaded
        } else {
            PlaybackStatus::Empty
        };
    }

    /// Jump to `fraction` of the track. Only meaningful while playing or paused.
    pub fn seek(&mut self, fraction: f64) -> Result<(), PlayerError> {
        if !matches!(self.status, PlaybackStatus::Playing | PlaybackStatus::Paused) {
            return Ok(());
        }
        if !fraction.is_finite() {
            return Ok(());
        }
        let target = self.duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.backend.seek(target)?;
        self.position = target;
        Ok(())
    }

    /// Relative seek, expressed as a fraction of the track
    pub fn seek_by(&mut self, seconds: f64) -> Result<(), PlayerError> {
        let total = self.duration.as_secs_f64();
        if total <= 0.0 || !seconds.is_finite() {
            return Ok(());
        }
        let target = self.position.as_secs_f64() + seconds;
        self.seek(target / total)
    }

    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(self.volume);
    }

    /// Index `next()` would move to, `None` for an empty list
    pub fn next_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| (self.current.unwrap_or(0) + 1) % len)
    }

    pub fn prev_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| (self.current.unwrap_or(0) + len - 1) % len)
    }

    pub fn next(&mut self) -> Result<(), PlayerError> {
        let Some(index) = self.next_index() else {
            return Ok(());
        };
        self.load_track(index)?;
        self.play();
        Ok(())
    }

    pub fn prev(&mut self) -> Result<(), PlayerError> {
        let Some(index) = self.prev_index() else {
            return Ok(());
        };
        self.load_track(index)?;
        self.play();
        Ok(())
    }

    /// Playing, and the backend has run out of audio
    pub fn reached_end(&self) -> bool {
        self.status == PlaybackStatus::Playing && self.backend.is_finished()
    }

    /// Auto-advance when the backend reports the natural end of the track.
    /// Returns `true` if it moved on. A failed advance leaves the engine `Loaded`.
    pub fn poll_end_of_track(&mut self) -> Result<bool, PlayerError> {
        if !self.reached_end() {
            return Ok(false);
        }
        match self.next() {
            Ok(()) => Ok(true),
            Err(e) => {
                self.stop();
                Err(e)
            }
        }
    }

    /// Pull position and duration from the backend
    pub fn refresh(&mut self) {
        if self.status == PlaybackStatus::Empty {
            return;
        }
        if let Some(duration) = self.backend.duration() {
            self.duration = duration;
        }
        if self.status != PlaybackStatus::Loaded {
            let position = self.backend.position();
            self.position = if self.duration > Duration::ZERO {
                position.min(self.duration)
            } else {
                position
            };
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Position as a fraction of the duration, `0.0` when unknown
    pub fn progress(&self) -> f64 {
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            0.0
        } else {
            (self.position.as_secs_f64() / total).clamp(0.0, 1.0)
        }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_index: self.current,
            is_playing: self.is_playing(),
            volume: self.volume,
            position: self.position,
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK_LEN: Duration = Duration::from_secs(200);

    #[derive(Default)]
    struct MockBackend {
        loaded: Option<String>,
        playing: bool,
        position: Duration,
        volume: f32,
        finished: bool,
        fail_on: Option<String>,
        seeks: Vec<Duration>,
    }

    impl AudioBackend for MockBackend {
        fn load(&mut self, src: &str) -> Result<(), PlayerError> {
            if self.fail_on.as_deref() == Some(src) {
                return Err(PlayerError::load(src, "corrupt stream"));
            }
            self.loaded = Some(src.to_string());
            self.playing = false;
            self.position = Duration::ZERO;
            self.finished = false;
            Ok(())
        }

        fn play(&mut self) {
            self.playing = true;
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn stop(&mut self) {
            self.playing = false;
            self.position = Duration::ZERO;
        }

        fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
            self.seeks.push(position);
            self.position = position;
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn position(&self) -> Duration {
            self.position
        }

        fn duration(&self) -> Option<Duration> {
            self.loaded.as_ref().map(|_| TRACK_LEN)
        }

        fn is_finished(&self) -> bool {
            self.finished
        }
    }

    fn track(name: &str) -> TrackDescriptor {
        TrackDescriptor {
            title: name.to_string(),
            artist: "Artist".to_string(),
            image: format!("{}.png", name),
            src: format!("{}.mp3", name),
        }
    }

    fn engine_with(n: usize) -> PlaybackEngine<MockBackend> {
        let mut engine = PlaybackEngine::new(MockBackend::default(), 0.5);
        engine.set_tracks((0..n).map(|i| track(&format!("t{}", i))).collect());
        engine
    }

    #[test]
    fn test_next_prev_cycle_modulo_len() {
        for n in 1..=6 {
            let mut engine = engine_with(n);
            engine.load_track(0).unwrap();

            for step in 1..=(2 * n) {
                engine.next().unwrap();
                assert_eq!(engine.current_index(), Some(step % n));
                assert!(engine.is_playing());
            }

            engine.load_track(0).unwrap();
            for step in 1..=(2 * n) {
                engine.prev().unwrap();
                assert_eq!(engine.current_index(), Some((n * 2 - step) % n));
            }
        }
    }

    #[test]
    fn test_stop_resets_from_any_state() {
        let mut engine = engine_with(2);
        engine.stop();
        assert_eq!(engine.status(), PlaybackStatus::Empty);

        engine.load_track(1).unwrap();
        engine.play();
        engine.seek(0.5).unwrap();
        assert_eq!(engine.position(), TRACK_LEN / 2);
        engine.stop();
        assert_eq!(engine.position(), Duration::ZERO);
        assert!(!engine.state().is_playing);
        assert_eq!(engine.status(), PlaybackStatus::Loaded);

        engine.play();
        engine.pause();
        engine.stop();
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
        assert!(!engine.backend().playing);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut engine = engine_with(1);
        engine.set_volume(1.5);
        assert_eq!(engine.volume(), 1.0);
        engine.set_volume(-0.2);
        assert_eq!(engine.volume(), 0.0);
        engine.set_volume(f32::NAN);
        assert_eq!(engine.volume(), 0.0);
        engine.set_volume(0.3);
        assert_eq!(engine.backend().volume, 0.3);
    }

    #[test]
    fn test_volume_applies_to_future_tracks() {
        let mut engine = engine_with(2);
        engine.set_volume(0.8);
        engine.backend_mut().volume = 0.0;
        engine.load_track(1).unwrap();
        assert_eq!(engine.backend().volume, 0.8);
    }

    #[test]
    fn test_out_of_range_load_is_noop() {
        let mut engine = engine_with(2);
        engine.load_track(0).unwrap();
        engine.play();

        engine.load_track(7).unwrap();
        assert_eq!(engine.current_index(), Some(0));
        assert!(engine.is_playing());
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut engine = engine_with(2);
        engine.backend_mut().fail_on = Some("t1.mp3".to_string());
        engine.load_track(0).unwrap();
        engine.play();

        assert!(engine.load_track(1).is_err());
        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.backend().loaded.as_deref(), Some("t0.mp3"));
    }

    #[test]
    fn test_play_from_empty_is_noop() {
        let mut engine = engine_with(2);
        engine.play();
        assert_eq!(engine.status(), PlaybackStatus::Empty);
        assert!(!engine.backend().playing);

        engine.pause();
        assert_eq!(engine.status(), PlaybackStatus::Empty);
    }

    #[test]
    fn test_seek_only_while_playing_or_paused() {
        let mut engine = engine_with(1);
        engine.seek(0.5).unwrap();
        assert!(engine.backend().seeks.is_empty());

        engine.load_track(0).unwrap();
        engine.seek(0.5).unwrap();
        assert!(engine.backend().seeks.is_empty());

        engine.play();
        engine.seek(0.25).unwrap();
        assert_eq!(engine.position(), TRACK_LEN / 4);

        engine.pause();
        engine.seek(1.5).unwrap();
        assert_eq!(engine.position(), TRACK_LEN);

        engine.seek(f64::NAN).unwrap();
        assert_eq!(engine.position(), TRACK_LEN);
    }

    #[test]
    fn test_seek_by_seconds() {
        let mut engine = engine_with(1);
        engine.load_track(0).unwrap();
        engine.play();
        engine.seek_by(50.0).unwrap();
        assert_eq!(engine.position(), Duration::from_secs(50));
        engine.seek_by(-80.0).unwrap();
        assert_eq!(engine.position(), Duration::ZERO);
    }

    #[test]
    fn test_end_of_last_track_wraps_to_first() {
        let mut engine = engine_with(3);
        engine.load_track(2).unwrap();
        engine.play();
        assert!(!engine.poll_end_of_track().unwrap());

        engine.backend_mut().finished = true;
        assert!(engine.poll_end_of_track().unwrap());
        assert_eq!(engine.current_index(), Some(0));
        assert!(engine.is_playing());
    }

    #[test]
    fn test_single_track_loops() {
        let mut engine = engine_with(1);
        engine.load_track(0).unwrap();
        engine.play();
        engine.backend_mut().finished = true;

        assert!(engine.poll_end_of_track().unwrap());
        assert_eq!(engine.current_index(), Some(0));
        assert!(engine.is_playing());
    }

    #[test]
    fn test_end_signal_ignored_when_paused() {
        let mut engine = engine_with(2);
        engine.load_track(0).unwrap();
        engine.play();
        engine.pause();
        engine.backend_mut().finished = true;
        assert!(!engine.poll_end_of_track().unwrap());
        assert_eq!(engine.current_index(), Some(0));
    }

    #[test]
    fn test_failed_advance_stops() {
        let mut engine = engine_with(2);
        engine.backend_mut().fail_on = Some("t1.mp3".to_string());
        engine.load_track(0).unwrap();
        engine.play();
        engine.backend_mut().finished = true;

        assert!(engine.poll_end_of_track().is_err());
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
        assert_eq!(engine.current_index(), Some(0));
    }

    #[test]
    fn test_set_tracks_resets_to_empty() {
        let mut engine = engine_with(2);
        engine.load_track(1).unwrap();
        engine.play();

        engine.set_tracks(vec![track("x")]);
        assert_eq!(engine.status(), PlaybackStatus::Empty);
        assert_eq!(engine.current_index(), None);
        assert!(!engine.backend().playing);
        assert_eq!(engine.tracks().len(), 1);
    }

    #[test]
    fn test_next_on_empty_list() {
        let mut engine = engine_with(0);
        engine.next().unwrap();
        engine.prev().unwrap();
        assert_eq!(engine.status(), PlaybackStatus::Empty);
    }

    #[test]
    fn test_neighbour_indices_match_transport() {
        let mut engine = engine_with(3);
        assert_eq!(engine.next_index(), Some(1));
        assert_eq!(engine.prev_index(), Some(2));

        engine.load_track(2).unwrap();
        assert_eq!(engine.next_index(), Some(0));
        engine.next().unwrap();
        assert_eq!(engine.current_index(), Some(0));

        assert_eq!(engine_with(0).next_index(), None);
    }

    #[test]
    fn test_refresh_and_progress() {
        let mut engine = engine_with(1);
        engine.load_track(0).unwrap();
        engine.play();
        engine.backend_mut().position = Duration::from_secs(50);
        engine.refresh();
        assert_eq!(engine.position(), Duration::from_secs(50));
        assert!((engine.progress() - 0.25).abs() < 1e-9);
    }
}
