use super::error::PlayerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No track loaded
    #[default]
    Empty,
    /// Track bound, not producing audio, position at the start
    Loaded,
    Playing,
    Paused,
}

/// Read-only snapshot of the engine for the UI and the visualizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub volume: f32,
    pub position: Duration,
    pub duration: Duration,
}

/// The capability set the engine drives. Implementations own the actual
/// audio output; the engine only ever talks to this trait 🔊
pub trait AudioBackend {
    /// Decode `src` and keep it ready, paused at the start.
    /// On error the previously loaded source must be left untouched.
    fn load(&mut self, src: &str) -> Result<(), PlayerError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Halt output and rewind. The source stays loaded.
    fn stop(&mut self);
    fn seek(&mut self, position: Duration) -> Result<(), PlayerError>;
    /// Linear gain in `[0, 1]`
    fn set_volume(&mut self, volume: f32);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    /// The "on end" signal: the loaded source played through to its end.
    fn is_finished(&self) -> bool;
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn load(&mut self, src: &str) -> Result<(), PlayerError> {
        (**self).load(src)
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        (**self).seek(position)
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn position(&self) -> Duration {
        (**self).position()
    }

    fn duration(&self) -> Option<Duration> {
        (**self).duration()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}
