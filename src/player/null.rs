use super::error::PlayerError;
use super::traits::AudioBackend;
use std::time::{Duration, Instant};

/// Silent stand-in used when no output device is available.
/// Keeps a wall clock so the transport still behaves.
#[derive(Debug, Default)]
pub struct NullBackend {
    loaded: Option<String>,
    started: Option<Instant>,
    elapsed: Duration,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for NullBackend {
    fn load(&mut self, src: &str) -> Result<(), PlayerError> {
        self.loaded = Some(src.to_string());
        self.started = None;
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) {
        if self.loaded.is_some() && self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(start) = self.started.take() {
            self.elapsed += start.elapsed();
        }
    }

    fn stop(&mut self) {
        self.started = None;
        self.elapsed = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.elapsed = position;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn position(&self) -> Duration {
        self.elapsed + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn is_finished(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_pauses_and_rewinds() {
        let mut backend = NullBackend::new();
        backend.load("a.mp3").unwrap();
        assert_eq!(backend.position(), Duration::ZERO);

        backend.seek(Duration::from_secs(30)).unwrap();
        backend.pause();
        assert_eq!(backend.position(), Duration::from_secs(30));

        backend.stop();
        assert_eq!(backend.position(), Duration::ZERO);
        assert!(!backend.is_finished());
    }
}
