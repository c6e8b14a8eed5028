use super::media::RemoteMedia;
use super::tap::{SampleTap, Tapped};
use crate::catalog::loader::is_remote;
use crate::player::{AudioBackend, PlayerError};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::time::Duration;

/// rodio-backed output. One sink per loaded track; every sample played is
/// mirrored into the [`SampleTap`] for the equalizer.
pub struct RodioBackend {
    // Dropping the stream silences everything, so it lives as long as the backend
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    src: Option<String>,
    duration: Option<Duration>,
    volume: f32,
    tap: SampleTap,
    media: RemoteMedia,
}

impl RodioBackend {
    /// Remote sources are decoded from `media`; the event loop downloads them there first
    pub fn new(tap: SampleTap, media: RemoteMedia) -> Result<Self, PlayerError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlayerError::Output(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            src: None,
            duration: None,
            volume: 1.0,
            tap,
            media,
        })
    }

    pub fn tap(&self) -> SampleTap {
        self.tap.clone()
    }

    /// Build a fresh, paused sink holding `src`
    fn open(&self, src: &str) -> Result<(Sink, Option<Duration>), PlayerError> {
        let sink = Sink::try_new(&self.handle).map_err(|e| PlayerError::Output(e.to_string()))?;
        sink.pause();
        sink.set_volume(self.volume);

        let duration = if is_remote(src) {
            let bytes = match self.media.get(src) {
                Some(bytes) => bytes,
                None => self.media.insert(src, fetch_remote(src)?),
            };
            let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| PlayerError::load(src, e))?;
            let duration = decoder.total_duration();
            sink.append(Tapped::new(decoder, self.tap.clone()));
            duration
        } else {
            let file = File::open(src).map_err(|e| PlayerError::load(src, e))?;
            let decoder =
                Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::load(src, e))?;
            let duration = decoder.total_duration().or_else(|| probe_duration(src));
            sink.append(Tapped::new(decoder, self.tap.clone()));
            duration
        };

        Ok((sink, duration))
    }
}

/// Fallback for a source that was never put in the [`RemoteMedia`] store
fn fetch_remote(src: &str) -> Result<Vec<u8>, PlayerError> {
    let fetch = || -> Result<Vec<u8>, reqwest::Error> {
        let response = reqwest::blocking::get(src)?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    };
    // The blocking client must not run on an async worker directly
    tracing::debug!(src, "remote track not prefetched, downloading in place");
    let bytes = match tokio::runtime::Handle::try_current() {
        Ok(_) => tokio::task::block_in_place(fetch)?,
        Err(_) => fetch()?,
    };
    Ok(bytes)
}

/// Tag-level duration for formats whose decoder cannot report one
fn probe_duration(path: &str) -> Option<Duration> {
    use lofty::file::AudioFile;

    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            tracing::debug!(path, error = %e, "no duration from tags");
            None
        }
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, src: &str) -> Result<(), PlayerError> {
        let (sink, duration) = self.open(src)?;
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.tap.clear();
        self.src = Some(src.to_string());
        self.duration = duration;
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };
        sink.pause();
        self.tap.clear();
        if sink.empty() || sink.try_seek(Duration::ZERO).is_err() {
            // Not seekable (or already drained): decode again from the start
            if let Some(src) = self.src.clone() {
                match self.open(&src) {
                    Ok((fresh, _)) => {
                        if let Some(old) = self.sink.replace(fresh) {
                            old.stop();
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to rewind track"),
                }
            }
        }
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        match &self.sink {
            Some(sink) => sink
                .try_seek(position)
                .map_err(|e| PlayerError::Seek(e.to_string())),
            None => Ok(()),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map(Sink::get_pos).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().map(Sink::empty).unwrap_or(false)
    }
}
