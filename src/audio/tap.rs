use rodio::cpal::Sample as _;
use rodio::{Sample, Source};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Samples kept for the spectrum. Enough for the largest supported FFT.
const TAP_CAPACITY: usize = 8192;

/// Samples are handed to the shared buffer in blocks to keep lock traffic low
const FLUSH_EVERY: usize = 512;

#[derive(Debug, Default)]
struct TapState {
    samples: VecDeque<f32>,
    sample_rate: u32,
}

/// Lock-protected rolling window of the mono signal being played.
/// Written from the audio thread, read by the spectrum source.
#[derive(Debug, Clone, Default)]
pub struct SampleTap {
    inner: Arc<Mutex<TapState>>,
}

impl SampleTap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push interleaved samples, downmixing to mono
    pub fn push(&self, samples: &[f32], channels: u16, sample_rate: u32) {
        if let Ok(mut state) = self.inner.lock() {
            state.sample_rate = sample_rate;
            let channels = channels.max(1) as usize;
            for frame in samples.chunks(channels) {
                if frame.len() == channels {
                    let mono = frame.iter().sum::<f32>() / channels as f32;
                    state.samples.push_back(mono);
                }
            }
            while state.samples.len() > TAP_CAPACITY {
                state.samples.pop_front();
            }
        }
    }

    /// The last `count` samples in playback order, or `None` if fewer are buffered
    pub fn latest(&self, count: usize) -> Option<Vec<f32>> {
        let state = self.inner.lock().ok()?;
        if state.samples.len() < count || count == 0 {
            return None;
        }
        let skip = state.samples.len() - count;
        Some(state.samples.iter().skip(skip).copied().collect())
    }

    pub fn sample_rate(&self) -> u32 {
        self.inner.lock().map(|s| s.sample_rate).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut state) = self.inner.lock() {
            state.samples.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|s| s.samples.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pass-through source that copies everything it yields into a [`SampleTap`]
pub struct Tapped<S> {
    inner: S,
    tap: SampleTap,
    pending: Vec<f32>,
}

impl<S> Tapped<S>
where
    S: Source,
    S::Item: Sample,
{
    pub fn new(inner: S, tap: SampleTap) -> Self {
        Self {
            inner,
            tap,
            pending: Vec::with_capacity(FLUSH_EVERY),
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.tap
                .push(&self.pending, self.inner.channels(), self.inner.sample_rate());
            self.pending.clear();
        }
    }
}

impl<S> Iterator for Tapped<S>
where
    S: Source,
    S::Item: Sample,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(sample) => {
                self.pending.push(sample.to_float_sample().to_sample::<f32>());
                // Flush on whole frames so the downmix never splits a frame
                let channels = self.inner.channels().max(1) as usize;
                if self.pending.len() >= FLUSH_EVERY && self.pending.len() % channels == 0 {
                    self.flush();
                }
                Some(sample)
            }
            None => {
                self.flush();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> Source for Tapped<S>
where
    S: Source,
    S::Item: Sample,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.pending.clear();
        self.tap.clear();
        self.inner.try_seek(pos)
    }
}
