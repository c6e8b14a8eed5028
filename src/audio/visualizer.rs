use super::tap::SampleTap;
use spectrum_analyzer::scaling::divide_by_N;
use spectrum_analyzer::windows::hann_window;
use spectrum_analyzer::{samples_fft_to_spectrum, FrequencyLimit};

/// Anything that can report the current frequency spectrum as bytes
pub trait FrequencySource {
    fn bin_count(&self) -> usize;

    /// Fill `out` with per-bin magnitudes on a 0-255 scale.
    /// Must write all zeros when there is no signal to analyse.
    fn fill(&mut self, out: &mut [u8]);
}

/// Decibel window mapped onto 0..=255, same range browsers use for byte spectra
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if !(magnitude > 0.0) || max_db <= min_db {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (db - min_db) / (max_db - min_db) * 255.0;
    scaled.clamp(0.0, 255.0) as u8
}

/// Hann-windowed FFT over the most recent samples in a [`SampleTap`] 🌊
pub struct SpectrumSource {
    tap: SampleTap,
    fft_size: usize,
    min_db: f32,
    max_db: f32,
}

impl SpectrumSource {
    /// `fft_size` is rounded to a power of two in `32..=8192`
    pub fn new(tap: SampleTap, fft_size: usize) -> Self {
        Self {
            tap,
            fft_size: fft_size.clamp(32, 8192).next_power_of_two(),
            min_db: MIN_DECIBELS,
            max_db: MAX_DECIBELS,
        }
    }

    pub fn with_decibel_range(mut self, min_db: f32, max_db: f32) -> Self {
        self.min_db = min_db;
        self.max_db = max_db;
        self
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}

impl FrequencySource for SpectrumSource {
    fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    fn fill(&mut self, out: &mut [u8]) {
        out.fill(0);

        let Some(samples) = self.tap.latest(self.fft_size) else {
            return;
        };
        let sample_rate = self.tap.sample_rate();
        if sample_rate == 0 {
            return;
        }

        let windowed = hann_window(&samples);
        let spectrum = match samples_fft_to_spectrum(
            &windowed,
            sample_rate,
            FrequencyLimit::All,
            Some(&divide_by_N),
        ) {
            Ok(spectrum) => spectrum,
            Err(e) => {
                tracing::trace!(error = ?e, "spectrum unavailable");
                return;
            }
        };

        for (slot, (_, value)) in out.iter_mut().zip(spectrum.data().iter()) {
            *slot = magnitude_to_byte(value.val(), self.min_db, self.max_db);
        }
    }
}

/// Equalizer state: the latest frequency buffer and whether frames are scheduled.
/// Nothing else survives between frames.
#[derive(Debug, Clone)]
pub struct Visualizer {
    bins: Vec<u8>,
    scheduled: bool,
}

impl Visualizer {
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![0; bin_count],
            scheduled: false,
        }
    }

    pub fn start(&mut self) {
        self.scheduled = true;
    }

    /// Stop sampling and blank the surface
    pub fn cancel(&mut self) {
        self.scheduled = false;
        self.bins.fill(0);
    }

    /// One animation frame. Samples while playing; otherwise cancels.
    /// Returns whether another frame should be scheduled.
    pub fn frame(&mut self, playing: bool, source: &mut dyn FrequencySource) -> bool {
        if !playing {
            self.cancel();
            return false;
        }
        self.scheduled = true;
        let count = source.bin_count();
        if self.bins.len() != count {
            self.bins.resize(count, 0);
        }
        source.fill(&mut self.bins);
        true
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn is_silent(&self) -> bool {
        self.bins.iter().all(|&b| b == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<u8>);

    impl FrequencySource for FixedSource {
        fn bin_count(&self) -> usize {
            self.0.len()
        }

        fn fill(&mut self, out: &mut [u8]) {
            out.copy_from_slice(&self.0);
        }
    }

    #[test]
    fn test_frame_samples_only_while_playing() {
        let mut source = FixedSource(vec![10, 200, 255, 0]);
        let mut vis = Visualizer::new(4);

        assert!(vis.frame(true, &mut source));
        assert_eq!(vis.bins(), &[10, 200, 255, 0]);
        assert!(vis.is_scheduled());

        assert!(!vis.frame(false, &mut source));
        assert!(vis.is_silent());
        assert!(!vis.is_scheduled());
    }

    #[test]
    fn test_cancel_clears() {
        let mut source = FixedSource(vec![99; 8]);
        let mut vis = Visualizer::new(2);
        vis.frame(true, &mut source);
        assert_eq!(vis.bins().len(), 8);

        vis.cancel();
        assert!(vis.is_silent());
    }

    #[test]
    fn test_empty_tap_yields_zeros() {
        let tap = SampleTap::new();
        let mut source = SpectrumSource::new(tap.clone(), 512);
        let mut vis = Visualizer::new(source.bin_count());

        assert!(vis.frame(true, &mut source));
        assert_eq!(vis.bins().len(), 256);
        assert!(vis.is_silent());

        // Not enough samples for a full window yet
        tap.push(&[0.5; 100], 1, 44_100);
        vis.frame(true, &mut source);
        assert!(vis.is_silent());
    }

    #[test]
    fn test_sine_peaks_in_its_bin() {
        let rate = 8_000;
        let tap = SampleTap::new();
        let tone: Vec<f32> = (0..512)
            .map(|n| (2.0 * std::f32::consts::PI * 1_000.0 * n as f32 / rate as f32).sin())
            .collect();
        tap.push(&tone, 1, rate);

        let mut source = SpectrumSource::new(tap, 512);
        let mut bins = vec![0u8; source.bin_count()];
        source.fill(&mut bins);

        // 1 kHz at 8 kHz / 512 points lands on bin 64
        assert_eq!(bins[64], 255);
        assert_eq!(bins[10], 0);
        assert_eq!(bins[200], 0);
    }

    #[test]
    fn test_magnitude_scale() {
        assert_eq!(magnitude_to_byte(0.0, MIN_DECIBELS, MAX_DECIBELS), 0);
        assert_eq!(magnitude_to_byte(f32::NAN, MIN_DECIBELS, MAX_DECIBELS), 0);
        assert_eq!(magnitude_to_byte(1.0, MIN_DECIBELS, MAX_DECIBELS), 255);
        // -65 dB sits halfway
        let mid = magnitude_to_byte(10f32.powf(-65.0 / 20.0), MIN_DECIBELS, MAX_DECIBELS);
        assert!((126..=128).contains(&mid));
    }
}
