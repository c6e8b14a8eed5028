pub mod backend;
pub mod media;
pub mod tap;
pub mod visualizer;

pub use backend::RodioBackend;
pub use media::RemoteMedia;
pub use tap::{SampleTap, Tapped};
pub use visualizer::{FrequencySource, SpectrumSource, Visualizer};

use crate::player::{AudioBackend, NullBackend, PlayerError};

/// Open the default output device, falling back to a silent backend.
/// The error is returned alongside so the caller can tell the listener.
pub fn open_output(
    tap: SampleTap,
    media: RemoteMedia,
) -> (Box<dyn AudioBackend>, Option<PlayerError>) {
    match RodioBackend::new(tap, media) {
        Ok(backend) => (Box::new(backend), None),
        Err(e) => {
            tracing::warn!(error = %e, "no audio output, continuing silently");
            (Box::new(NullBackend::new()), Some(e))
        }
    }
}
