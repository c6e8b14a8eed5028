pub mod engine;
pub mod error;
pub mod null;
pub mod traits;

pub use engine::PlaybackEngine;
pub use error::PlayerError;
pub use null::NullBackend;
pub use traits::{AudioBackend, PlaybackState, PlaybackStatus};

/// The engine as the application holds it: backend chosen at runtime
pub type Player = PlaybackEngine<Box<dyn AudioBackend>>;
