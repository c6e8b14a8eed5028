use crate::app::ArtworkState;
use crate::catalog::{Catalog, Mood};
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    /// Housekeeping: toasts, end-of-track detection
    Tick,
    /// Seek slider refresh while playing
    PositionPoll,
    /// One equalizer animation frame
    Frame,
    CatalogLoaded {
        generation: u64,
        mood: Mood,
        catalog: Catalog,
    },
    /// A remote track finished downloading (or failed to)
    MediaLoaded {
        generation: u64,
        result: Result<(), String>,
    },
    ArtworkLoaded {
        generation: u64,
        artwork: ArtworkState,
    },
}
