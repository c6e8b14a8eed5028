pub mod moods;
pub mod tracks;

pub use moods::render as render_moods;
pub use tracks::render as render_tracks;
