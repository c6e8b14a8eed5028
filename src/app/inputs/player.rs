use crate::app::App;
use crate::player::PlaybackStatus;
use crossterm::event::{KeyCode, KeyEvent};

const SEEK_STEP_SECS: f64 = 5.0;
const VOLUME_STEP: f32 = 0.05;

pub fn handle_player_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = app.keys.clone();

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        app.toggle_playback();
        match app.engine.status() {
            PlaybackStatus::Playing => app.show_toast("▶ Play"),
            PlaybackStatus::Paused => app.show_toast("⏸ Pause"),
            _ => {}
        }
        return true;
    }

    if keys.matches(key, &keys.stop) {
        app.stop();
        app.show_toast("⏹ Stop");
        return true;
    }

    // Next Track ('n')
    if keys.matches(key, &keys.next_track) {
        app.next_track();
        return true;
    }

    // Prev Track ('p')
    if keys.matches(key, &keys.prev_track) {
        app.prev_track();
        return true;
    }

    // Volume Up ('+'), '=' shares the key without shift
    if keys.matches(key, &keys.volume_up) || key.code == KeyCode::Char('=') {
        app.change_volume(VOLUME_STEP);
        return true;
    }

    if keys.matches(key, &keys.volume_down) {
        app.change_volume(-VOLUME_STEP);
        return true;
    }

    if keys.matches(key, &keys.seek_forward) || key.code == KeyCode::Right {
        app.seek_by(SEEK_STEP_SECS);
        return true;
    }

    if keys.matches(key, &keys.seek_backward) || key.code == KeyCode::Left {
        app.seek_by(-SEEK_STEP_SECS);
        return true;
    }

    // '0'..'9' jump to that tenth of the track
    if let KeyCode::Char(c) = key.code {
        if let Some(digit) = c.to_digit(10) {
            app.seek_to(digit as f64 / 10.0);
            return true;
        }
    }

    false
}
