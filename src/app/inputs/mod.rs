use crate::app::App;
use crossterm::event::{Event, KeyEvent, KeyEventKind};

pub mod common;
pub mod library;
pub mod mouse;
pub mod player;

/// Route one terminal event. Async work it triggers is left on `app` as requests.
pub fn handle_event(event: Event, app: &mut App) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app),
        Event::Mouse(mouse) => mouse::handle_mouse_events(mouse, app),
        _ => {}
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App) {
    // 1. Global keys and popups
    if common::handle_common_events(key, app) {
        return;
    }

    // 2. Help popup swallows everything else
    if app.show_help {
        return;
    }

    // 3. Mood selector and track list
    if library::handle_library_events(key, app) {
        return;
    }

    // 4. Transport
    player::handle_player_events(key, app);
}
