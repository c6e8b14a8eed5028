use crate::app::App;
use crate::catalog::Mood;
use crossterm::event::KeyEvent;

pub fn handle_library_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = app.keys.clone(); // Clone keys to avoid borrowing app

    if keys.matches(key, &keys.mood_next) {
        app.select_mood(Mood::cycle_next(app.mood));
        return true;
    }

    if keys.matches(key, &keys.mood_prev) {
        app.select_mood(Mood::cycle_prev(app.mood));
        return true;
    }

    if keys.matches(key, &keys.clear_mood) {
        app.select_mood(None);
        return true;
    }

    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.move_selection(1);
        return true;
    }

    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.move_selection(-1);
        return true;
    }

    if keys.matches(key, &keys.play_selected) {
        app.play_selected();
        return true;
    }

    false
}
