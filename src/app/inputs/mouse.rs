use crate::app::App;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.width > 0
        && area.height > 0
        && column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

/// Horizontal position inside `area` as `0.0..=1.0`
fn fraction_in(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x) as f64;
    (offset / (area.width - 1) as f64).clamp(0.0, 1.0)
}

pub fn handle_mouse_events(mouse: MouseEvent, app: &mut App) {
    if app.show_help {
        if let MouseEventKind::Down(_) = mouse.kind {
            app.show_help = false;
        }
        return;
    }

    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            if hit(app.hit.seek_bar, col, row) {
                app.seek_to(fraction_in(app.hit.seek_bar, col));
                return;
            }
            if hit(app.hit.volume_bar, col, row) {
                app.set_volume(fraction_in(app.hit.volume_bar, col) as f32);
                return;
            }
            // Only presses pick moods and tracks, drags would fire repeatedly
            if !matches!(mouse.kind, MouseEventKind::Down(_)) {
                return;
            }
            if let Some(mood) = app
                .hit
                .moods
                .iter()
                .find(|(area, _)| hit(*area, col, row))
                .map(|(_, mood)| *mood)
            {
                app.select_mood(mood);
                return;
            }
            if hit(app.hit.track_list, col, row) {
                let index = app.hit.list_offset + (row - app.hit.track_list.y) as usize;
                if index < app.engine.tracks().len() {
                    app.list_selected = index;
                    app.select_track(index);
                }
            }
        }
        MouseEventKind::ScrollDown if hit(app.hit.track_list, col, row) => app.move_selection(1),
        MouseEventKind::ScrollUp if hit(app.hit.track_list, col, row) => app.move_selection(-1),
        _ => {}
    }
}
