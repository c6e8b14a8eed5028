pub mod components;
pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);
    let wide_mode = area.width >= 90;
    let content_layout = layout::get_content_layout(main_layout.body_area, wide_mode);
    let panel = layout::get_panel_layout(content_layout.right);

    // Hit areas are rebuilt every frame
    app.hit = Default::default();

    // 2. Player card (Left)
    widgets::player::render(f, content_layout.left, app);

    // 3. Mood selector, track list, equalizer (Right)
    widgets::library::render_moods(f, panel.moods, app);
    widgets::library::render_tracks(f, panel.tracks, app);
    if panel.equalizer.height > 0 {
        components::equalizer::render(f, panel.equalizer, app);
    }

    // 4. Footer Hint (if no popup active)
    if !app.show_help {
        use ratatui::layout::Alignment;
        use ratatui::style::{Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let theme = &app.theme;
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", app.keys.display(&app.keys.toggle_help)),
                Style::default()
                    .fg(theme.overlay)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, main_layout.footer_area);
    }

    // 5. Popups (Overlays)
    widgets::popups::render(f, app);
}
