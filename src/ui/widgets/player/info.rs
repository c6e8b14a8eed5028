use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let max_width = area.width.saturating_sub(4) as usize; // -4 for padding/prefixes

    let mut info_text = Vec::new();

    match app.engine.current_track() {
        Some(track) => {
            info_text.push(Line::from(Span::styled(
                format!("🎵 {}", truncate(&track.title, max_width.saturating_sub(2))),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )));
            info_text.push(Line::from(vec![
                Span::raw("🎤 "),
                Span::styled(
                    truncate(&track.artist, max_width.saturating_sub(2)),
                    Style::default().fg(theme.magenta),
                ),
            ]));
        }
        None => {
            let hint = if app.catalog_loading {
                "Fetching tracks…".to_string()
            } else if app.mood.is_some() {
                "Nothing to play".to_string()
            } else {
                format!(
                    "Pick a mood with {}",
                    app.keys.display(&app.keys.mood_next)
                )
            };
            info_text.push(Line::from(Span::styled(
                "🎧 How are you feeling?",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )));
            info_text.push(Line::from(Span::styled(
                hint,
                Style::default().fg(theme.overlay),
            )));
        }
    }

    if let Some(mood) = app.mood {
        let count = app.engine.tracks().len();
        let position = app
            .engine
            .current_index()
            .map(|i| format!("{}/{}", i + 1, count))
            .unwrap_or_else(|| format!("{} tracks", count));
        info_text.push(Line::from(vec![
            Span::styled(
                format!("\u{00A0}{}\u{00A0}", mood.label()),
                Style::default()
                    .fg(theme.mood_foreground(Some(mood)))
                    .bg(theme.mood_accent(Some(mood)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" • ", Style::default().fg(theme.overlay)),
            Span::styled(position, Style::default().fg(theme.overlay)),
        ]));
    }

    let info = Paragraph::new(info_text)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(info, area);
}
