use crate::app::App;
use crate::app::keys::KeyConfig;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

type Entry = (String, &'static str, &'static str);

fn pair(keys: &KeyConfig, a: &str, b: &str) -> String {
    format!("{}/{}", keys.display(a), keys.display(b))
}

/// (section title, entries) in display order
pub fn sections(keys: &KeyConfig) -> Vec<(&'static str, Vec<Entry>)> {
    vec![
        (
            "Moods",
            vec![
                (pair(keys, &keys.mood_next, &keys.mood_prev), "🎭", "Next/prev mood"),
                (keys.display(&keys.clear_mood), "✕", "Clear mood"),
            ],
        ),
        (
            "Tracks",
            vec![
                (pair(keys, &keys.nav_down, &keys.nav_up), "📋", "Navigate"),
                (keys.display(&keys.play_selected), "▶️", "Play selected"),
            ],
        ),
        (
            "Playback",
            vec![
                (keys.display(&keys.play_pause), "⏯️", "Play/Pause"),
                (keys.display(&keys.stop), "⏹️", "Stop"),
                (pair(keys, &keys.next_track, &keys.prev_track), "⏭️", "Next/prev track"),
                (pair(keys, &keys.seek_backward, &keys.seek_forward), "⏩", "Seek ±5s"),
                ("0-9".to_string(), "🎯", "Jump to 0-90%"),
                (pair(keys, &keys.volume_up, &keys.volume_down), "🔊", "Volume"),
            ],
        ),
        (
            "Global",
            vec![
                (keys.display(&keys.toggle_help), "❔", "This help"),
                (keys.display(&keys.quit), "🚪", "Quit"),
            ],
        ),
    ]
}

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let sections = sections(&app.keys);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (title, entries)) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("────── {} ──────", title),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )));
        for (key, icon, desc) in entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<7} ", key),
                    Style::default()
                        .fg(theme.green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   ", Style::default().fg(theme.overlay)),
                Span::styled(format!("{} ", icon), Style::default()),
                Span::styled(*desc, Style::default().fg(theme.text)),
            ]));
        }
    }

    // Fit content exactly 📏
    let content_width = sections
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(k, _, d)| 2 + k.width().max(7) + 3 + 3 + d.width())
        .max()
        .unwrap_or(20)
        .max(24);

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height); // +2 for borders
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Position at bottom-right
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(" Keys ")
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}
