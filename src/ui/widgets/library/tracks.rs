use crate::app::App;
use crate::player::PlaybackStatus;
use crate::ui::utils::fit;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// First visible row so that `selected` stays near the middle
pub fn scroll_offset(selected: usize, len: usize, rows: usize) -> usize {
    selected
        .saturating_sub(rows / 2)
        .min(len.saturating_sub(rows))
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let title = match app.mood {
        Some(mood) => format!(" Tracks · {} ", mood.label()),
        None => " Tracks ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title,
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let tracks = app.engine.tracks();
    if tracks.is_empty() {
        let message = if app.catalog_loading {
            "Loading…"
        } else if app.mood.is_some() {
            "No tracks for this mood"
        } else {
            "Choose a mood to see its tracks"
        };
        let pad = inner.height.saturating_sub(1) / 2;
        let text = format!("{}{}", "\n".repeat(pad as usize), message);
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.overlay)),
            inner,
        );
        return;
    }

    let rows = inner.height as usize;
    let width = inner.width as usize;
    let artist_w = width / 3;
    let title_w = width.saturating_sub(artist_w + 10);
    let start = scroll_offset(app.list_selected, tracks.len(), rows);

    let current = app.engine.current_index();
    let playing = app.engine.status() == PlaybackStatus::Playing;

    let green = theme.green;
    let pink = theme.red;
    let cream = theme.yellow;
    let muted = theme.overlay;
    let grid = theme.surface;

    let mut lines = Vec::with_capacity(rows);
    for (idx, track) in tracks.iter().enumerate().skip(start).take(rows) {
        let is_sel = idx == app.list_selected;
        let is_current = current == Some(idx);

        // ● selected, ◉ current, ○ otherwise
        let (marker, m_color, t_style, a_style) = if is_sel {
            (
                "●",
                cream,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.text),
            )
        } else if is_current {
            ("◉", pink, Style::default().fg(pink), Style::default().fg(pink))
        } else {
            (
                "○",
                grid,
                Style::default().fg(theme.text),
                Style::default().fg(muted),
            )
        };
        let note = if is_current && playing { "♫ " } else { "♪ " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), Style::default().fg(m_color)),
            Span::styled(
                format!("{:>2} ", idx + 1),
                Style::default().fg(if is_sel { green } else { muted }),
            ),
            Span::styled(note, Style::default().fg(if is_current { pink } else { green })),
            Span::styled(fit(&track.title, title_w), t_style),
            Span::styled(fit(&track.artist, artist_w), a_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);

    app.hit.track_list = inner;
    app.hit.list_offset = start;
}
