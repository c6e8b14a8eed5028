use crate::app::App;
use crate::player::PlaybackStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod art;
pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let title = match app.engine.status() {
        _ if app.is_fetching_media() => " Loading… ",
        PlaybackStatus::Playing => " Now Playing ",
        PlaybackStatus::Paused => " Paused ",
        PlaybackStatus::Loaded => " Ready ",
        PlaybackStatus::Empty => " SoundVibes ",
    };

    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(vec![Span::styled(
            title,
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )]))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner_music_area = music_block.inner(area);
    f.render_widget(music_block, area);

    let m_height = inner_music_area.height;

    let music_constraints = if m_height < 10 {
        // Tiny Mode: no artwork, no spacer
        vec![
            Constraint::Length(0),                                 // 0: Artwork (Hidden)
            Constraint::Length(m_height.saturating_sub(4).max(1)), // 1: Info
            Constraint::Length(0),                                 // 2: Spacer (Hidden)
            Constraint::Length(1),                                 // 3: Gauge
            Constraint::Length(0),                                 // 4: Time (Hidden)
            Constraint::Length(3),                                 // 5: Controls
        ]
    } else {
        vec![
            Constraint::Min(0),    // 0: Artwork (Elastic!)
            Constraint::Length(3), // 1: Info
            Constraint::Length(1), // 2: Spacer
            Constraint::Length(1), // 3: Gauge
            Constraint::Length(1), // 4: Time
            Constraint::Length(3), // 5: Controls
        ]
    };

    let music_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(music_constraints)
        .split(inner_music_area);

    // Only render art if we have at least 2 lines
    if music_chunks[0].height > 1 {
        art::render(f, music_chunks[0], app);
    }

    info::render(f, music_chunks[1], app);

    if music_chunks[3].height > 0 {
        progress::render_progress(f, music_chunks[3], app);
    }

    if music_chunks[4].height > 0 {
        progress::render_time(f, music_chunks[4], app);
    }

    if music_chunks[5].height > 0 {
        controls::render(f, music_chunks[5], app);
    }
}
