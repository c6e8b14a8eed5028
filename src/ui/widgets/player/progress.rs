use crate::app::App;
use crate::player::PlaybackStatus;
use crate::ui::utils::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Seek slider. Its area is recorded so clicks can seek.
pub fn render_progress(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let gauge_area_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let ratio = app.seek_slider.clamp(0.0, 1.0);
    let active = app.engine.status() != PlaybackStatus::Empty;

    let width = gauge_area_rect.width as usize;
    let occupied_width = (width as f64 * ratio) as usize;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    let mut bar_spans: Vec<Span> = Vec::with_capacity(width);
    for i in 0..width {
        if active && i == occupied_width.min(width.saturating_sub(1)) {
            // Playhead knob
            bar_spans.push(Span::styled("●", fill_style));
        } else if i < occupied_width {
            bar_spans.push(Span::styled("━", fill_style));
        } else {
            bar_spans.push(Span::styled("─", empty_style));
        }
    }

    let gauge_p = Paragraph::new(Line::from(bar_spans))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge_p, gauge_area_rect);

    app.hit.seek_bar = gauge_area_rect;
}

pub fn render_time(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    if app.engine.status() == PlaybackStatus::Empty {
        return;
    }
    let duration = app.engine.duration();
    let total = if duration.is_zero() {
        "--:--".to_string()
    } else {
        format_time(duration)
    };
    let time_str = format!("{} / {}", format_time(app.engine.position()), total);
    let time_label = Paragraph::new(time_str)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.overlay));
    f.render_widget(time_label, area);
}
