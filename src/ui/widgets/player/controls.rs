use crate::app::App;
use crate::player::PlaybackStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

const VOLUME_BAR_WIDTH: usize = 20;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let play_icon = if app.engine.status() == PlaybackStatus::Playing {
        "⏸"
    } else {
        "▶"
    };
    let btn_style = if app.engine.tracks().is_empty() {
        Style::default().fg(theme.overlay)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };

    // Split Controls Area: Top for Buttons, Bottom for Volume
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Volume Bar
        ])
        .split(area);

    let center_spans = Line::from(vec![
        Span::styled("   ⏮   ", btn_style),
        Span::raw("  "),
        Span::styled("⏹", btn_style),
        Span::raw("  "),
        Span::styled(format!("   {}   ", play_icon), btn_style),
        Span::raw("  "),
        Span::styled("   ⏭   ", btn_style),
    ]);
    let center_widget = Paragraph::new(center_spans)
        .alignment(Alignment::Center)
        .block(Block::default());
    f.render_widget(center_widget, chunks[0]);

    if chunks[2].height == 0 {
        return;
    }

    let filled_width = (VOLUME_BAR_WIDTH as f32 * app.engine.volume()).round() as usize;
    let mut bar_spans = Vec::with_capacity(VOLUME_BAR_WIDTH + 2);
    bar_spans.push(Span::styled("- ", Style::default().fg(theme.overlay)));
    for i in 0..VOLUME_BAR_WIDTH {
        if i < filled_width {
            bar_spans.push(Span::styled("━", Style::default().fg(theme.magenta)));
        } else {
            bar_spans.push(Span::styled("─", Style::default().fg(theme.surface)));
        }
    }
    bar_spans.push(Span::styled(" +", Style::default().fg(theme.overlay)));

    // "- " + bar + " +", centred in the row
    let total = (VOLUME_BAR_WIDTH + 4) as u16;
    let row = chunks[2];
    let x = row.x + row.width.saturating_sub(total) / 2;
    let vol_area = Rect::new(x, row.y, total.min(row.width), 1);

    f.render_widget(Paragraph::new(Line::from(bar_spans)), vol_area);

    // Only the bar itself is clickable
    app.hit.volume_bar = Rect::new(
        vol_area.x + 2,
        vol_area.y,
        (VOLUME_BAR_WIDTH as u16).min(vol_area.width.saturating_sub(2)),
        1,
    );
}
