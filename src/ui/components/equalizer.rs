use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Collapse `bins[offset..]` into `bar_count` bars.
/// Each bar keeps the loudest bin it covers so beats are not averaged away.
pub fn bar_heights(bins: &[u8], offset: usize, bar_count: usize) -> Vec<u8> {
    let source = bins.get(offset..).unwrap_or(&[]);
    if bar_count == 0 {
        return Vec::new();
    }
    if source.is_empty() {
        return vec![0; bar_count];
    }

    let source_len = source.len();
    (0..bar_count)
        .map(|i| {
            let start = ((i * source_len) / bar_count).min(source_len - 1);
            let end = ((i + 1) * source_len)
                .div_ceil(bar_count)
                .min(source_len)
                .max(start + 1);
            source[start..end].iter().copied().max().unwrap_or(0)
        })
        .collect()
}

/// Louder bars shift from purple towards pink
pub fn bar_color(value: u8) -> Color {
    Color::Rgb(value.saturating_add(100), 50, 150)
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let accent = theme.mood_accent(app.mood);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " Equalizer ",
            Style::default().fg(theme.cyan).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.cyan))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let height = inner.height as usize;
    if height < 2 || width < 6 {
        return;
    }

    if app.visualizer.is_silent() {
        // Flat baseline while nothing plays
        let mut lines = vec![Line::default(); height - 1];
        lines.push(Line::from(Span::styled(
            "▁".repeat(width),
            Style::default().fg(theme.surface),
        )));
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    // Two columns per bar plus a one column gap
    let bar_count = ((width + 1) / 3).max(1);
    let bars = bar_heights(app.visualizer.bins(), app.bin_offset, bar_count);

    let total_bar_width = bar_count * 3 - 1;
    let padding = width.saturating_sub(total_bar_width) / 2;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let threshold = 1.0 - (row as f32 + 1.0) / height as f32;
        let mut spans = Vec::with_capacity(bar_count * 2 + 1);
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
        }
        for (i, &value) in bars.iter().enumerate() {
            let level = value as f32 / 255.0;
            let cell = if level > threshold + 1.0 / height as f32 {
                "██"
            } else if level > threshold + 0.5 / height as f32 {
                "▄▄"
            } else if level > threshold && value > 0 {
                "▁▁"
            } else {
                "  "
            };
            spans.push(Span::styled(cell, Style::default().fg(bar_color(value))));
            if i + 1 < bar_count {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).style(Style::default().bg(Color::Reset));
    f.render_widget(widget, inner);

    // Thin mood underline on the block's bottom edge
    if area.height > 0 && inner.width > 0 {
        let edge = Rect::new(inner.x, area.y + area.height - 1, inner.width.min(3), 1);
        f.render_widget(
            Paragraph::new(Span::styled("━━━", Style::default().fg(accent))),
            edge,
        );
    }
}
