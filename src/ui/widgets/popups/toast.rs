use crate::app::{App, Toast};
use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const SLIDE: Duration = Duration::from_millis(300);

/// Horizontal push-out of a toast `width` cells wide: slides in from the
/// right edge, holds, then slides back out before the deadline.
pub fn slide_offset(width: u16, shown_for: Duration, remaining: Duration) -> u16 {
    let progress = if shown_for < SLIDE {
        let t = shown_for.as_secs_f32() / SLIDE.as_secs_f32();
        1.0 - (1.0 - t).powi(3)
    } else if remaining < SLIDE {
        let t = remaining.as_secs_f32() / SLIDE.as_secs_f32();
        1.0 - (1.0 - t).powi(3)
    } else {
        1.0
    };
    (width as f32 * (1.0 - progress)).round() as u16
}

fn accent(message: &str, theme: &Theme) -> Color {
    if message.starts_with('⚠') {
        theme.red
    } else if message.starts_with('⏳') {
        theme.yellow
    } else {
        theme.blue
    }
}

fn area(screen: Rect, toast: &Toast, now: Instant) -> Option<Rect> {
    let inner_max = screen.width.saturating_sub(8) as usize;
    let width = (toast.message.width().min(inner_max) as u16 + 6).min(screen.width.saturating_sub(2));
    let offset = slide_offset(
        width,
        now.saturating_duration_since(toast.start_time),
        toast.deadline.saturating_duration_since(now),
    );
    let x = screen.width.saturating_sub(width + 1).saturating_add(offset);
    if x >= screen.width {
        return None;
    }
    let visible = Rect::new(x, 1, width, 3).intersection(screen);
    (!visible.is_empty()).then_some(visible)
}

pub fn render(f: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let Some(rect) = area(f.area(), toast, Instant::now()) else {
        return;
    };

    let color = accent(&toast.message, &app.theme);
    let message = truncate(&toast.message, rect.width.saturating_sub(4) as usize);

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(Color::Reset)),
        ),
        rect,
    );
}
