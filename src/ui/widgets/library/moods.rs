use crate::app::App;
use crate::catalog::Mood;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const CLEAR_LABEL: &str = "✕";

/// Chip labels left to right. `None` is the "no mood" chip.
fn chips() -> impl Iterator<Item = (Option<Mood>, &'static str)> {
    std::iter::once((None, CLEAR_LABEL)).chain(Mood::ALL.into_iter().map(|m| (Some(m), m.label())))
}

/// Lay chips out on one row starting at `area.x`, one space apart.
/// Chips that do not fit are dropped.
pub fn chip_areas(area: Rect) -> Vec<(Rect, Option<Mood>)> {
    let mut x = area.x;
    let right = area.x + area.width;
    let mut out = Vec::new();
    for (mood, label) in chips() {
        let w = label.width() as u16 + 2;
        if x + w > right {
            break;
        }
        out.push((Rect::new(x, area.y, w, 1), mood));
        x += w + 1;
    }
    out
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let accent = theme.mood_accent(app.mood);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " Mood ",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let row = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 1);
    let areas = chip_areas(row);

    let mut spans = vec![Span::raw(" ")];
    for (i, (_, mood)) in areas.iter().enumerate() {
        let label = mood.map(|m| m.label()).unwrap_or(CLEAR_LABEL);
        let style = if *mood == app.mood {
            Style::default()
                .fg(theme.mood_foreground(*mood))
                .bg(theme.mood_accent(*mood))
                .add_modifier(Modifier::BOLD)
        } else if mood.is_none() {
            Style::default().fg(theme.overlay)
        } else {
            Style::default().fg(theme.mood_accent(*mood))
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        if i + 1 < areas.len() {
            spans.push(Span::raw(" "));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), inner);
    app.hit.moods = areas;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_layout() {
        let areas = chip_areas(Rect::new(10, 3, 200, 1));
        assert_eq!(areas.len(), 7);
        assert_eq!(areas[0].1, None);
        assert_eq!(areas[0].0, Rect::new(10, 3, 3, 1));
        // " Happy " starts after the clear chip and a gap
        assert_eq!(areas[1], (Rect::new(14, 3, 7, 1), Some(Mood::Happy)));
        assert_eq!(areas[6].1, Some(Mood::Stressed));
    }

    #[test]
    fn test_chips_clipped_to_width() {
        let areas = chip_areas(Rect::new(0, 0, 12, 1));
        assert_eq!(areas.len(), 2);
        assert!(chip_areas(Rect::new(0, 0, 2, 1)).is_empty());
    }
}
