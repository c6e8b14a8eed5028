use crate::app::{App, ArtworkState};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Half-block rendering: each cell shows two vertical pixels, top as fg and bottom as bg.
/// The image is scaled to fit `cols` x `rows` cells and centred vertically.
pub fn half_block_lines(image: &DynamicImage, cols: u16, rows: u16) -> Vec<Line<'static>> {
    let target_width = cols as u32;
    let target_height = rows as u32 * 2;
    if target_width == 0 || target_height == 0 {
        return Vec::new();
    }

    // Resize preserving aspect ratio (Triangle for quality)
    let resized = image.resize(target_width, target_height, FilterType::Triangle);
    let img_height = resized.height();
    let img_rows = img_height.div_ceil(2);
    let padding_top = (rows as u32).saturating_sub(img_rows) / 2;

    let mut lines = Vec::with_capacity(rows as usize);
    for _ in 0..padding_top {
        lines.push(Line::default());
    }

    for y in (0..img_height).step_by(2) {
        let mut spans = Vec::with_capacity(resized.width() as usize);
        for x in 0..resized.width() {
            let top = resized.get_pixel(x, y);
            let bottom = if y + 1 < img_height {
                resized.get_pixel(x, y + 1)
            } else {
                top
            };
            spans.push(Span::styled(
                "▀",
                Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    if area.height < 1 {
        return;
    }

    let placeholder = |text: &str, fg: Color| {
        // Push the text to the vertical middle
        let pad = (area.height as usize).saturating_sub(text.lines().count()) / 2;
        Paragraph::new(format!("{}{}", "\n".repeat(pad), text))
            .alignment(Alignment::Center)
            .block(Block::default().style(Style::default().fg(fg).bg(Color::Reset)))
    };

    match &app.artwork {
        ArtworkState::Loaded(raw_image) => {
            let lines = half_block_lines(raw_image, area.width, area.height);
            let artwork_widget = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().style(Style::default().bg(Color::Reset)));
            f.render_widget(artwork_widget, area);
        }
        ArtworkState::Loading => {
            f.render_widget(placeholder("Loading...", theme.yellow), area);
        }
        ArtworkState::Failed | ArtworkState::Idle => {
            let accent = theme.mood_accent(app.mood);
            f.render_widget(placeholder("♪\nNo Cover\nArt", accent), area);
        }
    }
}
