use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct ContentLayout {
    /// Player card
    pub left: Rect,
    /// Moods, tracks and equalizer
    pub right: Rect,
    pub is_horizontal: bool,
}

pub fn get_content_layout(area: Rect, wide_mode: bool) -> ContentLayout {
    if wide_mode {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Min(30)])
            .split(area);
        ContentLayout {
            left: chunks[0],
            right: chunks[1],
            is_horizontal: true,
        }
    } else {
        // Stack Mode: card on top, browser below
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        ContentLayout {
            left: chunks[0],
            right: chunks[1],
            is_horizontal: false,
        }
    }
}

pub struct PanelLayout {
    pub moods: Rect,
    pub tracks: Rect,
    pub equalizer: Rect,
}

pub fn get_panel_layout(area: Rect) -> PanelLayout {
    // Equalizer gives way first on short terminals
    let eq_height = if area.height >= 24 {
        area.height * 2 / 5
    } else if area.height >= 14 {
        6
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(eq_height),
        ])
        .split(area);

    PanelLayout {
        moods: chunks[0],
        tracks: chunks[1],
        equalizer: chunks[2],
    }
}
