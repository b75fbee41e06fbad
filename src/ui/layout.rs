use ratatui::prelude::*;

/// Screen areas, top to bottom
pub struct MainLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
    pub keys: Rect,
}

pub fn main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Keybindings
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
        keys: chunks[3],
    }
}

/// Split header into title and runtime sections
pub fn header_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(16), Constraint::Length(30)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered modal area
pub fn centered_modal(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height.min(80)) / 2),
            Constraint::Length(height),
            Constraint::Percentage((100 - height.min(80)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
