use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{centered_modal, MenuStyle, Theme};

const SHORTCUTS: &[(&str, &str)] = &[
    ("j/↓    ", "Move down"),
    ("k/↑    ", "Move up"),
    ("g      ", "Go to top"),
    ("G      ", "Go to bottom"),
    ("Enter  ", "Choose"),
    ("r      ", "Refresh container list"),
    ("Esc/m  ", "Back to menu"),
    ("?      ", "Toggle help"),
    ("q      ", "Quit"),
];

/// Help modal component
pub struct HelpModal;

impl HelpModal {
    pub fn render(frame: &mut Frame, area: Rect, style: &MenuStyle) {
        let modal_area = centered_modal(area, 50, SHORTCUTS.len() as u16 + 6);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let mut help_text = vec![
            Line::styled("Keyboard Shortcuts", Style::default().bold().fg(Theme::TEAL)),
            Line::raw(""),
        ];
        help_text.extend(SHORTCUTS.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {}", key), Style::default().fg(Theme::YELLOW)),
                Span::raw(*desc),
            ])
        }));
        help_text.push(Line::raw(""));
        help_text.push(Line::styled(
            "Press Esc to close",
            Style::default().fg(Theme::OVERLAY),
        ));

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(style.border))
            .style(Style::default().bg(Theme::BG_DARK));

        frame.render_widget(Paragraph::new(help_text).block(block), modal_area);
    }
}
