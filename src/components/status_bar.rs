use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{Status, ViewMode};
use crate::ui::{key_desc_span, key_span, Theme};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Keybinding definition
pub struct KeyBinding {
    pub key: &'static str,
    pub desc: &'static str,
}

/// Status bar component (bottom of screen): action status and keybindings
pub struct StatusBar;

impl StatusBar {
    pub fn menu_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "↑↓", desc: "move" },
            KeyBinding { key: "Enter", desc: "choose" },
            KeyBinding { key: "?", desc: "help" },
            KeyBinding { key: "q", desc: "quit" },
        ]
    }

    pub fn containers_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "↑↓", desc: "move" },
            KeyBinding { key: "Enter", desc: "choose" },
            KeyBinding { key: "r", desc: "refresh" },
            KeyBinding { key: "Esc", desc: "menu" },
            KeyBinding { key: "q", desc: "quit" },
        ]
    }

    pub fn logs_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "↑↓", desc: "scroll" },
            KeyBinding { key: "g/G", desc: "top/end" },
            KeyBinding { key: "Esc", desc: "back" },
            KeyBinding { key: "q", desc: "quit" },
        ]
    }

    /// Spinner frame for a tick counter
    pub fn spinner(tick: usize) -> &'static str {
        SPINNER[tick % SPINNER.len()]
    }

    pub fn render_status(frame: &mut Frame, area: Rect, status: &Status, tick: usize) {
        let line = match status {
            Status::Idle => Line::raw(""),
            Status::Running(label) => Line::from(vec![
                Span::styled(
                    format!(" Running... {} ", Self::spinner(tick)),
                    Style::default().fg(Theme::YELLOW),
                ),
                Span::styled(label.as_str(), Style::default().fg(Theme::FG_DARK)),
            ]),
            Status::Done(message) => Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Theme::GREEN),
            )),
            Status::Failed { message, detail } => Line::from(vec![
                Span::styled(
                    format!(" {} ", message),
                    Style::default().fg(Theme::RED).add_modifier(Modifier::BOLD),
                ),
                Span::styled(detail.as_str(), Style::default().fg(Theme::FG_DARK)),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    pub fn render_keys(frame: &mut Frame, area: Rect, view: &ViewMode) {
        let keybindings = match view {
            ViewMode::Menu => Self::menu_keybindings(),
            ViewMode::Containers(_) => Self::containers_keybindings(),
            ViewMode::Logs => Self::logs_keybindings(),
        };

        let mut spans: Vec<Span> = Vec::new();
        for kb in keybindings {
            spans.push(key_span(kb.key));
            spans.push(key_desc_span(kb.desc));
        }

        let keys_widget = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Theme::BG_DARK))
            .alignment(Alignment::Center);
        frame.render_widget(keys_widget, area);
    }
}
