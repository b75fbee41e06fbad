use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::ui::{border_style, MenuStyle};

/// Scrollable view over captured `logs` output
pub struct LogsView {
    pub scroll: usize,
    pub follow: bool,
    /// Text rows available at the last render
    pub visible_height: usize,
}

impl LogsView {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            follow: true,
            visible_height: 0,
        }
    }

    /// Scroll offset that shows the last full page
    pub fn max_scroll(&self, log_count: usize) -> usize {
        log_count.saturating_sub(self.visible_height.max(1))
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, amount: usize, log_count: usize) {
        self.scroll = (self.scroll + amount).min(self.max_scroll(log_count));
    }

    pub fn top(&mut self) {
        self.scroll = 0;
        self.follow = false;
    }

    /// Go to bottom and enable follow mode
    pub fn bottom(&mut self, log_count: usize) {
        self.scroll = self.max_scroll(log_count);
        self.follow = true;
    }

    /// Pin to the last page while following
    pub fn update_logs(&mut self, log_count: usize, visible_lines: usize) {
        if self.follow && log_count > visible_lines {
            self.scroll = log_count.saturating_sub(visible_lines);
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        logs: &[String],
        container_name: &str,
        style: &MenuStyle,
    ) {
        let block = Block::default()
            .title(format!(
                " Logs: {} {} ",
                container_name,
                if self.follow { "[end]" } else { "" }
            ))
            .borders(Borders::ALL)
            .border_style(border_style(style));

        let inner = block.inner(area);
        let visible_height = inner.height as usize;
        self.visible_height = visible_height;

        self.update_logs(logs.len(), visible_height);
        self.scroll = self.scroll.min(self.max_scroll(logs.len()));

        let visible_logs: Vec<Line> = logs
            .iter()
            .skip(self.scroll)
            .take(visible_height)
            .map(|line| Line::raw(line.as_str()))
            .collect();

        frame.render_widget(Paragraph::new(visible_logs).block(block), area);

        if logs.len() > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            let mut scrollbar_state = ScrollbarState::new(logs.len().saturating_sub(visible_height))
                .position(self.scroll);

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

impl Default for LogsView {
    fn default() -> Self {
        Self::new()
    }
}
