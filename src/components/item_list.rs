use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::models::Item;
use crate::ui::{border_style, selected_style, title_style, MenuStyle, Theme};

/// Selectable list of menu entries or containers
pub struct ItemList {
    pub state: ListState,
}

impl ItemList {
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { state }
    }

    /// Move selection up, wrapping to the end
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Move selection down, wrapping to the start
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn top(&mut self) {
        self.state.select(Some(0));
    }

    pub fn bottom(&mut self, len: usize) {
        if len > 0 {
            self.state.select(Some(len - 1));
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Keep the selection inside a list that just changed length
    pub fn clamp(&mut self, len: usize) {
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        items: &[Item],
        title: &str,
        empty_message: &str,
        style: &MenuStyle,
    ) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(title_style())
            .borders(Borders::ALL)
            .border_style(border_style(style));

        if items.is_empty() {
            let empty = Paragraph::new(empty_message)
                .style(Style::default().fg(Theme::OVERLAY))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let list_items: Vec<ListItem> = items
            .iter()
            .map(|item| {
                let line = match item {
                    Item::Menu(action) => Line::from(vec![Span::styled(
                        action.name(),
                        Style::default().fg(Theme::FG),
                    )]),
                    Item::Container(c) => Line::from(vec![
                        Span::styled(format!("{:<24}", c.name), Style::default().fg(Theme::FG)),
                        Span::styled(c.id.clone(), Style::default().fg(Theme::FG_DARK)),
                    ]),
                };
                ListItem::new(line)
            })
            .collect();

        let list = List::new(list_items)
            .block(block)
            .highlight_style(selected_style())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}
