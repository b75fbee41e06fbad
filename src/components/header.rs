use ratatui::{prelude::*, widgets::Paragraph};

use crate::ui::layout::header_layout;
use crate::ui::Theme;

/// Header component with title and the runtime being driven
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, runtime: &str) {
        let (title_area, runtime_area) = header_layout(area);

        let title = Paragraph::new(" dockmenu ")
            .style(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        let runtime_line = Line::from(vec![
            Span::styled("runtime ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(format!("{} ", runtime), Style::default().fg(Theme::TEAL)),
        ]);
        frame.render_widget(
            Paragraph::new(runtime_line).alignment(Alignment::Right),
            runtime_area,
        );
    }
}
