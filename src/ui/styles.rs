use ratatui::prelude::*;

/// Catppuccin Mocha color theme
/// https://github.com/catppuccin/catppuccin
pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(12, 12, 20);        // Modals and key bar
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);       // #313244 - Surface0
    pub const FG: Color = Color::Rgb(205, 214, 244);          // #cdd6f4 - Text
    pub const FG_DARK: Color = Color::Rgb(147, 153, 178);     // #9399b2 - Subtext1
    pub const OVERLAY: Color = Color::Rgb(127, 132, 156);     // #7f849c - Overlay1

    pub const MAUVE: Color = Color::Rgb(203, 166, 247);       // #cba6f7
    pub const RED: Color = Color::Rgb(243, 139, 168);         // #f38ba8
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);      // #f9e2af
    pub const GREEN: Color = Color::Rgb(166, 227, 161);       // #a6e3a1
    pub const TEAL: Color = Color::Rgb(148, 226, 213);        // #94e2d5
    pub const BLUE: Color = Color::Rgb(137, 180, 250);        // #89b4fa
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);    // #b4befe

    pub const SELECTION_BG: Color = Self::SURFACE0;
    pub const SELECTION_FG: Color = Self::LAVENDER;
}

/// Per-run rendering settings from the config file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuStyle {
    pub border: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            border: Color::Indexed(36),
        }
    }
}

/// Create a style for selected items
pub fn selected_style() -> Style {
    Style::default()
        .bg(Theme::SELECTION_BG)
        .fg(Theme::SELECTION_FG)
        .add_modifier(Modifier::BOLD)
}

/// Border style in the configured color
pub fn border_style(style: &MenuStyle) -> Style {
    Style::default().fg(style.border)
}

/// Create a style for panel titles
pub fn title_style() -> Style {
    Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)
}

/// Create a keybinding span (highlighted key)
pub fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .bg(Theme::MAUVE)
            .fg(Theme::BG_DARK)
            .add_modifier(Modifier::BOLD),
    )
}

/// Create a keybinding description span (with trailing separator)
pub fn key_desc_span(desc: &str) -> Span<'_> {
    Span::styled(
        format!(" {}   ", desc),
        Style::default().fg(Theme::FG_DARK),
    )
}
