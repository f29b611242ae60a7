use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub code_style: Style,
    pub reveal_cursor_style: Style,

    // Empty conversation
    pub placeholder_style: Style,
    pub suggestion_key_style: Style,
    pub suggestion_text_style: Style,

    // Status
    pub thinking_style: Style,
    pub error_style: Style,

    // Chrome
    pub title_style: Style,
    pub sidebar_style: Style,
    pub sidebar_selected_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            code_style: Style::default().fg(Color::Yellow),
            reveal_cursor_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),

            placeholder_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            suggestion_key_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            suggestion_text_style: Style::default().fg(Color::Gray),

            thinking_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            error_style: Style::default().fg(Color::White).bg(Color::Red),

            title_style: Style::default().fg(Color::Gray),
            sidebar_style: Style::default().fg(Color::Gray),
            sidebar_selected_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
