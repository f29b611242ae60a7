use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::constants::{EMPTY_STATE_HEADLINE, SUGGESTED_PROMPTS};
use crate::core::controller::ConversationController;
use crate::core::message::Role;
use crate::core::reveal::{revealed_prefix, Revealer};
use crate::ui::app::ChatApp;
use crate::ui::markdown::render_markdown;
use crate::ui::theme::Theme;

const SIDEBAR_WIDTH: u16 = 28;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;
/// Sessions listed in the collapsed rail.
const COLLAPSED_RAIL_SESSIONS: usize = 8;
const THINKING_TEXT: &str = "Thinking...";
const REVEAL_CURSOR: &str = "▌";

/// Transcript lines for the current session, before wrapping.
///
/// An empty conversation shows the headline and the suggested prompts. An
/// assistant message that is still revealing shows only its revealed prefix,
/// as plain text, followed by a cursor; settled replies get markdown.
pub fn build_transcript_lines(
    controller: &ConversationController,
    revealer: &Revealer,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let messages = controller.current_messages();
    let mut lines = Vec::new();

    if messages.is_empty() {
        lines.push(Line::from(Span::styled(
            EMPTY_STATE_HEADLINE,
            theme.placeholder_style,
        )));
        lines.push(Line::default());
        for (index, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("F{}  ", index + 1), theme.suggestion_key_style),
                Span::styled(*prompt, theme.suggestion_text_style),
            ]));
        }
        lines.push(Line::default());
    }

    for message in messages {
        match message.role {
            Role::User => {
                for (index, text) in message.content.split('\n').enumerate() {
                    let prefix = if index == 0 { "You: " } else { "     " };
                    lines.push(Line::from(vec![
                        Span::styled(prefix, theme.user_prefix_style),
                        Span::styled(text.to_string(), theme.user_text_style),
                    ]));
                }
            }
            Role::Assistant if message.revealing => {
                let shown = revealer.shown(message.id).unwrap_or(0);
                let visible = revealed_prefix(&message.content, shown);
                let mut parts = visible.split('\n').peekable();
                while let Some(text) = parts.next() {
                    let mut spans = vec![Span::styled(
                        text.to_string(),
                        theme.assistant_text_style,
                    )];
                    if parts.peek().is_none() {
                        spans.push(Span::styled(REVEAL_CURSOR, theme.reveal_cursor_style));
                    }
                    lines.push(Line::from(spans));
                }
            }
            Role::Assistant => {
                let rendered = render_markdown(&message.content, theme);
                if rendered.is_empty() {
                    lines.push(Line::default());
                }
                lines.extend(rendered);
            }
        }
        lines.push(Line::default());
    }

    if controller.is_in_flight() {
        lines.push(Line::from(Span::styled(THINKING_TEXT, theme.thinking_style)));
    } else {
        while lines.last().is_some_and(|line| line.spans.is_empty()) {
            lines.pop();
        }
    }
    lines
}

/// Sidebar rows: the new-chat entry followed by sessions, newest first.
/// Returns the rows and the index of the selected one.
pub fn build_sidebar_items(
    controller: &ConversationController,
    collapsed: bool,
    width: u16,
    theme: &Theme,
) -> (Vec<ListItem<'static>>, Option<usize>) {
    let current = controller.current_session_id();
    let sessions = controller.sessions();
    let mut items = Vec::with_capacity(sessions.len() + 1);
    let mut selected = None;

    if collapsed {
        items.push(ListItem::new(Line::from(Span::styled("+", theme.sidebar_style))));
        for (index, session) in sessions.iter().take(COLLAPSED_RAIL_SESSIONS).enumerate() {
            let initial: String = session.name.chars().take(1).collect();
            let style = if Some(session.id) == current {
                selected = Some(index + 1);
                theme.sidebar_selected_style
            } else {
                theme.sidebar_style
            };
            items.push(ListItem::new(Line::from(Span::styled(initial, style))));
        }
        return (items, selected);
    }

    let usable = usize::from(width.saturating_sub(2));
    items.push(ListItem::new(Line::from(Span::styled(
        truncate_to_width("+ New chat (Ctrl+N)", usable),
        theme.title_style,
    ))));
    for (index, session) in sessions.iter().enumerate() {
        let style = if Some(session.id) == current {
            selected = Some(index + 1);
            theme.sidebar_selected_style
        } else {
            theme.sidebar_style
        };
        items.push(ListItem::new(Line::from(Span::styled(
            truncate_to_width(&session.name, usable),
            style,
        ))));
    }
    (items, selected)
}

/// Clip `text` to `max_width` terminal columns.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Rows `lines` occupy once wrapped to `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let total: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(total).unwrap_or(u16::MAX)
}

pub fn ui(f: &mut Frame, app: &ChatApp) {
    let sidebar_width = if app.sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(10)])
        .split(f.area());

    draw_sidebar(f, app, columns[0]);
    draw_conversation(f, app, columns[1]);
}

fn draw_sidebar(f: &mut Frame, app: &ChatApp, area: Rect) {
    let (items, selected) =
        build_sidebar_items(&app.controller, app.sidebar_collapsed, area.width, &app.theme);
    let title = if app.sidebar_collapsed { "" } else { "Chats" };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::RIGHT)
            .title(Span::styled(title, app.theme.title_style))
            .border_style(app.theme.input_border_style),
    );
    let mut state = ratatui::widgets::ListState::default();
    state.select(selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_conversation(f: &mut Frame, app: &ChatApp, area: Rect) {
    let error = app.controller.error();
    let error_height = if error.is_some() { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(error_height),
            Constraint::Length(3),
        ])
        .split(area);

    let lines = build_transcript_lines(&app.controller, &app.revealer, &app.theme);
    let content_height = wrapped_height(&lines, rows[0].width);
    let max_offset = content_height.saturating_sub(rows[0].height);
    let offset = max_offset.saturating_sub(app.scroll_from_bottom);
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(transcript, rows[0]);

    if let Some(message) = error {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {message} "),
                app.theme.error_style,
            ))),
            rows[1],
        );
    }

    let title = if app.controller.is_in_flight() {
        "Waiting for reply..."
    } else {
        "Type a message (Enter to send, Esc to quit)"
    };
    let mut input = app.input.clone();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.input_border_style)
            .title(Span::styled(title, app.theme.input_title_style)),
    );
    if app.controller.is_in_flight() {
        input.set_cursor_style(Style::default());
    }
    f.render_widget(&input, rows[2]);
}
