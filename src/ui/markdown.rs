//! Light markdown rendering for settled assistant replies.
//!
//! Covers what chat replies typically use: bold, italic, inline code, fenced
//! code blocks, headings, list items and line breaks. Anything else falls
//! through as plain text.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    code_style: Style,
    in_code_block: bool,
    list_depth: usize,
}

impl LineBuilder {
    fn new(base: Style, code_style: Style) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            styles: vec![base],
            code_style,
            in_code_block: false,
            list_depth: 0,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn push_span(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.current.push(Span::styled(text.to_string(), style));
        }
    }

    fn flush(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn flush_if_pending(&mut self) {
        if !self.current.is_empty() {
            self.flush();
        }
    }

    fn blank_separator(&mut self) {
        let last_is_blank = self
            .lines
            .last()
            .map(|line| line.spans.is_empty())
            .unwrap_or(true);
        if !last_is_blank {
            self.lines.push(Line::default());
        }
    }

    fn text(&mut self, text: &str) {
        let style = if self.in_code_block {
            self.code_style
        } else {
            self.style()
        };
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            self.push_span(part, style);
            if parts.peek().is_some() {
                self.flush();
            }
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_if_pending();
        while self
            .lines
            .last()
            .map(|line| line.spans.is_empty())
            .unwrap_or(false)
        {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render `content` into styled lines. Wrapping is left to the caller.
pub fn render_markdown(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::new(theme.assistant_text_style, theme.code_style);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => builder.flush_if_pending(),
                Tag::Heading { .. } => {
                    builder.flush_if_pending();
                    builder.push_modifier(Modifier::BOLD);
                }
                Tag::Strong => builder.push_modifier(Modifier::BOLD),
                Tag::Emphasis => builder.push_modifier(Modifier::ITALIC),
                Tag::Strikethrough => builder.push_modifier(Modifier::CROSSED_OUT),
                Tag::CodeBlock(kind) => {
                    builder.flush_if_pending();
                    builder.blank_separator();
                    if let CodeBlockKind::Fenced(lang) = kind {
                        if !lang.is_empty() {
                            let label = format!("[{lang}]");
                            builder.push_span(&label, theme.code_style.add_modifier(Modifier::DIM));
                            builder.flush();
                        }
                    }
                    builder.in_code_block = true;
                }
                Tag::List(_) => {
                    builder.flush_if_pending();
                    builder.list_depth += 1;
                }
                Tag::Item => {
                    builder.flush_if_pending();
                    let indent = "  ".repeat(builder.list_depth.saturating_sub(1));
                    let bullet = format!("{indent}• ");
                    let style = builder.style();
                    builder.push_span(&bullet, style);
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph => {
                    builder.flush_if_pending();
                    if builder.list_depth == 0 {
                        builder.blank_separator();
                    }
                }
                TagEnd::Heading(_) => {
                    builder.pop_style();
                    builder.flush_if_pending();
                    builder.blank_separator();
                }
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => builder.pop_style(),
                TagEnd::CodeBlock => {
                    builder.in_code_block = false;
                    builder.flush_if_pending();
                    builder.blank_separator();
                }
                TagEnd::List(_) => {
                    builder.flush_if_pending();
                    builder.list_depth = builder.list_depth.saturating_sub(1);
                    if builder.list_depth == 0 {
                        builder.blank_separator();
                    }
                }
                TagEnd::Item => builder.flush_if_pending(),
                _ => {}
            },
            Event::Text(text) => builder.text(&text),
            Event::Code(code) => builder.push_span(&code, theme.code_style),
            Event::SoftBreak | Event::HardBreak => builder.flush(),
            Event::Html(html) | Event::InlineHtml(html) => builder.text(&html),
            _ => {}
        }
    }

    builder.finish()
}
