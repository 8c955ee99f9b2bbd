//! Conversation pane widget.
//!
//! Renders the messages up to the log's scroll offset. When they do not fit,
//! the newest visible lines win, so a fully scrolled log always shows its last
//! message.

use chatline_engine::{Author, Message, MessageKind, MessageLog};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::text::wrap_text;
use crate::theme::{BorderSet, IconSet, Theme};

/// Conversation pane widget.
///
/// ```text
/// ╭ Conversation ────────────────────────╮
/// │😊: I want to book an appointment     │
/// │🤖: Sure, which court is your case in?│
/// │😊: Family court                      │
/// │🤖: Thinking...                       │
/// ╰──────────────────────────────────────╯
/// ```
pub struct ConversationPane<'a> {
    log: &'a MessageLog,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
}

impl<'a> ConversationPane<'a> {
    /// Create a new conversation pane.
    pub fn new(
        log: &'a MessageLog,
        theme: &'a Theme,
        icons: &'a IconSet,
        borders: &'a BorderSet,
    ) -> Self {
        Self {
            log,
            theme,
            icons,
            borders,
        }
    }

    fn text_style(&self, message: &Message) -> Style {
        match message.kind {
            MessageKind::Text => Style::default().fg(self.theme.text),
            MessageKind::Placeholder => Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::ITALIC),
            MessageKind::Error => Style::default().fg(self.theme.error),
        }
    }

    fn label_style(&self, author: Author) -> Style {
        let color = match author {
            Author::User => self.theme.user,
            Author::Bot => self.theme.bot,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Lines for one message, wrapped to `width`.
    ///
    /// The error notice carries no author label.
    fn message_lines(&self, message: &Message, width: usize) -> Vec<Line<'a>> {
        let label = if message.is_error() {
            None
        } else {
            Some(self.icons.author_label(message.author))
        };
        let indent = label.map_or(0, |l| l.width() + 1);
        let text_width = width.saturating_sub(indent).max(1);
        let style = self.text_style(message);

        let mut lines = Vec::new();
        for raw_line in message.text.split('\n') {
            let wrapped = if raw_line.is_empty() {
                vec![String::new()]
            } else {
                wrap_text(raw_line, text_width)
            };

            for segment in wrapped {
                let mut spans = Vec::with_capacity(2);
                match label {
                    Some(label) if lines.is_empty() => {
                        spans.push(Span::styled(label, self.label_style(message.author)));
                        spans.push(Span::raw(" "));
                    }
                    _ => spans.push(Span::raw(" ".repeat(indent))),
                }
                spans.push(Span::styled(segment, style));
                lines.push(Line::from(spans));
            }
        }
        lines
    }
}

impl Widget for ConversationPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_set(self.borders.normal())
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.log.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No messages yet.",
                Style::default().fg(self.theme.muted),
            )))
            .render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let lines: Vec<Line<'_>> = self
            .log
            .visible()
            .iter()
            .flat_map(|m| self.message_lines(m, width))
            .collect();

        // Keep the newest lines when the content overflows.
        let height = inner.height as usize;
        let start = lines.len().saturating_sub(height);
        let shown: Vec<Line<'_>> = lines.into_iter().skip(start).collect();

        Paragraph::new(shown).render(inner, buf);
    }
}
