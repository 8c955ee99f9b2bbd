//! Status bar widget for the top of the TUI.
//!
//! Format: `chatline │ http://host/chat │ ● 2 waiting`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Endpoint messages are posted to.
    pub endpoint: String,
    /// Requests awaiting a reply.
    pub in_flight: usize,
    /// Whether the log is scrolled away from the newest message.
    pub scrolled_back: bool,
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget.
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            content,
            theme,
            icons,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = self.icons.separator();
        let mut spans = vec![
            Span::styled("chatline", Style::default().fg(self.theme.primary)),
            Span::styled(separator, Style::default().fg(self.theme.muted)),
            Span::styled(
                self.content.endpoint.as_str(),
                Style::default().fg(self.theme.subtext),
            ),
        ];

        if self.content.in_flight > 0 {
            spans.push(Span::styled(separator, Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(
                format!("{} {} waiting", self.icons.pending(), self.content.in_flight),
                Style::default().fg(self.theme.secondary),
            ));
        }

        if self.content.scrolled_back {
            spans.push(Span::styled(separator, Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(
                "scrolled back",
                Style::default().fg(self.theme.muted),
            ));
        }

        let line = Line::from(spans);
        let paragraph = Paragraph::new(line).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}
