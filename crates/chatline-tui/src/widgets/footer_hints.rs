//! Footer keybinding hints.
//!
//! Format: `[Enter] send │ [Ctrl+J] newline │ [PgUp/PgDn] scroll │ [F1] help`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+J").
    pub key: String,
    /// The action description (e.g., "send").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer hints widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            hints,
            theme,
            icons,
        }
    }

    /// Hints for the chat screen.
    pub fn chat_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter", "send"),
            KeyHint::new("Ctrl+J", "newline"),
            KeyHint::new("PgUp/PgDn", "scroll"),
            KeyHint::new("F1", "help"),
            KeyHint::new("Esc", "quit"),
        ]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.icons.separator(),
                    Style::default().fg(self.theme.muted),
                ));
            }

            spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            spans.push(Span::styled(
                &hint.action,
                Style::default().fg(self.theme.subtext),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
