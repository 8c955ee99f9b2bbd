//! Full-width input bar widget.
//!
//! Always visible at the bottom of the screen for text entry.
//! Supports multi-line input with Ctrl+J for newlines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{BorderSet, Theme};
use crate::widgets::TextInputState;

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    borders: &'a BorderSet,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            input,
            theme,
            borders,
            placeholder: "",
            focused: false,
        }
    }

    /// Set whether the input bar is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text shown while the input is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Build Lines for multi-line input display.
    /// Returns the lines to display and which line index contains the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let content = self.input.content();

        if content.is_empty() {
            let mut spans = vec![Span::raw("> ")];
            if self.focused {
                spans.push(Span::raw("█"));
            }
            spans.push(Span::styled(
                self.placeholder.to_string(),
                Style::default().fg(self.theme.muted),
            ));
            return (vec![Line::from(spans)], 0);
        }

        let text_lines: Vec<&str> = content.split('\n').collect();

        // Find which line the cursor is on
        let cursor_pos = self.input.cursor();
        let mut char_count = 0;
        let mut cursor_line = 0;
        let mut cursor_col = 0;

        for (line_idx, line) in text_lines.iter().enumerate() {
            let line_len = line.chars().count();
            if cursor_pos <= char_count + line_len {
                cursor_line = line_idx;
                cursor_col = cursor_pos - char_count;
                break;
            }
            // +1 for the newline character
            char_count += line_len + 1;
        }

        let mut lines = Vec::with_capacity(text_lines.len());

        for (line_idx, line_text) in text_lines.iter().enumerate() {
            let prefix = if line_idx == 0 { "> " } else { "  " };

            if self.focused && line_idx == cursor_line {
                let chars: Vec<char> = line_text.chars().collect();
                let before: String = chars[..cursor_col].iter().collect();
                let after: String = chars[cursor_col..].iter().collect();
                lines.push(Line::from(vec![
                    Span::raw(prefix),
                    Span::raw(before),
                    Span::raw("█"),
                    Span::raw(after),
                ]));
            } else {
                lines.push(Line::from(format!("{prefix}{line_text}")));
            }
        }

        (lines, cursor_line)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(self.borders.normal())
            .border_style(border_style);

        let inner_height = area.height.saturating_sub(2) as usize;
        let (lines, cursor_line) = self.build_input_lines();

        // Keep the cursor line visible
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(self.theme.text))
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;

    fn render(input: &TextInputState, focused: bool, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        InputBar::new(input, &theme, &borders)
            .placeholder("Type a message...")
            .focused(focused)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_input_shows_placeholder() {
        let input = TextInputState::new();
        let out = render(&input, false, 30, 3);
        assert!(out.contains("> Type a message..."));
    }

    #[test]
    fn test_cursor_drawn_at_position() {
        let mut input = TextInputState::new();
        input.insert_str("abc");
        input.move_left();
        let out = render(&input, true, 30, 3);
        assert!(out.contains("> ab█c"));
    }

    #[test]
    fn test_multiline_input_scrolls_to_cursor() {
        let mut input = TextInputState::new();
        input.insert_str("one\ntwo\nthree");
        let out = render(&input, true, 30, 3);
        assert!(out.contains("three█"));
        assert!(!out.contains("one"));
    }
}
