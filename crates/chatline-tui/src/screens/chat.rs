//! Chat screen: status bar, conversation, input and key hints.

use crate::app::App;
use crate::conversation::{input_placeholder, ConversationPane};
use crate::screens::Screen;
use crate::widgets::{FooterHints, InputBar, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

/// Most input rows shown before the input bar scrolls.
const MAX_INPUT_ROWS: u16 = 4;

/// The chat screen.
pub struct ChatScreen;

impl ChatScreen {
    #[allow(clippy::cast_possible_truncation)]
    fn input_height(app: &App) -> u16 {
        let rows = app.input_state.content().split('\n').count();
        (rows.min(MAX_INPUT_ROWS as usize) as u16).max(1) + 2
    }
}

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(Self::input_height(app)),
                Constraint::Length(1),
            ])
            .split(area);

        let status = app.status();
        StatusBar::new(&status, &app.theme, &app.icons).render(chunks[0], buf);

        ConversationPane::new(app.controller.log(), &app.theme, &app.icons, &app.borders)
            .render(chunks[1], buf);

        InputBar::new(&app.input_state, &app.theme, &app.borders)
            .placeholder(input_placeholder(app.in_flight()))
            .focused(!app.show_help)
            .render(chunks[2], buf);

        let hints = FooterHints::chat_hints();
        FooterHints::new(&hints, &app.theme, &app.icons).render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_screen_to_string};

    fn line_of(out: &str, needle: &str) -> usize {
        out.lines()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not rendered in:\n{out}"))
    }

    #[test]
    fn test_empty_chat_screen() {
        let app = create_test_app();
        let out = render_screen_to_string(&ChatScreen, &app);

        assert!(out.starts_with("chatline | http://127.0.0.1:5000/chat"));
        assert!(out.contains("No messages yet."));
        assert!(out.contains("> █Type a message and press Enter..."));
        assert!(out.ends_with("[F1] help | [Esc] quit"));
    }

    #[test]
    fn test_pending_send_layout() {
        let mut app = create_test_app();
        for c in "Hello".chars() {
            app.handle_action(Action::Insert(c));
        }
        app.handle_action(Action::Send);

        let out = render_screen_to_string(&ChatScreen, &app);
        assert!(out.contains("* 1 waiting"));
        assert!(out.contains("Waiting for a reply, keep typing if you like..."));
        let user = line_of(&out, "you: Hello");
        let thinking = line_of(&out, "bot: Thinking...");
        assert_eq!(thinking, user + 1);
    }

    #[test]
    fn test_multiline_input_grows() {
        let mut app = create_test_app();
        assert_eq!(ChatScreen::input_height(&app), 3);

        app.input_state.insert_str("a\nb\nc");
        assert_eq!(ChatScreen::input_height(&app), 5);

        app.input_state.insert_str("\nd\ne\nf");
        assert_eq!(ChatScreen::input_height(&app), 6);
    }
}
