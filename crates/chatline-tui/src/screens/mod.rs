//! Screen definitions for the chatline TUI.

pub mod chat;

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the chat screen and, when open, the help overlay on top.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    chat::ChatScreen.render(app, area, buf);
    if app.show_help {
        render_help_overlay(app, area, buf);
    }
}

const HELP_TEXT: &str = r"
  Enter             Send message
  Ctrl+J            New line
  Left/Right        Move cursor
  Home/End          Start/end of input
  Up/Down           Input history
  PgUp/PgDn, wheel  Scroll conversation
  F1                Toggle this help
  Esc / Ctrl+C      Quit

  [Press any key to close]
";

/// Render the help overlay.
pub fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let width = 50.min(area.width.saturating_sub(4));
    let height = 14.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(app.theme.primary))
        .borders(Borders::ALL)
        .border_set(app.borders.normal())
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.surface));

    Paragraph::new(HELP_TEXT)
        .block(block)
        .style(Style::default().fg(app.theme.text))
        .render(overlay_area, buf);
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
