//! Application state and update logic for the chatline TUI.

use crate::dispatch::ChatReply;
use crate::event::Action;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::widgets::{StatusBarContent, TextInputState};
use chatline_engine::{ChatController, ControllerOptions, PendingRequest, RequestState};
use std::ffi::OsString;

/// Messages moved per scroll step.
pub const SCROLL_STEP: usize = 3;

/// Presentation settings taken from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiConfig {
    pub icon_mode: IconMode,
}

impl UiConfig {
    /// Read settings from the process environment.
    ///
    /// A non-empty `NO_COLOR` switches labels and borders to ASCII.
    pub fn from_env() -> Self {
        Self::from_no_color(std::env::var_os("NO_COLOR"))
    }

    fn from_no_color(value: Option<OsString>) -> Self {
        let icon_mode = match value {
            Some(v) if !v.is_empty() => IconMode::Ascii,
            _ => IconMode::Emoji,
        };
        Self { icon_mode }
    }
}

/// Main application state.
pub struct App {
    pub controller: ChatController,
    pub input_state: TextInputState,
    pub theme: Theme,
    pub icons: IconSet,
    pub borders: BorderSet,
    /// Endpoint shown in the status bar.
    pub endpoint: String,
    pub should_quit: bool,
    pub show_help: bool,
}

impl App {
    /// Create a new app.
    pub fn new(options: ControllerOptions, endpoint: impl Into<String>, ui: UiConfig) -> Self {
        Self {
            controller: ChatController::new(options),
            input_state: TextInputState::new(),
            theme: Theme::default(),
            icons: IconSet::new(ui.icon_mode),
            borders: BorderSet::new(ui.icon_mode),
            endpoint: endpoint.into(),
            should_quit: false,
            show_help: false,
        }
    }

    /// App with default options and ASCII labels, for rendering tests.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self::new(
            ControllerOptions::default(),
            "http://127.0.0.1:5000/chat",
            UiConfig {
                icon_mode: IconMode::Ascii,
            },
        )
    }

    /// Handle an action.
    ///
    /// Returns the request to dispatch when the action was a send.
    pub fn handle_action(&mut self, action: Action) -> Option<PendingRequest> {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return None;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return None;
            }
            Action::None => return None,
            _ => {}
        }

        // Any other key closes the help overlay
        if self.show_help {
            self.show_help = false;
            return None;
        }

        match action {
            Action::Send => return Some(self.submit()),
            Action::Newline => self.input_state.insert('\n'),
            Action::Insert(c) => self.input_state.insert(c),
            Action::Backspace => self.input_state.backspace(),
            Action::Delete => self.input_state.delete(),
            Action::Left => self.input_state.move_left(),
            Action::Right => self.input_state.move_right(),
            Action::Home => self.input_state.move_home(),
            Action::End => self.input_state.move_end(),
            Action::HistoryPrev => self.input_state.history_prev(),
            Action::HistoryNext => self.input_state.history_next(),
            Action::ScrollUp => self.controller.log_mut().scroll_up(SCROLL_STEP),
            Action::ScrollDown => self.controller.log_mut().scroll_down(SCROLL_STEP),
            Action::Quit | Action::Help | Action::None => {}
        }
        None
    }

    /// Send the current input through the controller.
    pub fn submit(&mut self) -> PendingRequest {
        self.input_state.remember();
        self.controller.on_send(&mut self.input_state)
    }

    /// Render a finished request into the log.
    pub fn apply_reply(&mut self, reply: ChatReply) -> RequestState {
        self.controller.resolve(reply.pending, reply.outcome)
    }

    /// Requests awaiting a reply.
    pub fn in_flight(&self) -> usize {
        self.controller.in_flight()
    }

    /// Content for the status bar.
    pub fn status(&self) -> StatusBarContent {
        StatusBarContent {
            endpoint: self.endpoint.clone(),
            in_flight: self.in_flight(),
            scrolled_back: !self.controller.log().is_at_bottom(),
        }
    }
}
