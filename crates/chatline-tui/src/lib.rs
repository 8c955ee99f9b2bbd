//! chatline-tui: Terminal UI for the chatline chat client
//!
//! This crate provides the front end for chatline, including:
//! - The chat screen (conversation pane, input bar, status bar)
//! - Key and mouse event plumbing
//! - Request dispatch onto tokio tasks
//! - Headless mode for end-to-end testing

mod app;
mod conversation;
mod dispatch;
mod event;
pub mod headless;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod widgets;

pub use app::{App, UiConfig};
pub use chatline_engine;
pub use dispatch::{spawn_request, ChatReply, Dispatcher};
pub use event::{key_to_action, mouse_to_action, Action, Event, EventHandler};
pub use theme::{IconMode, IconSet};

use chatline_engine::{ChatClient, ClientError, Config, ConfigError};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tokio::sync::mpsc;
use tracing::info;

/// Errors that prevent a session from starting.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot create chat client: {0}")]
    Client(#[from] ClientError),
}

/// Everything one run of the front end owns.
pub(crate) struct Session {
    pub(crate) app: App,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) replies: mpsc::UnboundedReceiver<ChatReply>,
}

pub(crate) fn new_session(config: &Config, ui: UiConfig) -> Result<Session, SessionError> {
    let endpoint = config.endpoint()?;
    let client = ChatClient::new(endpoint.as_str())?;
    let app = App::new(config.controller_options(), endpoint.as_str(), ui);
    let (dispatcher, replies) = Dispatcher::new(client);
    Ok(Session {
        app,
        dispatcher,
        replies,
    })
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(config: &Config, ui: UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Fail on a bad endpoint before touching the terminal
    let session = new_session(config, ui)?;
    info!(endpoint = %session.app.endpoint, "Starting chat session");

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 4 Hz tick rate
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, session, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: Session,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let Session {
        mut app,
        mut dispatcher,
        mut replies,
    } = session;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::render_app(&app, area, frame.buffer_mut());
        })?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = events.next() => {
                let action = match event {
                    Some(Event::Key(key)) => key_to_action(key),
                    Some(Event::Mouse(mouse)) => mouse_to_action(mouse),
                    Some(Event::Tick | Event::Resize(_, _)) => Action::None,
                    None => break,
                };
                if let Some(pending) = app.handle_action(action) {
                    dispatcher.dispatch(pending);
                }
            }
            Some(reply) = replies.recv() => {
                app.apply_reply(reply);
            }
        }
    }

    dispatcher.abort_all();
    info!("Chat session ended");
    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
