//! Headless mode for the chatline TUI.
//!
//! Runs the real event loop against a `TestBackend` instead of a terminal.
//! Actions are sent via channels and screen state is captured after each
//! render, which lets end-to-end tests drive a full send/reply cycle.

use crate::app::UiConfig;
use crate::event::Action;
use crate::screens::render_app;
use crate::theme::IconMode;
use crate::{new_session, SessionError};
use chatline_engine::Config;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Requests awaiting a reply.
    pub in_flight: usize,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Type `text` into the input, one character at a time.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| self.send_action(Action::Insert(c)))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // Timed out, or the loop has exited
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Label and border style.
    pub ui: UiConfig,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50,
            ui: UiConfig {
                icon_mode: IconMode::Ascii,
            },
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background
/// task. Fails only when `config` does not describe a usable endpoint.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_headless(&config, HeadlessConfig::default())?;
///
/// handle.type_text("Hello");
/// handle.send_action(Action::Send);
/// let state = handle.wait_for_text("bot: Hi there!", Duration::from_secs(5)).await;
///
/// handle.send_action(Action::Quit);
/// task.await??;
/// ```
pub fn run_headless(
    config: &Config,
    headless: HeadlessConfig,
) -> Result<(HeadlessHandle, JoinHandle<Result<(), String>>), SessionError> {
    let session = new_session(config, headless.ui)?;
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(session, headless, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    Ok((handle, task))
}

async fn run_headless_loop(
    session: crate::Session,
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let crate::Session {
        mut app,
        mut dispatcher,
        mut replies,
    } = session;
    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_app(&app, area, frame.buffer_mut());
        })?;

        let _ = state_tx.send(HeadlessState {
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            should_quit: app.should_quit,
            show_help: app.show_help,
            in_flight: app.in_flight(),
        });

        if app.should_quit {
            break;
        }

        tokio::select! {
            action = action_rx.recv() => match action {
                Some(action) => {
                    if let Some(pending) = app.handle_action(action) {
                        dispatcher.dispatch(pending);
                    }
                }
                // Every handle is gone
                None => break,
            },
            Some(reply) = replies.recv() => {
                app.apply_reply(reply);
            }
            () = tokio::time::sleep(tick_duration) => {}
        }
    }

    dispatcher.abort_all();
    Ok(())
}

/// Convert a terminal buffer to a string representation.
///
/// Trailing whitespace is trimmed from each row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WAIT: Duration = Duration::from_secs(5);

    fn config_for(server: &MockServer) -> Config {
        Config {
            server_url: server.uri(),
            ..Config::default()
        }
    }

    fn start(server: &MockServer) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
        run_headless(&config_for(server), HeadlessConfig::default()).unwrap()
    }

    async fn quit(handle: &mut HeadlessHandle, task: JoinHandle<Result<(), String>>) {
        handle.send_action(Action::Quit);
        let result = tokio::time::timeout(WAIT, task).await.unwrap().unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_headless_state_default() {
        let state = HeadlessState::default();
        assert!(!state.should_quit);
        assert!(!state.show_help);
        assert_eq!(state.in_flight, 0);
        assert!(state.screen_contents.is_empty());
    }

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.tick_rate_ms, 50);
        assert_eq!(config.ui.icon_mode, IconMode::Ascii);
    }

    #[test]
    fn test_buffer_to_string() {
        use ratatui::layout::Rect;
        use ratatui::style::Style;

        let area = Rect::new(0, 0, 10, 2);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 1, "World", Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_rejected() {
        let config = Config {
            server_url: "not a url".into(),
            ..Config::default()
        };
        assert!(run_headless(&config, HeadlessConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_hello_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({ "message": "Hello" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi there!" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (mut handle, task) = start(&server);
        handle.type_text("Hello");
        handle.send_action(Action::Send);

        let state = handle
            .wait_for(
                |s| s.in_flight == 0 && s.screen_contents.contains("bot: Hi there!"),
                WAIT,
            )
            .await
            .expect("reply rendered");

        let user = state.screen_contents.find("you: Hello").unwrap();
        let bot = state.screen_contents.find("bot: Hi there!").unwrap();
        assert!(user < bot);
        assert!(!state.screen_contents.contains("Thinking..."));

        quit(&mut handle, task).await;
    }

    #[tokio::test]
    async fn test_thinking_shown_until_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "Hi there!" }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let (mut handle, task) = start(&server);
        handle.type_text("Hello");
        handle.send_action(Action::Send);

        let waiting = handle
            .wait_for_text("bot: Thinking...", WAIT)
            .await
            .expect("placeholder rendered");
        assert!(waiting.screen_contents.contains("1 waiting"));

        let done = handle
            .wait_for_text("bot: Hi there!", WAIT)
            .await
            .expect("reply rendered");
        assert!(!done.screen_contents.contains("Thinking..."));

        quit(&mut handle, task).await;
    }

    #[tokio::test]
    async fn test_thinking_can_be_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "ok" }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let config = Config {
            show_thinking_indicator: false,
            ..config_for(&server)
        };
        let (mut handle, task) = run_headless(&config, HeadlessConfig::default()).unwrap();
        handle.type_text("Hello");
        handle.send_action(Action::Send);

        let waiting = handle
            .wait_for(|s| s.in_flight == 1, WAIT)
            .await
            .expect("request in flight");
        assert!(!waiting.screen_contents.contains("Thinking..."));

        handle.wait_for_text("bot: ok", WAIT).await.expect("reply rendered");
        quit(&mut handle, task).await;
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "" })),
            )
            .mount(&server)
            .await;

        let (mut handle, task) = start(&server);
        handle.type_text("Hello");
        handle.send_action(Action::Send);

        handle
            .wait_for_text("bot: Sorry, something went wrong!", WAIT)
            .await
            .expect("fallback rendered");

        quit(&mut handle, task).await;
    }

    #[tokio::test]
    async fn test_undecodable_reply_shows_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let (mut handle, task) = start(&server);
        handle.type_text("Hello");
        handle.send_action(Action::Send);

        let state = handle
            .wait_for_text("Sorry, there was an issue processing your request.", WAIT)
            .await
            .expect("error rendered");
        assert!(!state.screen_contents.contains("bot: Sorry"));
        assert_eq!(state.in_flight, 0);

        quit(&mut handle, task).await;
    }

    #[tokio::test]
    async fn test_help_overlay_and_quit() {
        let server = MockServer::start().await;
        let (mut handle, task) = start(&server);

        handle.send_action(Action::Help);
        let state = handle
            .wait_for(|s| s.show_help, WAIT)
            .await
            .expect("help shown");
        assert!(state.screen_contents.contains("Toggle this help"));

        // First quit closes help, second quits
        handle.send_action(Action::Quit);
        handle.wait_for(|s| !s.show_help, WAIT).await.expect("help closed");
        assert!(!handle.has_quit());

        quit(&mut handle, task).await;
    }
}
