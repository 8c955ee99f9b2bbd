//! chatline CLI: terminal client for a `/chat` backend

use chatline_engine::{ChatClient, ChatController, Config, Message, RequestState};
use chatline_tui::{IconSet, UiConfig};
use clap::{ArgAction, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Chat with a `/chat` backend from the terminal
#[derive(Parser)]
#[command(name = "chatline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: .chatline/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    url: Option<String>,

    /// Do not show "Thinking..." while waiting for a reply
    #[arg(long, global = true)]
    no_thinking: bool,

    /// Drop replies to requests superseded by a newer send
    #[arg(long, global = true)]
    discard_stale: bool,

    /// Log file for the TUI (default: chatline.log in the temp directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Send one message and print the conversation
    Send {
        /// Message text
        message: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => fail(&e),
    };

    match &cli.command {
        None | Some(Commands::Tui) => {
            let log_path = cli
                .log_file
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join("chatline.log"));
            if let Err(e) = init_file_logging(cli.verbose, &log_path) {
                fail(&format!("cannot open log file {}: {e}", log_path.display()));
            }
            if let Err(e) = rt.block_on(chatline_tui::run_tui(&config, UiConfig::from_env())) {
                fail(&e);
            }
        }
        Some(Commands::Send { message, json }) => {
            init_stderr_logging(cli.verbose);
            match rt.block_on(cmd_send(&config, message, *json)) {
                Ok(RequestState::Errored) => std::process::exit(1),
                Ok(_) => {}
                Err(e) => fail(&e),
            }
        }
    }
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

/// Load the config file and apply command-line overrides.
///
/// An explicit `--config` must exist; the default location may be absent.
fn load_config(cli: &Cli) -> Result<Config, chatline_engine::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.url {
        config.server_url.clone_from(url);
    }
    if cli.no_thinking {
        config.show_thinking_indicator = false;
    }
    if cli.discard_stale {
        config.discard_stale_replies = true;
    }
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Log to a file so output never lands on the alternate screen.
fn init_file_logging(verbosity: u8, path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    Ok(())
}

fn init_stderr_logging(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run one send/reply cycle and print the resulting conversation.
async fn cmd_send(
    config: &Config,
    message: &str,
    json: bool,
) -> Result<RequestState, Box<dyn std::error::Error>> {
    let endpoint = config.endpoint()?;
    let client = ChatClient::new(endpoint.as_str())?;
    let mut controller = ChatController::new(config.controller_options());

    let mut input = message.to_string();
    let pending = controller.on_send(&mut input);
    debug!(seq = pending.seq, %endpoint, "Sending message");

    let outcome = client.send(&pending.message).await;
    let state = controller.resolve(pending, outcome);

    let messages = controller.log().messages();
    if json {
        println!("{}", serde_json::to_string_pretty(messages)?);
    } else {
        let icons = IconSet::new(UiConfig::from_env().icon_mode);
        for line in format_log(messages, &icons) {
            println!("{line}");
        }
    }

    Ok(state)
}

/// One labeled line per message; errors carry no label.
fn format_log(messages: &[Message], icons: &IconSet) -> Vec<String> {
    messages
        .iter()
        .map(|m| {
            if m.is_error() {
                m.text.clone()
            } else {
                format!("{} {}", icons.author_label(m.author), m.text)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatline_engine::{ChatResponse, ClientError, ControllerOptions, ERROR_REPLY};
    use chatline_tui::IconMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = parse(&["chatline"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_send_with_global_flags() {
        let cli = parse(&[
            "chatline",
            "send",
            "Hello",
            "--json",
            "--url",
            "http://example.com:8000",
            "--no-thinking",
            "-vv",
        ]);
        match &cli.command {
            Some(Commands::Send { message, json }) => {
                assert_eq!(message, "Hello");
                assert!(*json);
            }
            _ => panic!("expected send"),
        }
        assert_eq!(cli.verbose, 2);

        let mut config = Config::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.server_url, "http://example.com:8000");
        assert!(!config.show_thinking_indicator);
        assert!(!config.discard_stale_replies);
    }

    #[test]
    fn test_overrides_leave_config_alone_by_default() {
        let cli = parse(&["chatline", "tui"]);
        let mut config = Config::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_discard_stale_flag() {
        let cli = parse(&["chatline", "--discard-stale"]);
        let mut config = Config::default();
        apply_overrides(&mut config, &cli);
        assert!(config.discard_stale_replies);
    }

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "debug");
        assert_eq!(level_for(5), "trace");
    }

    #[test]
    fn test_format_log_labels() {
        let mut controller = ChatController::new(ControllerOptions::default());
        let mut input = "Hello".to_string();
        let pending = controller.on_send(&mut input);
        controller.resolve(
            pending,
            Ok(ChatResponse::from_value(
                serde_json::json!({ "response": "Hi there!" }),
            )),
        );

        let lines = format_log(controller.log().messages(), &IconSet::new(IconMode::Emoji));
        assert_eq!(lines, vec!["😊: Hello", "🤖: Hi there!"]);
    }

    #[test]
    fn test_format_log_error_has_no_label() {
        let mut controller = ChatController::new(ControllerOptions::default());
        let mut input = "Hello".to_string();
        let pending = controller.on_send(&mut input);
        controller.resolve(pending, Err(ClientError::NullBody));

        let lines = format_log(controller.log().messages(), &IconSet::new(IconMode::Ascii));
        assert_eq!(lines, vec!["you: Hello".to_string(), ERROR_REPLY.to_string()]);
    }
}
