//! chatline-engine: Headless core of the chatline chat client
//!
//! This crate provides everything that does not touch a terminal:
//! - Message model and the scrollable message log
//! - The chat controller (send, thinking entry, reply/error rendering)
//! - HTTP client for the chat backend
//! - Configuration

pub mod client;
pub mod config;
pub mod controller;
pub mod input;
pub mod message;
pub mod message_log;

// Re-export commonly used types
pub use client::{ChatClient, ChatRequest, ChatResponse, ClientError};
pub use config::{Config, ConfigError};
pub use controller::{ChatController, ControllerOptions, PendingRequest, RequestState};
pub use input::InputField;
pub use message::{
    Author, Message, MessageId, MessageKind, ERROR_REPLY, FALLBACK_REPLY, THINKING_TEXT,
};
pub use message_log::MessageLog;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
