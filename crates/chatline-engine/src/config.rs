//! Configuration types for chatline.
//!
//! The configuration is a small JSON document. Every field has a default, so
//! an empty object (or a missing file) is a valid configuration.

use crate::controller::ControllerOptions;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding chatline state, relative to the working directory.
pub const CONFIG_DIR: &str = ".chatline";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration for chatline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the chat backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path of the chat route, resolved against `server_url`.
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Show a "Thinking..." entry while waiting for a reply.
    #[serde(default = "default_show_thinking_indicator")]
    pub show_thinking_indicator: bool,

    /// Ignore replies to requests superseded by a newer send.
    #[serde(default)]
    pub discard_stale_replies: bool,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_chat_path() -> String {
    "/chat".into()
}

fn default_show_thinking_indicator() -> bool {
    true
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        Path::new(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let base = Url::parse(&self.server_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.server_url.clone(),
            reason: e.to_string(),
        })?;
        base.join(&self.chat_path)
            .map_err(|e| ConfigError::InvalidUrl {
                url: self.chat_path.clone(),
                reason: e.to_string(),
            })
    }

    /// Controller switches derived from this configuration.
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            show_thinking_indicator: self.show_thinking_indicator,
            discard_stale_replies: self.discard_stale_replies,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            chat_path: default_chat_path(),
            show_thinking_indicator: default_show_thinking_indicator(),
            discard_stale_replies: false,
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Server URL or chat path does not form a valid URL.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}
