//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`StatusBar`] - Top status bar with endpoint and pending requests
//! - [`FooterHints`] - Bottom keybinding hints
//! - [`InputBar`] - Input field rendering
//! - [`TextInputState`] - Editable input state

mod footer_hints;
mod input_bar;
mod status_bar;
mod text_input;

pub use footer_hints::FooterHints;
pub use input_bar::InputBar;
pub use status_bar::{StatusBar, StatusBarContent};
pub use text_input::TextInputState;
