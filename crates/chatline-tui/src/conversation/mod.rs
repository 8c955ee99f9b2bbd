//! Conversation pane module.
//!
//! The conversation pane is the log container: it shows the message log,
//! anchored at the log's scroll offset, above the input bar.

mod placeholder;
mod widget;

pub use placeholder::input_placeholder;
pub use widget::ConversationPane;
