//! The message log: an ordered, append-only list of messages plus the scroll
//! position of the container that shows them.

use crate::message::{Author, Message, MessageId, MessageKind};

/// Ordered message log with scroll state.
///
/// Scroll positions are counted in messages. `scroll_offset` is the index one
/// past the last visible message, so a fully scrolled log has
/// `scroll_offset() == scroll_height()`.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
    scroll_offset: usize,
    next_id: u64,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            scroll_offset: 0,
            next_id: 1,
        }
    }

    /// All messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Look up a message by id.
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Whether a message with this id is still in the log.
    pub fn contains(&self, id: MessageId) -> bool {
        self.get(id).is_some()
    }

    /// Append a message and scroll to the bottom.
    pub fn push(&mut self, author: Author, kind: MessageKind, text: impl Into<String>) -> MessageId {
        let id = MessageId::new(self.next_id);
        self.next_id += 1;
        self.messages.push(Message::new(id, author, kind, text.into()));
        self.scroll_to_bottom();
        id
    }

    /// Remove a placeholder message.
    ///
    /// Only placeholders can leave the log; any other id is left alone and
    /// `None` is returned.
    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == id && m.is_placeholder())?;
        let removed = self.messages.remove(index);
        self.scroll_offset = self.scroll_offset.min(self.scroll_height());
        Some(removed)
    }

    /// Total scrollable height.
    pub fn scroll_height(&self) -> usize {
        self.messages.len()
    }

    /// Index one past the last visible message.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Whether the newest message is visible.
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset == self.scroll_height()
    }

    /// Scroll so the newest message is visible.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.scroll_height();
    }

    /// Scroll towards older messages. Stops with the first message still visible.
    pub fn scroll_up(&mut self, count: usize) {
        if self.messages.is_empty() {
            return;
        }
        self.scroll_offset = self.scroll_offset.saturating_sub(count).max(1);
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, count: usize) {
        self.scroll_offset = (self.scroll_offset + count).min(self.scroll_height());
    }

    /// Messages up to the current scroll position.
    pub fn visible(&self) -> &[Message] {
        &self.messages[..self.scroll_offset]
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
