//! Author labels and indicators, with an ASCII fallback.

use chatline_engine::Author;

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Emoji labels, as in the web widget.
    #[default]
    Emoji,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Label printed before a message.
    pub fn author_label(&self, author: Author) -> &'static str {
        match (self.mode, author) {
            (IconMode::Emoji, Author::User) => "😊:",
            (IconMode::Emoji, Author::Bot) => "🤖:",
            (IconMode::Ascii, Author::User) => "you:",
            (IconMode::Ascii, Author::Bot) => "bot:",
        }
    }

    /// Marker shown while requests are in flight.
    pub fn pending(&self) -> &'static str {
        match self.mode {
            IconMode::Emoji => "●",
            IconMode::Ascii => "*",
        }
    }

    /// Separator between status bar segments.
    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Emoji => " │ ",
            IconMode::Ascii => " | ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_labels() {
        let icons = IconSet::new(IconMode::Emoji);
        assert_eq!(icons.author_label(Author::User), "😊:");
        assert_eq!(icons.author_label(Author::Bot), "🤖:");
    }

    #[test]
    fn test_ascii_labels_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        for author in [Author::User, Author::Bot] {
            assert!(icons.author_label(author).is_ascii());
        }
        assert!(icons.pending().is_ascii());
        assert!(icons.separator().is_ascii());
    }
}
