//! Border sets for Unicode and ASCII fallback.
//!
//! Supports `NO_COLOR` environment variable by using ASCII borders.

use ratatui::symbols::border;

use super::icons::IconMode;

/// Border set based on icon mode (supports `NO_COLOR`/ASCII fallback).
#[derive(Debug, Clone, Default)]
pub struct BorderSet {
    mode: IconMode,
}

impl BorderSet {
    /// Create a new border set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Pane borders - rounded for Unicode, plain for ASCII.
    pub fn normal(&self) -> border::Set {
        match self.mode {
            IconMode::Emoji => border::ROUNDED,
            IconMode::Ascii => ASCII,
        }
    }
}

/// Pure ASCII border characters.
const ASCII: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_borders() {
        let set = BorderSet::new(IconMode::Ascii).normal();
        assert_eq!(set.top_left, "+");
        assert_eq!(set.horizontal_top, "-");
    }

    #[test]
    fn test_emoji_mode_uses_rounded() {
        let set = BorderSet::new(IconMode::Emoji).normal();
        assert_eq!(set.top_left, border::ROUNDED.top_left);
    }
}
