//! Placeholder text for the input area.

/// Get placeholder text for the input area.
///
/// Sending stays possible while replies are pending, so the text only changes
/// its hint.
#[must_use]
pub fn input_placeholder(in_flight: usize) -> &'static str {
    match in_flight {
        0 => "Type a message and press Enter...",
        1 => "Waiting for a reply, keep typing if you like...",
        _ => "Waiting for replies, keep typing if you like...",
    }
}
