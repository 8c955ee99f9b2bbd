//! Input field handle read by the controller.

/// A text field the controller can read and clear.
pub trait InputField {
    /// Current text of the field.
    fn value(&self) -> &str;

    /// Reset the field to empty.
    fn clear(&mut self);
}

impl InputField for String {
    fn value(&self) -> &str {
        self.as_str()
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}
