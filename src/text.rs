// Text coercion for map arguments
//
// Map lookups accept anything that may or may not be text. Non-text input is a
// guaranteed miss for queries and an invalid argument for writes.

use std::borrow::Cow;

/// A value that may be usable as a map key or value
pub trait AsText {
    /// Returns the text form, or None when the value is not text (or absent)
    fn as_text(&self) -> Option<&str>;
}

impl AsText for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsText for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl AsText for Cow<'_, str> {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

/// Raw bytes are text only when they are valid UTF-8
impl AsText for [u8] {
    fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(self).ok()
    }
}

impl AsText for Vec<u8> {
    fn as_text(&self) -> Option<&str> {
        self.as_slice().as_text()
    }
}

/// `None` stands in for a null argument
impl<T: AsText + ?Sized> AsText for Option<&T> {
    fn as_text(&self) -> Option<&str> {
        self.and_then(|inner| inner.as_text())
    }
}

impl AsText for Option<String> {
    fn as_text(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl<T: AsText + ?Sized> AsText for &T {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}
