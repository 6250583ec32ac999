//! Numeric values that remember the text they were read from.

use std::fmt;
use std::str::FromStr;

/// A parsed number together with its source text.
///
/// The value is checked at read time; output writes `text` unchanged so that
/// `1000.0` stays `1000.0` rather than becoming `1000`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading<T> {
    pub value: T,
    pub text: String,
}

impl<T: FromStr> Reading<T> {
    /// Parse `text` (surrounding whitespace removed) and keep it alongside the value.
    pub fn parse(text: &str) -> Result<Self, T::Err> {
        let text = text.trim();
        Ok(Self {
            value: text.parse()?,
            text: text.to_string(),
        })
    }
}

impl<T: fmt::Display> From<T> for Reading<T> {
    fn from(value: T) -> Self {
        Self {
            text: value.to_string(),
            value,
        }
    }
}

impl<T: PartialEq> PartialEq<T> for Reading<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

impl<T> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
