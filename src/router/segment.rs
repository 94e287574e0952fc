//! Zero-copy path segments.

use std::fmt;

/// A borrowed view into a request path or route pattern.
///
/// Trimming and tokenizing only move the bounds of the view; the underlying
/// string is never copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringSegment<'a> {
    data: &'a str,
}

impl<'a> StringSegment<'a> {
    /// Create a segment covering all of `data`.
    pub const fn new(data: &'a str) -> Self {
        Self { data }
    }

    /// The text covered by this segment.
    pub fn as_str(&self) -> &'a str {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Strip every leading and trailing `separator`.
    pub fn trim(&self, separator: char) -> Self {
        Self::new(self.data.trim_matches(separator))
    }

    /// Take the text up to the next `separator` and advance past it.
    ///
    /// Returns `None` once the segment is exhausted. Consecutive separators
    /// yield empty tokens; callers decide whether to skip them.
    ///
    /// ```
    /// use playerweb::router::StringSegment;
    ///
    /// let mut path = StringSegment::new("a/b");
    /// assert_eq!(path.next_token('/').unwrap().as_str(), "a");
    /// assert_eq!(path.as_str(), "b");
    /// assert_eq!(path.next_token('/').unwrap().as_str(), "b");
    /// assert!(path.next_token('/').is_none());
    /// ```
    pub fn next_token(&mut self, separator: char) -> Option<StringSegment<'a>> {
        if self.data.is_empty() {
            return None;
        }

        match self.data.find(separator) {
            Some(pos) => {
                let token = &self.data[..pos];
                self.data = &self.data[pos + separator.len_utf8()..];
                Some(Self::new(token))
            }
            None => {
                let token = self.data;
                self.data = "";
                Some(Self::new(token))
            }
        }
    }
}

impl PartialEq<str> for StringSegment<'_> {
    fn eq(&self, other: &str) -> bool {
        self.data == other
    }
}

impl PartialEq<&str> for StringSegment<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.data == *other
    }
}

impl fmt::Display for StringSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data)
    }
}
