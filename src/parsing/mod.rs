//! Parsing helpers for path and query parameters.

mod error;

use std::fmt;
use std::str::FromStr;

pub use error::ParseError;

/// Parse one value, naming the offending text on failure.
pub fn parse_value<T: FromStr>(text: &str) -> Result<T, ParseError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| ParseError::InvalidValue(text.to_string()))
}

/// Parse a `separator`-delimited list of values. Empty items are skipped.
///
/// ```
/// use playerweb::parsing::parse_list;
///
/// let items: Vec<usize> = parse_list("1,2,,5", ',').unwrap();
/// assert_eq!(items, vec![1, 2, 5]);
/// ```
pub fn parse_list<T: FromStr>(text: &str, separator: char) -> Result<Vec<T>, ParseError> {
    text.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_value::<T>)
        .collect()
}

/// Parse `true`/`false`/`1`/`0`.
pub fn parse_bool(text: &str) -> Result<bool, ParseError> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::InvalidValue(text.to_string())),
    }
}

/// A window of `count` items starting at `offset`, written `offset:count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub offset: usize,
    pub count: usize,
}

impl Range {
    pub fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    /// The index range this window covers within a list of `len` items.
    pub fn clamp(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = start.saturating_add(self.count).min(len);
        start..end
    }
}

impl FromStr for Range {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offset, count) = s
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidRange(s.to_string()))?;

        let offset = offset.trim().parse().map_err(|_| ParseError::InvalidRange(s.to_string()))?;
        let count = count.trim().parse().map_err(|_| ParseError::InvalidRange(s.to_string()))?;
        Ok(Range { offset, count })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.offset, self.count)
    }
}
