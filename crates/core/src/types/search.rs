//! Search query validation.

use core::fmt;

/// A search query that is long enough to send to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Minimum number of characters (after trimming) before a query is sent.
    pub const MIN_CHARS: usize = 2;

    /// Trim raw input and accept it if it has at least `min_chars` characters.
    #[must_use]
    pub fn parse(input: &str, min_chars: usize) -> Option<Self> {
        let trimmed = input.trim();
        (trimmed.chars().count() >= min_chars).then(|| Self(trimmed.to_owned()))
    }

    /// Returns the query as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_rejected() {
        assert_eq!(SearchQuery::parse("a", SearchQuery::MIN_CHARS), None);
        assert_eq!(SearchQuery::parse("  a  ", SearchQuery::MIN_CHARS), None);
        assert_eq!(SearchQuery::parse("", SearchQuery::MIN_CHARS), None);
    }

    #[test]
    fn test_input_trimmed() {
        let query = SearchQuery::parse("  ab ", SearchQuery::MIN_CHARS).unwrap();
        assert_eq!(query.as_str(), "ab");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(SearchQuery::parse("é", SearchQuery::MIN_CHARS).is_none());
        assert!(SearchQuery::parse("éa", SearchQuery::MIN_CHARS).is_some());
    }
}
