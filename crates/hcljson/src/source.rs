//! verbatim source text of expressions that can not be converted into a value
use crate::comments::strip_comments;
use std::ops::Range;

/// Read-only view on the document a syntax tree was parsed from
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'s> {
    bytes: &'s [u8],
}

impl<'s> SourceText<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            bytes: source.as_bytes(),
        }
    }

    /// Returns the normalized text of the byte range `[start, end)`
    ///
    /// Comments are removed and every run of whitespace (including newlines) becomes a single space.
    /// Returns `None` when the range does not lie within the document.
    pub fn extract(&self, range: Range<usize>) -> Option<String> {
        let Some(bytes) = self.bytes.get(range.clone()) else {
            tracing::debug!(?range, len = self.bytes.len(), "range outside of source");
            return None;
        };

        Some(normalize(bytes))
    }
}

/// Strips comments and collapses whitespace
pub fn normalize(bytes: &[u8]) -> String {
    let stripped = strip_comments(bytes);
    String::from_utf8_lossy(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extract_range() {
        let source = SourceText::new("a = foo(\n  1, # one\n  2\n)\n");
        assert_eq!(source.extract(4..25).as_deref(), Some("foo( 1, 2 )"));
    }

    #[test]
    fn range_out_of_bounds() {
        let source = SourceText::new("a = 1");
        assert_eq!(source.extract(4..10), None);
    }

    #[test]
    fn empty_range() {
        let source = SourceText::new("a = 1");
        assert_eq!(source.extract(2..2).as_deref(), Some(""));
    }
}
