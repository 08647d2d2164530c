//! comment removal for re-serialized source text
//!
//! Runs in two passes:
//! 1. [strip_block_comments] removes `/* ... */` over the whole text. Newlines outside of comments are kept so that
//!    the line structure survives for the second pass.
//! 2. [strip_line_comments] cuts every line at its first `#` or `//` and joins the lines with a single space.
//!
//! Both passes track quoted strings (`"` or `'`) and never treat comment markers inside of them as comments.
//! Unterminated strings or block comments are not an error, the passes just keep their state until the end of the
//! input.

/// Removes all comments from `text`
pub fn strip_comments(text: &[u8]) -> Vec<u8> {
    strip_line_comments(&strip_block_comments(text))
}

/// Quoted string tracking shared by both passes
#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum Quote {
    #[default]
    None,
    In(u8),
    /// directly after a backslash inside a string
    Escaped(u8),
}

impl Quote {
    /// Advances the string state by one byte
    fn advance(self, byte: u8) -> Self {
        match (self, byte) {
            (Quote::None, b'"' | b'\'') => Quote::In(byte),
            (Quote::None, _) => Quote::None,
            (Quote::In(quote), b'\\') => Quote::Escaped(quote),
            (Quote::In(quote), _) if quote == byte => Quote::None,
            (Quote::In(quote), _) | (Quote::Escaped(quote), _) => Quote::In(quote),
        }
    }

    fn is_outside(self) -> bool {
        self == Quote::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockState {
    Normal,
    /// inside `# ...` or `// ...`, copied verbatim so the line pass can drop it
    LineComment,
    BlockComment,
}

/// First pass: drops `/* ... */` and keeps everything else byte for byte
///
/// Line comments are copied through without interpreting them, a `/*` or a quote in a line comment has no effect.
pub fn strip_block_comments(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut state = BlockState::Normal;
    let mut quote = Quote::None;

    let mut i = 0;
    while i < text.len() {
        let byte = text[i];
        let next = text.get(i + 1).copied();

        match state {
            BlockState::BlockComment => {
                if byte == b'*' && next == Some(b'/') {
                    state = BlockState::Normal;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            BlockState::LineComment => {
                if byte == b'\n' {
                    state = BlockState::Normal;
                }
            }
            BlockState::Normal => {
                if byte == b'\n' {
                    // quoted strings never span lines
                    quote = Quote::None;
                } else {
                    quote = quote.advance(byte);
                }

                if quote.is_outside() {
                    if byte == b'/' && next == Some(b'*') {
                        state = BlockState::BlockComment;
                        i += 2;
                        continue;
                    }

                    if byte == b'#' || (byte == b'/' && next == Some(b'/')) {
                        state = BlockState::LineComment;
                    }
                }
            }
        }

        out.push(byte);
        i += 1;
    }

    if state == BlockState::BlockComment {
        tracing::trace!("unterminated block comment");
    }

    out
}

/// Second pass: cuts each line at its line comment and joins the lines with single spaces
pub fn strip_line_comments(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());

    for (index, line) in text.split(|byte| *byte == b'\n').enumerate() {
        if index > 0 {
            out.push(b' ');
        }

        let mut quote = Quote::None;
        for (i, &byte) in line.iter().enumerate() {
            quote = quote.advance(byte);

            if quote.is_outside()
                && (byte == b'#' || (byte == b'/' && line.get(i + 1) == Some(&b'/')))
            {
                break;
            }

            out.push(byte);
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip(text: &str) -> String {
        String::from_utf8(strip_comments(text.as_bytes())).unwrap()
    }

    fn normalized(text: &str) -> String {
        strip(text).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn block_comment_pass_keeps_newlines() {
        let stripped = strip_block_comments(b"a /* one\ntwo */ b\nc");
        assert_eq!(stripped, b"a  b\nc".to_vec());
    }

    #[test]
    fn line_comment_pass_joins_with_spaces() {
        let stripped = strip_line_comments(b"a # one\nb // two\nc");
        assert_eq!(stripped, b"a  b  c".to_vec());
    }

    #[test]
    fn line_and_block_comments() {
        assert_eq!(normalized("\"a\" # comment\n b /* c */ d"), "\"a\" b d");
    }

    #[test]
    fn markers_inside_strings_are_inert() {
        assert_eq!(
            normalized(r#"contains(["a", "b #not a comment"], var) # This is a comment"#),
            r#"contains(["a", "b #not a comment"], var)"#
        );
        assert_eq!(
            normalized(r#"contains(["a", "b /*not a comment*/"], var) /* This is a comment */"#),
            r#"contains(["a", "b /*not a comment*/"], var)"#
        );
        assert_eq!(normalized(r#"f("//b", '#c')"#), r#"f("//b", '#c')"#);
    }

    #[test]
    fn escaped_quotes_stay_inside_strings() {
        assert_eq!(normalized(r##"f("a\"#b") # c"##), r##"f("a\"#b")"##);
        assert_eq!(normalized(r#"["\"c\""] // x"#), r#"["\"c\""]"#);
    }

    #[test]
    fn quotes_of_the_other_kind_do_not_close() {
        assert_eq!(normalized(r#"["'#a'"] # x"#), r#"["'#a'"]"#);
    }

    #[test]
    fn line_comments_inside_block_comment() {
        let text = "alltrue([\n  /* block comment // inline comment\n  and another // inline comment */\n  contains(val, \"a\")\n])";
        assert_eq!(normalized(text), "alltrue([ contains(val, \"a\") ])");
    }

    #[test]
    fn block_start_inside_line_comment() {
        let text = "alltrue([\n  # inline comment /* with a block\n  contains(val, \"a\")\n])";
        assert_eq!(normalized(text), "alltrue([ contains(val, \"a\") ])");
    }

    #[test]
    fn apostrophe_in_line_comment() {
        let text = "alltrue(\n  # This is a comment on it's own line\n  contains([\"a\", \"b\"], var) /* x */ // trailing\n)";
        assert_eq!(normalized(text), "alltrue( contains([\"a\", \"b\"], var) )");
    }

    #[test]
    fn unterminated_block_comment() {
        assert_eq!(normalized("a /* b\nc"), "a");
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(normalized("a \"b # c"), "a \"b # c");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(normalized("\"grüße\" /* ä */ # ö"), "\"grüße\"");
    }
}
