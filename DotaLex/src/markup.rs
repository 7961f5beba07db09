//! Markup cleanup shared by string tables and tooltip resolution

use regex::Regex;
use std::borrow::Cow;

lazy_static::lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("tag pattern");
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br ?/?>").expect("line break pattern");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern");
}

/// The two-character escape upstream templates use for a line break.
pub const ESCAPED_NEWLINE: &str = "\\n";

/// Remove every `<...>` tag.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    TAG.replace_all(text, "")
}

/// Turn `<br>`, `<br/>` and `<br />` (any case) into real newlines.
pub fn line_breaks_to_newlines(text: &str) -> Cow<'_, str> {
    LINE_BREAK.replace_all(text, "\n")
}

/// Turn the literal `\n` escape into a real newline.
pub fn unescape_newlines(text: &str) -> String {
    text.replace(ESCAPED_NEWLINE, "\n")
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<font color='#fff'>Hot</font> take"), "Hot take");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(line_breaks_to_newlines("a<br>b<BR/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(" \n "), "");
        assert_eq!(unescape_newlines(r"one\ntwo"), "one\ntwo");
    }
}
