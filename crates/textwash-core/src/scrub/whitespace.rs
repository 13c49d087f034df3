//! Whitespace normalization that keeps the line structure
//!
//! Within each line: leading indentation is kept, interior runs of spaces
//! and tabs collapse to one space, trailing spaces and tabs are dropped.
//! Line terminators (`\n` or `\r\n`) are written back exactly as found.

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid whitespace pattern"));

const INDENT: &[char] = &[' ', '\t'];

/// Split a line into its content and terminator
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Normalize one line's content (without terminator)
fn normalize_line(content: &str) -> String {
    let rest = content.trim_start_matches(INDENT);
    let leading = &content[..content.len() - rest.len()];
    let collapsed = INLINE_WHITESPACE.replace_all(rest, " ");

    let mut line = String::with_capacity(content.len());
    line.push_str(leading);
    line.push_str(&collapsed);
    line.trim_end_matches(INDENT).to_string()
}

/// Drop blank lines at the start of the document, keeping the first
/// content line's indentation
fn trim_leading_blank_lines(text: &str) -> &str {
    let content_start = text
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    match text[..content_start].rfind('\n') {
        Some(newline) => &text[newline + 1..],
        None => text,
    }
}

/// Normalize intra-line whitespace and trim blank content at both ends of
/// the document
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let (content, terminator) = split_terminator(line);
        result.push_str(&normalize_line(content));
        result.push_str(terminator);
    }

    trim_leading_blank_lines(result.trim_end()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_and_trim() {
        assert_eq!(
            normalize_whitespace("Hello   world\n\tindented  line\n"),
            "Hello world\n\tindented line"
        );
    }

    #[test]
    fn test_crlf_preserved() {
        assert_eq!(
            normalize_whitespace("a  b \r\n  c\t\td\r\nlast   line"),
            "a b\r\n  c d\r\nlast line"
        );
    }

    #[test]
    fn test_blank_lines_inside_kept() {
        assert_eq!(
            normalize_whitespace("para one\n\n\npara   two"),
            "para one\n\n\npara two"
        );
    }

    #[test]
    fn test_whitespace_only_lines_emptied() {
        assert_eq!(normalize_whitespace("a\n   \t \nb"), "a\n\nb");
    }

    #[test]
    fn test_leading_blank_lines_dropped_indent_kept() {
        assert_eq!(normalize_whitespace("\n\n   \n  first\nsecond"), "  first\nsecond");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t\n"), "");
    }

    #[test]
    fn test_other_whitespace_untouched() {
        // Only spaces and tabs are collapsed
        assert_eq!(normalize_whitespace("a\u{a0}\u{a0}b"), "a\u{a0}\u{a0}b");
    }
}
