//! Whitespace cleanup, the first stage of the [`tidy`](crate::tidy)
//! pipeline.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::Options;

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" {2,}").expect("space run pattern is valid")
});

/// Two or more line breaks with nothing but spaces or tabs between them.
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("blank line pattern is valid")
});

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n?|\n").expect("line break pattern is valid")
});

/// Unify `\r\n` and lone `\r` to `\n`.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Replace every run of two or more spaces with a single space.
pub fn collapse_spaces(text: &str) -> Cow<'_, str> {
    SPACE_RUN.replace_all(text, " ")
}

/// Reduce consecutive blank lines to exactly one blank line.
pub fn collapse_blank_lines(text: &str) -> Cow<'_, str> {
    BLANK_LINES.replace_all(text, "\n\n")
}

/// Delete every line break, whatever its style.
pub fn remove_line_breaks(text: &str) -> Cow<'_, str> {
    LINE_BREAK.replace_all(text, "")
}

/// Apply the whitespace operations enabled in `options`, in order: trimming,
/// space collapsing, blank-line collapsing, and line-break removal.
pub(crate) fn clean(text: &str, options: &Options) -> String {
    let mut text = text;
    if options.trim {
        text = text.trim();
    }
    if options.trim_start {
        text = text.trim_start();
    }
    if options.trim_end {
        text = text.trim_end();
    }

    let mut text = Cow::Borrowed(text);
    if options.collapse_spaces {
        text = Cow::Owned(collapse_spaces(&text).into_owned());
    }
    if options.collapse_blank_lines {
        text = Cow::Owned(collapse_blank_lines(&text).into_owned());
    }
    if options.remove_line_breaks {
        text = Cow::Owned(remove_line_breaks(&text).into_owned());
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("a  b   c d"), "a b c d");
        assert_eq!(collapse_spaces("tab\t\tstays"), "tab\t\tstays");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\r\n\r\n\r\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n  indented"), "a\n\n  indented");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_remove_line_breaks() {
        assert_eq!(remove_line_breaks("a\r\nb\rc\nd"), "abcd");
    }

    #[test]
    fn test_clean_in_order() {
        let options = Options {
            trim: true,
            collapse_spaces: true,
            collapse_blank_lines: true,
            ..Options::default()
        };
        assert_eq!(clean("  a   b\n\n\n\nc  ", &options), "a b\n\nc");
    }

    #[test]
    fn test_clean_trim_sides() {
        let start = Options {
            trim_start: true,
            ..Options::default()
        };
        let end = Options {
            trim_end: true,
            ..Options::default()
        };
        assert_eq!(clean("  a  ", &start), "a  ");
        assert_eq!(clean("  a  ", &end), "  a");
    }

    #[test]
    fn test_clean_nothing_enabled() {
        assert_eq!(clean(" a  \n\n\nb ", &Options::default()), " a  \n\n\nb ");
    }
}
