//! Punctuation spacing.
//!
//! The engine walks the text once.  At every position it first tries to
//! consume a *protected span* (code, URLs, paths, IPv6 addresses, emails,
//! domains, versions, decimals, times, ellipses, and dotted abbreviations),
//! which is copied verbatim.  Anything else goes through the punctuation
//! rules, and a final pass collapses runs of spaces outside protected spans.

mod scan;


use std::ops::Range;

use crate::whitespace::normalize_newlines;
use scan::{
    contraction_tail_follows, is_apostrophe, is_closer, is_opening_quote, is_sentence_punct,
    is_word_char,
};

/// Scanners for spans copied verbatim, in priority order.
const PROTECTED_SCANNERS: &[fn(&[char], usize) -> Option<usize>] = &[
    scan::code_span,
    scan::url,
    scan::path,
    scan::ipv6,
    scan::email,
    scan::domain,
    scan::version,
    scan::decimal,
    scan::time,
];

/// Normalize the spacing around `, . ! ? ;` (and `:` when
/// `treat_colon_as_sentence_punct` is set).
///
/// Line breaks are unified to `\n`, spaces before the punctuation are
/// removed, one space is inserted after it, and runs of spaces are collapsed.
/// URLs, emails, paths, numbers, and code spans are left untouched.
///
/// The function is idempotent.
///
/// # Example
///
/// ```
/// use tidytext::spacing::fix_punctuation_spacing;
///
/// assert_eq!(
///     fix_punctuation_spacing("Hello ,world!See https://example.com/a?x=1,2.", false),
///     "Hello, world! See https://example.com/a?x=1,2.",
/// );
/// ```
pub fn fix_punctuation_spacing(text: &str, treat_colon_as_sentence_punct: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = normalize_newlines(text);
    let chars: Vec<char> = text.chars().collect();
    let mut spacer = Spacer::new(&chars, treat_colon_as_sentence_punct);
    spacer.run();
    spacer.finish()
}

/// Scan state for a single call of [`fix_punctuation_spacing`].
struct Spacer<'a> {
    chars: &'a [char],
    treat_colon: bool,
    output: String,
    /// Byte ranges of `output` that were copied verbatim.
    protected: Vec<Range<usize>>,
}

impl<'a> Spacer<'a> {
    fn new(chars: &'a [char], treat_colon: bool) -> Self {
        Self {
            chars,
            treat_colon,
            output: String::with_capacity(chars.len() + chars.len() / 8),
            protected: Vec::new(),
        }
    }

    fn at(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    fn last_output_char(&self) -> Option<char> {
        self.output.chars().next_back()
    }

    fn protected_end(&self) -> usize {
        self.protected.last().map_or(0, |r| r.end)
    }

    fn copy_protected(&mut self, range: Range<usize>) {
        let start = self.output.len();
        self.output.extend(&self.chars[range]);
        self.protected.push(start..self.output.len());
    }

    /// Drop the spaces at the end of the output, stopping at a protected
    /// span.
    fn strip_trailing_spaces(&mut self) {
        let floor = self.protected_end();
        while self.output.len() > floor && self.output.ends_with(' ') {
            self.output.pop();
        }
    }

    fn next_non_space(&self, mut i: usize) -> Option<char> {
        while self.at(i) == Some(' ') {
            i += 1;
        }
        self.at(i)
    }

    fn run(&mut self) {
        let mut i = 0;
        while i < self.chars.len() {
            i = self.step(i);
        }
    }

    /// Handle the text at `i` and return the index of the next unhandled
    /// character.
    fn step(&mut self, i: usize) -> usize {
        for scanner in PROTECTED_SCANNERS {
            if let Some(end) = scanner(self.chars, i)
                && end > i
            {
                self.copy_protected(i..end);
                return end;
            }
        }

        if let Some(end) = scan::ellipsis(self.chars, i) {
            self.copy_protected(i..end);
            if self.next_non_space(end).is_some_and(is_word_char) {
                self.output.push(' ');
            }
            return end;
        }

        if let Some(end) = scan::dotted_abbreviation(self.chars, i) {
            self.copy_protected(i..end);
            return end;
        }

        let c = self.chars[i];
        if is_apostrophe(c) && self.tighten_apostrophe(i) {
            return i + 1;
        }
        if is_closer(c) {
            self.output.push(c);
            let spaced = self
                .last_output_char_before(1)
                .is_some_and(|p| !p.is_whitespace());
            if spaced && self.at(i + 1).is_some_and(is_word_char) {
                self.output.push(' ');
            }
            return i + 1;
        }
        if self.is_spaced_punct(c) {
            return self.sentence_punct(i);
        }

        self.output.push(c);
        i + 1
    }

    /// The output character `n` places before the last one.
    fn last_output_char_before(&self, n: usize) -> Option<char> {
        self.output.chars().rev().nth(n)
    }

    /// Attach an apostrophe to the word before it: `word’s`, or `I ’ll`
    /// becoming `I’ll`.
    fn tighten_apostrophe(&mut self, i: usize) -> bool {
        let c = self.chars[i];
        let Some(next) = self.at(i + 1).filter(|&n| is_word_char(n)) else {
            return false;
        };
        if self.last_output_char().is_some_and(is_word_char) {
            self.output.push(c);
            return true;
        }

        let trimmed = self.output.trim_end_matches(' ');
        if trimmed.len() == self.output.len() || trimmed.len() < self.protected_end() {
            return false;
        }
        let mut before = trimmed.chars().rev();
        let Some(word_end) = before.next().filter(|&p| is_word_char(p)) else {
            return false;
        };
        let single_capital =
            word_end.is_uppercase() && !before.next().is_some_and(is_word_char);
        let elision = next.is_uppercase() && single_capital;
        if !(contraction_tail_follows(self.chars, i) || elision) {
            return false;
        }

        let len = trimmed.len();
        self.output.truncate(len);
        self.output.push(c);
        true
    }

    /// Sentence punctuation, plus the colon when it is spaced the same way.
    fn is_spaced_punct(&self, c: char) -> bool {
        is_sentence_punct(c) || (c == ':' && self.treat_colon)
    }

    fn sentence_punct(&mut self, i: usize) -> usize {
        let c = self.chars[i];
        self.strip_trailing_spaces();

        if c == ':' {
            let url_scheme = self.at(i + 1) == Some('/') && self.at(i + 2) == Some('/');
            let by_digit = self.last_output_char().is_some_and(|p| p.is_ascii_digit())
                || self.at(i + 1).is_some_and(|n| n.is_ascii_digit());
            if url_scheme || by_digit {
                self.output.push(c);
                return i + 1;
            }
        }

        self.output.push(c);
        let mut j = i + 1;
        while let Some(d) = self.at(j) {
            let straight_quote_closing =
                matches!(d, '"' | '\'') && !self.at(j + 1).is_some_and(is_word_char);
            if !(is_closer(d) || straight_quote_closing) {
                break;
            }
            self.output.push(d);
            j += 1;
        }

        let opens_quote = self.at(j).is_some_and(is_opening_quote)
            && self.at(j + 1).is_some_and(is_word_char);
        match self.at(j) {
            Some(_) if opens_quote && matches!(c, '.' | '!' | '?') => {}
            Some(_) if opens_quote => self.output.push(' '),
            Some(n) if !n.is_whitespace() && !self.is_spaced_punct(n) => self.output.push(' '),
            _ => {}
        }
        j
    }

    /// Collapse runs of spaces outside protected spans, dropping the runs
    /// that end a line.
    fn finish(self) -> String {
        let mut result = String::with_capacity(self.output.len());
        let mut protected = self.protected.iter().peekable();
        let mut pending_space = false;

        for (offset, c) in self.output.char_indices() {
            while protected.peek().is_some_and(|r| r.end <= offset) {
                protected.next();
            }
            let inside = protected.peek().is_some_and(|r| r.contains(&offset));
            if c == ' ' && !inside {
                pending_space = true;
                continue;
            }
            if pending_space && c != '\n' {
                result.push(' ');
            }
            pending_space = false;
            result.push(c);
        }
        result
    }
}
