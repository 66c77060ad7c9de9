//! AP-style title case conversion.

use super::lexicon::{CommonLexicon, SentenceCaseLexicon, TitleCaseLexicon, TitleLexicon};
use super::shape::{
    capitalize_with_apostrophes, ends_with_upper_run, is_apostrophe, is_camel_or_mixed_case,
    is_contraction_tail,
};
use super::{Culture, TitleCaseOptions};

/// Converts text to AP headline style.
///
/// Small words (articles, conjunctions, short prepositions) are lowercased
/// unless they are the first or last word or follow a colon; everything else
/// is capitalized.  Acronyms, canonical brand spellings, and mixed-case names
/// are restored or preserved, and email addresses are left untouched.
#[derive(Clone, Copy)]
pub struct TitleCaseConverter<'a> {
    title_lexicon: &'a dyn TitleCaseLexicon,
    common_lexicon: &'a dyn SentenceCaseLexicon,
    options: TitleCaseOptions,
}

impl Default for TitleCaseConverter<'static> {
    fn default() -> Self {
        Self::new(
            TitleLexicon::builtin(),
            CommonLexicon::builtin(),
            TitleCaseOptions::default(),
        )
    }
}

/// A word: letters and digits joined by inner apostrophes or hyphens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

/// Where a word sits in the title.
#[derive(Debug, Clone, Copy)]
struct Position {
    first: bool,
    last: bool,
    after_colon: bool,
}

impl<'a> TitleCaseConverter<'a> {
    /// Create a converter over the given lexicons and options.
    pub fn new(
        title_lexicon: &'a dyn TitleCaseLexicon,
        common_lexicon: &'a dyn SentenceCaseLexicon,
        options: TitleCaseOptions,
    ) -> Self {
        Self {
            title_lexicon,
            common_lexicon,
            options,
        }
    }

    /// Convert `text` using the culture from the converter's options.
    pub fn convert(&self, text: &str) -> String {
        self.convert_with_culture(text, self.options.culture)
    }

    /// Convert `text` using the given culture.
    ///
    /// Everything between words, line breaks included, is copied verbatim.
    pub fn convert_with_culture(&self, text: &str, culture: Culture) -> String {
        if text.is_empty() {
            return String::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let words = collect_words(&chars);
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;

        for (k, word) in words.iter().enumerate() {
            if word.start < copied {
                // Swallowed by an email address.
                continue;
            }
            let gap = &chars[copied..word.start];
            out.extend(gap);

            if let Some(end) = email_run_end(&chars, word.start) {
                out.extend(&chars[word.start..end]);
                copied = end;
                continue;
            }

            let position = Position {
                first: k == 0 || gap.iter().any(|&c| c == '\n' || c == '\r'),
                last: k == words.len() - 1,
                after_colon: self.options.capitalize_after_colon && gap.contains(&':'),
            };
            let token: String = chars[word.start..word.end].iter().collect();
            let rendered = match self.contextual_override(&token, &chars, *word, culture) {
                Some(forced) => forced,
                None => {
                    let letter_name = is_letter_name(&chars, &words, k);
                    self.render_word(&token, position, letter_name, culture)
                }
            };
            out.push_str(&rendered);
            copied = word.end;
        }
        out.extend(&chars[copied..]);
        out
    }

    /// Rules that depend on the characters touching the word rather than on
    /// the word itself.
    fn contextual_override(
        &self,
        word: &str,
        chars: &[char],
        span: Span,
        culture: Culture,
    ) -> Option<String> {
        let before = span.start.checked_sub(1).map(|i| chars[i]);
        let after = chars.get(span.end).copied();
        let single_letter = span.end - span.start == 1 && chars[span.start].is_alphabetic();

        // Q&A, R&D
        if single_letter && (before == Some('&') || after == Some('&')) {
            return Some(culture.to_upper(word));
        }
        // Math variables: x^2, mc^2
        if after == Some('^') && word.chars().all(char::is_alphabetic) {
            return Some(culture.to_upper(word));
        }
        // Elided tails: rock ’n’ roll, ’em
        if before.is_some_and(is_apostrophe) && is_contraction_tail(word) {
            return Some(culture.to_lower(word));
        }
        None
    }

    fn render_word(
        &self,
        word: &str,
        position: Position,
        letter_name: bool,
        culture: Culture,
    ) -> String {
        if self.title_lexicon.is_protected(word) {
            return word.to_string();
        }
        let must_cap = position.after_colon
            || (self.options.force_cap_first_and_last && (position.first || position.last));
        if self.options.capitalize_hyphenated_segments && word.contains('-') {
            return self.render_compound(word, must_cap, culture);
        }
        self.render_segment(word, must_cap, letter_name, culture)
    }

    /// Apply the AP compound rule: the first segment is always capitalized,
    /// inner small words stay lowercase, and the last segment follows the
    /// normal rules.
    fn render_compound(&self, word: &str, must_cap: bool, culture: Culture) -> String {
        let segments: Vec<&str> = word.split('-').collect();
        let last = segments.len() - 1;
        let mut rendered: Vec<String> = segments
            .iter()
            .enumerate()
            .map(|(j, seg)| {
                let cap = j == 0 || must_cap;
                self.render_segment(seg, cap, false, culture)
            })
            .collect();
        for j in 1..last {
            if self.title_lexicon.is_small_word(segments[j]) {
                rendered[j] = culture.to_lower(segments[j]);
            }
        }
        rendered.join("-")
    }

    fn render_segment(
        &self,
        seg: &str,
        must_cap: bool,
        letter_name: bool,
        culture: Culture,
    ) -> String {
        if let Some(canonical) = self.common_lexicon.canonical_case(seg) {
            return canonical;
        }
        if self.options.preserve_acronyms
            && let Some(acronym) = self.acronym_form(seg)
        {
            return acronym;
        }
        if self.options.preserve_camel_or_mixed_case
            && is_camel_or_mixed_case(seg)
            && !ends_with_upper_run(seg)
        {
            return seg.to_string();
        }
        let single_letter = seg.chars().count() == 1 && seg.chars().all(char::is_alphabetic);
        if self.title_lexicon.is_small_word(seg) && !must_cap {
            if single_letter && letter_name && self.options.uppercase_single_letter_words {
                return culture.to_upper(seg);
            }
            return culture.to_lower(seg);
        }
        if single_letter && self.options.uppercase_single_letter_words {
            return culture.to_upper(seg);
        }
        capitalize_with_apostrophes(seg, culture)
    }

    /// Return the uppercase form of `seg` if it is a whitelisted acronym.
    fn acronym_form(&self, seg: &str) -> Option<String> {
        if !seg.chars().any(char::is_alphabetic) {
            return None;
        }
        let upper: String = seg.chars().flat_map(char::to_uppercase).collect();
        self.common_lexicon
            .is_upper_acronym(&upper)
            .then_some(upper)
    }
}

fn is_word_joiner(c: char) -> bool {
    is_apostrophe(c) || c == '-'
}

fn collect_words(chars: &[char]) -> Vec<Span> {
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_alphanumeric() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len()
            && (chars[i].is_alphanumeric()
                || (is_word_joiner(chars[i])
                    && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric())))
        {
            i += 1;
        }
        words.push(Span { start, end: i });
    }
    words
}

/// If an email address starts at `start`, return where it ends.
fn email_run_end(chars: &[char], start: usize) -> Option<usize> {
    let is_local = |c: char| c.is_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-');
    let mut i = start;
    while i < chars.len() && is_local(chars[i]) {
        i += 1;
    }
    if chars.get(i) != Some(&'@') || !chars.get(i + 1).is_some_and(|c| c.is_alphanumeric()) {
        return None;
    }
    i += 1;
    while i < chars.len() {
        let c = chars[i];
        let label_char = c.is_alphanumeric() || c == '-';
        let label_dot = c == '.' && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric());
        if label_char || label_dot {
            i += 1;
        } else {
            break;
        }
    }
    Some(i)
}

/// Check if word `k` is a single letter in a letter-to-letter range such as
/// "A to Z".
fn is_letter_name(chars: &[char], words: &[Span], k: usize) -> bool {
    let is_letter = |w: &Span| w.end - w.start == 1 && chars[w.start].is_alphabetic();
    let is_to = |w: &Span| {
        w.end - w.start == 2
            && chars[w.start].eq_ignore_ascii_case(&'t')
            && chars[w.start + 1].eq_ignore_ascii_case(&'o')
    };
    let spaced = |a: &Span, b: &Span| {
        a.end < b.start && chars[a.end..b.start].iter().all(|c| c.is_whitespace())
    };

    if !is_letter(&words[k]) {
        return false;
    }
    let forward = match (words.get(k + 1), words.get(k + 2)) {
        (Some(to), Some(other)) => {
            is_to(to) && is_letter(other) && spaced(&words[k], to) && spaced(to, other)
        }
        _ => false,
    };
    let backward = k >= 2 && {
        let (other, to) = (&words[k - 2], &words[k - 1]);
        is_to(to) && is_letter(other) && spaced(other, to) && spaced(to, &words[k])
    };
    forward || backward
}
