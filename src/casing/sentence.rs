//! Sentence case conversion.

use super::lexicon::{CommonLexicon, SentenceCaseLexicon};
use super::shape::{
    capitalize_with_apostrophes, has_digit, is_all_caps_word, is_apostrophe,
    is_camel_or_mixed_case, looks_like_contraction_or_possessive,
};
use super::{Culture, SentenceCaseOptions};
use crate::whitespace::normalize_newlines;

/// Converts prose to sentence case.
///
/// Only the first word of each sentence is capitalized; acronyms, canonical
/// brand spellings, mixed-case names, and words after honorifics keep their
/// casing.  Dotted abbreviations (`p.m.`, `e.g.`) and decimals do not end a
/// sentence.
#[derive(Clone, Copy)]
pub struct SentenceCaseConverter<'a> {
    lexicon: &'a dyn SentenceCaseLexicon,
    options: SentenceCaseOptions,
}

impl Default for SentenceCaseConverter<'static> {
    fn default() -> Self {
        Self::new(CommonLexicon::builtin(), SentenceCaseOptions::default())
    }
}

/// Scan state carried from one character or token to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScanState {
    /// The next word begins a sentence.
    at_sentence_start: bool,
    /// Nesting depth of open brackets and quotes.
    wrapper_depth: usize,
    /// A terminator was seen; the first word of a second wrapper group
    /// directly after it may also be capitalized.
    pending_second_wrapper_cap: bool,
    in_double_quote: bool,
    in_single_quote: bool,
    prev_had_digit: bool,
    prev_was_brand: bool,
    /// Wrapper depth at which an honorific was seen; the next word at the
    /// same depth is a name.
    honorific_depth: Option<usize>,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            at_sentence_start: true,
            wrapper_depth: 0,
            pending_second_wrapper_cap: false,
            in_double_quote: false,
            in_single_quote: false,
            prev_had_digit: false,
            prev_was_brand: false,
            honorific_depth: None,
        }
    }
}

impl<'a> SentenceCaseConverter<'a> {
    /// Create a converter over the given lexicon and options.
    pub fn new(lexicon: &'a dyn SentenceCaseLexicon, options: SentenceCaseOptions) -> Self {
        Self { lexicon, options }
    }

    /// Convert `text` using the culture from the converter's options.
    pub fn convert(&self, text: &str) -> String {
        self.convert_with_culture(text, self.options.culture)
    }

    /// Convert `text` using the given culture.
    ///
    /// Line breaks are unified to `\n`.
    pub fn convert_with_culture(&self, text: &str, culture: Culture) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = normalize_newlines(text);
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut state = ScanState::default();

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c.is_alphanumeric() {
                let start = i;
                i = token_end(&chars, i);
                let token: String = chars[start..i].iter().collect();
                let rendered = self.render_token(&token, &chars, start, i, &mut state, culture);
                if state.pending_second_wrapper_cap && state.wrapper_depth == 0 {
                    state.pending_second_wrapper_cap = false;
                }
                state.at_sentence_start = false;
                state.prev_had_digit = has_digit(&token);
                state.prev_was_brand = self.lexicon.is_brand_token(&rendered);
                out.push_str(&rendered);
                continue;
            }

            out.push(c);
            self.track_punctuation(&chars, i, &mut state);
            i += 1;
        }

        out
    }

    /// Decide the output form of one token.
    fn render_token(
        &self,
        token: &str,
        chars: &[char],
        start: usize,
        end: usize,
        state: &mut ScanState,
        culture: Culture,
    ) -> String {
        let lex = self.lexicon;
        let honorific = state.honorific_depth.take();
        let followed_by_dot = chars.get(end) == Some(&'.');

        if let Some(canonical) = lex.canonical_case(token) {
            return canonical;
        }
        if let Some(pronoun) = first_person_pronoun_i(token, culture) {
            return pronoun;
        }

        if state.at_sentence_start {
            if followed_by_dot
                && (lex.is_honorific(token) || lex.is_non_terminal_abbreviation(token))
            {
                if lex.is_honorific(token) {
                    state.honorific_depth = Some(state.wrapper_depth);
                }
                return culture.upper_first_lower_rest(token);
            }
            if self.is_all_caps_acronym(token) || has_digit(token) {
                return token.to_string();
            }
            if token.contains(is_apostrophe) && !looks_like_contraction_or_possessive(token) {
                return capitalize_with_apostrophes(token, culture);
            }
            return culture.upper_first_lower_rest(token);
        }

        if honorific == Some(state.wrapper_depth) {
            return culture.upper_first_lower_rest(token);
        }
        if followed_by_dot && (lex.is_honorific(token) || lex.is_non_terminal_abbreviation(token)) {
            if lex.is_honorific(token) {
                state.honorific_depth = Some(state.wrapper_depth);
            }
            return culture.upper_first_lower_rest(token);
        }

        // A letter inside a dotted run ("U.S.A.", "e.g.", "a.m.").
        if followed_by_dot && token.chars().count() == 1 && token.chars().all(char::is_alphabetic) {
            let run = dotted_run(chars, start, end);
            let upper: String = run
                .chars()
                .filter(|&c| c != '.')
                .flat_map(char::to_uppercase)
                .collect();
            if lex.is_upper_acronym(&upper) {
                return culture.to_upper(token);
            }
            if self.is_abbreviation_run(&run) {
                return culture.to_lower(token);
            }
            return token.to_string();
        }

        if lex.is_proper_case_token(token) {
            return capitalize_with_apostrophes(token, culture);
        }
        if lex.is_brand_suffix(token) && (state.prev_was_brand || state.prev_had_digit) {
            return capitalize_with_apostrophes(token, culture);
        }
        if (self.options.preserve_acronyms_mid_sentence && self.is_all_caps_acronym(token))
            || is_camel_or_mixed_case(token)
            || has_digit(token)
        {
            return token.to_string();
        }
        culture.to_lower(token)
    }

    /// Update wrapper, quote, and sentence-boundary state for a non-token
    /// character.
    fn track_punctuation(&self, chars: &[char], i: usize, state: &mut ScanState) {
        let c = chars[i];
        match c {
            '(' | '[' | '{' | '\u{201C}' => state.wrapper_depth += 1,
            ')' | ']' | '}' | '\u{201D}' => close_wrapper(chars, i, state),
            '"' => {
                state.in_double_quote = !state.in_double_quote;
                if state.in_double_quote {
                    state.wrapper_depth += 1;
                } else {
                    close_wrapper(chars, i, state);
                }
            }
            '\'' | '\u{2018}' | '\u{2019}' => {
                if state.in_single_quote && c != '\u{2018}' {
                    state.in_single_quote = false;
                    close_wrapper(chars, i, state);
                } else if c == '\u{2018}' || (c == '\'' && !follows_word(chars, i)) {
                    state.in_single_quote = true;
                    state.wrapper_depth += 1;
                }
            }
            '.' | '!' | '?' => {
                let decimal = i > 0
                    && chars[i - 1].is_numeric()
                    && chars.get(i + 1).is_some_and(|c| c.is_numeric());
                if !decimal && !self.is_abbreviation_run(&dotted_run(chars, i, i + 1)) {
                    let more = chars[i + 1..]
                        .iter()
                        .any(|&c| !c.is_whitespace() && !is_closing_wrapper(c));
                    if more {
                        state.at_sentence_start = true;
                        state.pending_second_wrapper_cap = true;
                    }
                }
            }
            '\n' => state.at_sentence_start = true,
            _ => {}
        }
    }

    /// Check if a dotted run such as `p.m.` or `U.S.A.` is a known
    /// non-terminal abbreviation.
    fn is_abbreviation_run(&self, run: &str) -> bool {
        let no_dots: String = run.chars().filter(|&c| c != '.').collect();
        let trimmed = run.trim_end_matches('.');
        self.lexicon.is_non_terminal_abbreviation(&no_dots)
            || self.lexicon.is_non_terminal_abbreviation(trimmed)
    }

    /// Check if an ALL-CAPS token should be kept as an acronym.
    fn is_all_caps_acronym(&self, token: &str) -> bool {
        if !is_all_caps_word(token) {
            return false;
        }
        if self.lexicon.is_upper_acronym(token) {
            return true;
        }
        self.options.treat_unknown_short_all_caps_as_acronym
            && token.chars().count() <= 3
            && !self.lexicon.is_upper_short_stopword(token)
    }
}

/// Find the end of the token starting at `start`: letters and digits plus
/// apostrophes that are followed by a letter or digit.
fn token_end(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c.is_alphanumeric()
            || (is_apostrophe(c) && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric()))
        {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Expand `[start, end)` over neighboring letters and dots.
fn dotted_run(chars: &[char], start: usize, end: usize) -> String {
    let is_run_char = |c: char| c.is_alphabetic() || c == '.';
    let mut left = start;
    while left > 0 && is_run_char(chars[left - 1]) {
        left -= 1;
    }
    let mut right = end;
    while right < chars.len() && is_run_char(chars[right]) {
        right += 1;
    }
    chars[left..right].iter().collect()
}

fn follows_word(chars: &[char], i: usize) -> bool {
    i > 0 && chars[i - 1].is_alphanumeric()
}

fn is_closing_wrapper(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2019}' | ')' | ']' | '}'
    )
}

fn is_opening_wrapper(c: char) -> bool {
    matches!(
        c,
        '(' | '[' | '{' | '"' | '\'' | '\u{201C}' | '\u{2018}'
    )
}

/// Close one wrapper level.  When the first wrapper group after a terminator
/// closes and another group opens right after it, that group's first word is
/// capitalized too.
fn close_wrapper(chars: &[char], i: usize, state: &mut ScanState) {
    state.wrapper_depth = state.wrapper_depth.saturating_sub(1);
    if state.wrapper_depth == 0 && state.pending_second_wrapper_cap {
        state.pending_second_wrapper_cap = false;
        let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
        if next.is_some_and(|&c| is_opening_wrapper(c)) {
            state.at_sentence_start = true;
        }
    }
}

/// Check if a word is the pronoun "I" or a contraction starting with it
/// (`i'm`, `i’ll`), returning the capitalized form.
fn first_person_pronoun_i(word: &str, culture: Culture) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    let first = *chars.first()?;
    if !first.eq_ignore_ascii_case(&'i') {
        return None;
    }
    if chars.len() == 1 {
        return Some("I".to_string());
    }
    if is_apostrophe(chars[1]) {
        let mut result = String::from("I");
        result.push(chars[1]);
        for &c in &chars[2..] {
            culture.push_lower(&mut result, c);
        }
        return Some(result);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str) -> String {
        SentenceCaseConverter::default().convert(input)
    }

    fn convert_with(input: &str, options: SentenceCaseOptions) -> String {
        SentenceCaseConverter::new(CommonLexicon::builtin(), options).convert(input)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_canonical_brands() {
        assert_eq!(
            convert("watch YouTube today. ok."),
            "Watch YouTube today. Ok."
        );
        assert_eq!(
            convert("we love iPhone 15. nice."),
            "We love iPhone 15. Nice."
        );
        assert_eq!(
            convert("we test iOS and macOS now. ok."),
            "We test iOS and macOS now. Ok."
        );
        assert_eq!(
            convert("we use OpenAI models. cool."),
            "We use OpenAI models. Cool."
        );
        assert_eq!(convert("MACDONALD'S FARM"), "MacDonald's farm");
    }

    #[test]
    fn test_sentence_start() {
        assert_eq!(convert("hello there. ok."), "Hello there. Ok.");
        assert_eq!(
            convert("first line.\nsecond line."),
            "First line.\nSecond line."
        );
        assert_eq!(convert("WHAT? REALLY! YES."), "What? Really! Yes.");
    }

    #[test]
    fn test_dotted_abbreviations_do_not_end_sentence() {
        assert_eq!(
            convert("We meet at 5 p.m. today. ok."),
            "We meet at 5 p.m. today. Ok."
        );
        assert_eq!(
            convert("fruit, e.g. apples. ok."),
            "Fruit, e.g. apples. Ok."
        );
        assert_eq!(
            convert("born in the U.S.A. long ago."),
            "Born in the U.S.A. long ago."
        );
    }

    #[test]
    fn test_mid_sentence_abbreviation_is_title_cased() {
        assert_eq!(
            convert("apples vs. oranges and so on etc. here"),
            "Apples Vs. oranges and so on Etc. here"
        );
        // Only honorifics carry over to the next word.
        assert_eq!(
            convert("apples vs. oranges, etc. are fine."),
            "Apples Vs. oranges, Etc. are fine."
        );
    }

    #[test]
    fn test_decimal_does_not_end_sentence() {
        assert_eq!(
            convert("Version 3.14 is out. ok."),
            "Version 3.14 is out. Ok."
        );
    }

    #[test]
    fn test_wrappers_after_terminator() {
        assert_eq!(
            convert("He paused. \"ok\" (cool)."),
            "He paused. \"Ok\" (Cool)."
        );
        assert_eq!(
            convert("He paused. \"ok\" and left."),
            "He paused. \"Ok\" and left."
        );
    }

    #[test]
    fn test_pronoun_i() {
        assert_eq!(convert("i did it. and i won."), "I did it. And I won.");
        assert_eq!(
            convert("so i'm here and i\u{2019}ll stay."),
            "So I'm here and I\u{2019}ll stay."
        );
    }

    #[test]
    fn test_camel_case_preserved() {
        assert_eq!(
            convert("We like eBay and OpenAI tools."),
            "We like eBay and OpenAI tools."
        );
    }

    #[test]
    fn test_brand_suffix() {
        assert_eq!(convert("iphone pro rocks."), "iPhone Pro rocks.");
        assert_eq!(convert("we love 15 pro."), "We love 15 Pro.");
        assert_eq!(convert("a pro move."), "A pro move.");
    }

    #[test]
    fn test_whitelisted_acronyms_preserved() {
        assert_eq!(
            convert("We like GPU drivers and GPT models. ok."),
            "We like GPU drivers and GPT models. Ok."
        );
    }

    #[test]
    fn test_unknown_short_all_caps() {
        assert_eq!(convert("We met XYZ today. ok."), "We met xyz today. Ok.");

        let permissive = SentenceCaseOptions {
            treat_unknown_short_all_caps_as_acronym: true,
            ..SentenceCaseOptions::default()
        };
        assert_eq!(
            convert_with("We met XYZ today. ok.", permissive),
            "We met XYZ today. Ok."
        );
        assert_eq!(
            convert_with("We met THE team.", permissive),
            "We met the team."
        );

        let strict = SentenceCaseOptions {
            preserve_acronyms_mid_sentence: false,
            treat_unknown_short_all_caps_as_acronym: true,
            ..SentenceCaseOptions::default()
        };
        assert_eq!(
            convert_with("We met XYZ today. ok.", strict),
            "We met xyz today. Ok."
        );
    }

    #[test]
    fn test_honorific_carry_over() {
        assert_eq!(convert("Mr. Smith is here. ok."), "Mr. Smith is here. Ok.");
        assert_eq!(convert("we saw dr. jones."), "We saw Dr. Jones.");
    }

    #[test]
    fn test_honorific_carry_over_scoped_to_wrapper() {
        assert_eq!(
            convert("words like \"Mr.\" Are common."),
            "Words like \"Mr.\" are common."
        );
    }

    #[test]
    fn test_apostrophes() {
        assert_eq!(convert("o'neill arrived. ok."), "O'Neill arrived. Ok.");
        assert_eq!(
            convert("d\u{2019}angelo arrived. ok."),
            "D\u{2019}Angelo arrived. Ok."
        );
        assert_eq!(convert("it's late. don't go."), "It's late. Don't go.");
        assert_eq!(convert("the students' books."), "The students' books.");
    }

    #[test]
    fn test_newline_normalization() {
        assert_eq!(convert("hello\r\nworld. ok."), "Hello\nWorld. Ok.");
        assert_eq!(convert("one\rtwo"), "One\nTwo");
    }

    #[test]
    fn test_turkic_culture() {
        let options = SentenceCaseOptions {
            culture: Culture::Turkic,
            ..SentenceCaseOptions::default()
        };
        assert_eq!(
            convert_with("istanbul IS BIG.", options),
            "\u{130}stanbul ıs bıg."
        );
    }

    #[test]
    fn test_fixed_point() {
        let once = convert("the quick brown fox. it jumped over (the lazy dog).");
        assert_eq!(once, "The quick brown fox. It jumped over (the lazy dog).");
        assert_eq!(convert(&once), once);
    }

    #[test]
    fn test_custom_lexicon() {
        use crate::casing::LexiconConfig;

        let lexicon = CommonLexicon::extended(&LexiconConfig {
            proper_nouns: vec!["Seoul".to_string()],
            ..LexiconConfig::default()
        })
        .unwrap();
        let converter = SentenceCaseConverter::new(&lexicon, SentenceCaseOptions::default());
        assert_eq!(converter.convert("WE VISITED SEOUL."), "We visited Seoul.");
    }
}
