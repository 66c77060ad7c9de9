//! Tidytext is a prose normalizer.  It repairs the spacing around punctuation
//! and converts text to sentence case or AP-style title case, while leaving
//! technical tokens such as URLs, email addresses, paths, version strings,
//! times, and code spans untouched.
//!
//! # Example
//!
//! ```
//! use tidytext::{CaseMode, Options, tidy};
//!
//! let options = Options {
//!     case: CaseMode::Sentence,
//!     ..Options::default()
//! };
//! let output = tidy("hello ,WORLD .see you at 10:30 .", &options);
//! assert_eq!(output, "Hello, world. See you at 10:30.");
//! ```

pub mod casing;
pub mod config;
pub mod spacing;
pub mod whitespace;

#[cfg(feature = "wasm")]
mod wasm;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use casing::{
    CommonLexicon, Culture, SentenceCaseConverter, SentenceCaseLexicon, SentenceCaseOptions,
    TitleCaseConverter, TitleCaseLexicon, TitleCaseOptions, TitleLexicon,
};

pub use casing::{sentence_case, title_case};
pub use spacing::fix_punctuation_spacing;

/// The letter case applied as the last step of [`tidy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Leave the letter case alone (default).
    #[default]
    None,
    /// UPPERCASE everything.
    Upper,
    /// lowercase everything.
    Lower,
    /// Sentence case: capitalize the first word of each sentence.
    Sentence,
    /// AP-style title case.
    Title,
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CaseMode::None => "none",
            CaseMode::Upper => "upper",
            CaseMode::Lower => "lower",
            CaseMode::Sentence => "sentence",
            CaseMode::Title => "title",
        })
    }
}

impl FromStr for CaseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CaseMode::None),
            "upper" | "uppercase" => Ok(CaseMode::Upper),
            "lower" | "lowercase" => Ok(CaseMode::Lower),
            "sentence" => Ok(CaseMode::Sentence),
            "title" => Ok(CaseMode::Title),
            _ => Err(format!(
                "unknown case mode '{}' (expected none, upper, lower, sentence, or title)",
                s
            )),
        }
    }
}

/// Options for the [`tidy`] pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Trim whitespace at both ends of the text.
    pub trim: bool,
    /// Trim whitespace at the start of the text.
    pub trim_start: bool,
    /// Trim whitespace at the end of the text.
    pub trim_end: bool,
    /// Replace runs of two or more spaces with one.
    pub collapse_spaces: bool,
    /// Reduce consecutive blank lines to a single blank line.
    pub collapse_blank_lines: bool,
    /// Join all lines by deleting every line break.
    pub remove_line_breaks: bool,
    /// Normalize the spacing around punctuation (default: true).
    pub fix_spacing: bool,
    /// Also space colons like sentence punctuation (default: false).
    pub colon_as_sentence_punct: bool,
    /// Letter case applied last (default: none).
    pub case: CaseMode,
    /// Culture for every case mapping in the pipeline.  Overrides the culture
    /// in `sentence_case` and `title_case`.
    pub culture: Culture,
    /// Sentence case options.
    pub sentence_case: SentenceCaseOptions,
    /// Title case options.
    pub title_case: TitleCaseOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            trim: false,
            trim_start: false,
            trim_end: false,
            collapse_spaces: false,
            collapse_blank_lines: false,
            remove_line_breaks: false,
            fix_spacing: true,
            colon_as_sentence_punct: false,
            case: CaseMode::None,
            culture: Culture::Invariant,
            sentence_case: SentenceCaseOptions::default(),
            title_case: TitleCaseOptions::default(),
        }
    }
}

/// Tidies `text` with the built-in lexicons.
///
/// The steps run in a fixed order: whitespace cleanup, then punctuation
/// spacing, then the letter case.
pub fn tidy(text: &str, options: &Options) -> String {
    tidy_with_lexicons(
        text,
        options,
        CommonLexicon::builtin(),
        TitleLexicon::builtin(),
    )
}

/// Tidies `text` like [`tidy`], with caller-supplied lexicons.
pub fn tidy_with_lexicons(
    text: &str,
    options: &Options,
    common_lexicon: &dyn SentenceCaseLexicon,
    title_lexicon: &dyn TitleCaseLexicon,
) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut output = whitespace::clean(text, options);
    if options.fix_spacing {
        output = fix_punctuation_spacing(&output, options.colon_as_sentence_punct);
    }

    let culture = options.culture;
    let output = match options.case {
        CaseMode::None => output,
        CaseMode::Upper => culture.to_upper(&output),
        CaseMode::Lower => culture.to_lower(&output),
        CaseMode::Sentence => SentenceCaseConverter::new(common_lexicon, options.sentence_case)
            .convert_with_culture(&output, culture),
        CaseMode::Title => {
            TitleCaseConverter::new(title_lexicon, common_lexicon, options.title_case)
                .convert_with_culture(&output, culture)
        }
    };

    log::trace!(
        "tidied {} bytes into {} bytes (case: {})",
        text.len(),
        output.len(),
        options.case
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_empty_input() {
        assert_eq!(tidy("", &Options::default()), "");
    }

    #[test]
    fn test_tidy_default_only_fixes_spacing() {
        assert_eq!(
            tidy("  hello ,world  ", &Options::default()),
            " hello, world"
        );
    }

    #[test]
    fn test_tidy_spacing_disabled() {
        let options = Options {
            fix_spacing: false,
            ..Options::default()
        };
        assert_eq!(tidy("a ,b", &options), "a ,b");
    }

    #[test]
    fn test_tidy_upper_and_lower() {
        let upper = Options {
            case: CaseMode::Upper,
            ..Options::default()
        };
        let lower = Options {
            case: CaseMode::Lower,
            ..Options::default()
        };
        assert_eq!(tidy("Hello,World", &upper), "HELLO, WORLD");
        assert_eq!(tidy("Hello,World", &lower), "hello, world");
    }

    #[test]
    fn test_tidy_turkic_culture() {
        let options = Options {
            case: CaseMode::Upper,
            culture: Culture::Turkic,
            ..Options::default()
        };
        assert_eq!(tidy("istanbul", &options), "\u{130}STANBUL");
    }

    #[test]
    fn test_tidy_title_case() {
        let options = Options {
            case: CaseMode::Title,
            ..Options::default()
        };
        assert_eq!(
            tidy("the lord of the rings", &options),
            "The Lord of the Rings"
        );
    }

    #[test]
    fn test_tidy_spacing_runs_before_sentence_case() {
        let options = Options {
            case: CaseMode::Sentence,
            ..Options::default()
        };
        assert_eq!(tidy("one .two", &options), "One. Two");
    }

    #[test]
    fn test_case_mode_from_str() {
        assert_eq!("Title".parse::<CaseMode>(), Ok(CaseMode::Title));
        assert_eq!("uppercase".parse::<CaseMode>(), Ok(CaseMode::Upper));
        assert!("camel".parse::<CaseMode>().is_err());
    }

    #[test]
    fn test_case_mode_display_round_trip() {
        for mode in [
            CaseMode::None,
            CaseMode::Upper,
            CaseMode::Lower,
            CaseMode::Sentence,
            CaseMode::Title,
        ] {
            assert_eq!(mode.to_string().parse::<CaseMode>(), Ok(mode));
        }
    }
}
