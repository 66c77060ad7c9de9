//! Per-call options for the casing converters.

use serde::{Deserialize, Serialize};

use super::Culture;

/// Options for the sentence-case converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SentenceCaseOptions {
    /// Casing culture (default: invariant).
    pub culture: Culture,

    /// Keep whitelisted ALL-CAPS acronyms mid-sentence (default: true).
    pub preserve_acronyms_mid_sentence: bool,

    /// Treat unknown ALL-CAPS words of up to three letters as acronyms, unless
    /// they are common short words (default: false).  At a sentence start
    /// this always applies; mid-sentence it also needs
    /// `preserve_acronyms_mid_sentence`.
    pub treat_unknown_short_all_caps_as_acronym: bool,
}

impl Default for SentenceCaseOptions {
    fn default() -> Self {
        Self {
            culture: Culture::Invariant,
            preserve_acronyms_mid_sentence: true,
            treat_unknown_short_all_caps_as_acronym: false,
        }
    }
}

/// Options for the title-case converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TitleCaseOptions {
    /// Casing culture (default: invariant).
    pub culture: Culture,

    /// Capitalize the first word after a colon (default: true).
    pub capitalize_after_colon: bool,

    /// Always capitalize the first and last words (default: true).
    pub force_cap_first_and_last: bool,

    /// Apply title-case rules to each segment of hyphenated compounds
    /// (default: true).
    pub capitalize_hyphenated_segments: bool,

    /// Restore whitelisted acronyms to uppercase (default: true).
    pub preserve_acronyms: bool,

    /// Keep camel-case and mixed-case words such as `iPhone` (default: true).
    pub preserve_camel_or_mixed_case: bool,

    /// Uppercase single-letter words such as the `a` in `A to Z`
    /// (default: true).
    pub uppercase_single_letter_words: bool,
}

impl Default for TitleCaseOptions {
    fn default() -> Self {
        Self {
            culture: Culture::Invariant,
            capitalize_after_colon: true,
            force_cap_first_and_last: true,
            capitalize_hyphenated_segments: true,
            preserve_acronyms: true,
            preserve_camel_or_mixed_case: true,
            uppercase_single_letter_words: true,
        }
    }
}
