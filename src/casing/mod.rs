//! Sentence case and AP title case conversion.

mod culture;
mod lexicon;
mod options;
mod sentence;
mod shape;
mod title;

pub use culture::Culture;
pub use lexicon::{
    CommonLexicon, LexiconConfig, LexiconError, SentenceCaseLexicon, TitleCaseLexicon,
    TitleLexicon,
};
pub use options::{SentenceCaseOptions, TitleCaseOptions};
pub use sentence::SentenceCaseConverter;
pub use title::TitleCaseConverter;

/// Convert `text` to sentence case.
///
/// # Example
///
/// ```
/// use tidytext::casing::{CommonLexicon, SentenceCaseOptions, sentence_case};
///
/// let output = sentence_case(
///     "watch YouTube today. ok.",
///     CommonLexicon::builtin(),
///     &SentenceCaseOptions::default(),
/// );
/// assert_eq!(output, "Watch YouTube today. Ok.");
/// ```
pub fn sentence_case(
    text: &str,
    lexicon: &dyn SentenceCaseLexicon,
    options: &SentenceCaseOptions,
) -> String {
    SentenceCaseConverter::new(lexicon, *options).convert(text)
}

/// Convert `text` to AP-style title case.
///
/// # Example
///
/// ```
/// use tidytext::casing::{CommonLexicon, TitleCaseOptions, TitleLexicon, title_case};
///
/// let output = title_case(
///     "from a to z: an ap guide",
///     TitleLexicon::builtin(),
///     CommonLexicon::builtin(),
///     &TitleCaseOptions::default(),
/// );
/// assert_eq!(output, "From A to Z: An AP Guide");
/// ```
pub fn title_case(
    text: &str,
    title_lexicon: &dyn TitleCaseLexicon,
    common_lexicon: &dyn SentenceCaseLexicon,
    options: &TitleCaseOptions,
) -> String {
    TitleCaseConverter::new(title_lexicon, common_lexicon, *options).convert(text)
}
