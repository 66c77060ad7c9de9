//! Integration tests for the Tidytext pipeline.

use proptest::prelude::*;

use tidytext::casing::{CommonLexicon, TitleLexicon};
use tidytext::config::Config;
use tidytext::{CaseMode, Options, fix_punctuation_spacing, tidy, tidy_with_lexicons};

fn options(case: CaseMode) -> Options {
    Options {
        case,
        ..Options::default()
    }
}

/// Test that tidying is idempotent (tidying twice produces same result).
#[test]
fn test_idempotent_tidy() {
    let input = "Visit https://ex.com/a?x=1,2&y=3.Please  now\u{2026}ok?\n\
                 the iphone 15 pro max ships at 10:30am ,says mr. smith.";
    for case in [CaseMode::None, CaseMode::Sentence, CaseMode::Title] {
        let options = options(case);
        let first_pass = tidy(input, &options);
        let second_pass = tidy(&first_pass, &options);
        assert_eq!(
            first_pass,
            second_pass,
            "tidy should be idempotent ({case})"
        );
    }
}

#[test]
fn test_sentence_case_pipeline() {
    let output = tidy(
        "WELCOME TO THE NASA BRIEFING .the iphone launch is at 9:15 PM,see you there!",
        &options(CaseMode::Sentence),
    );
    assert_eq!(
        output,
        "Welcome to the NASA briefing. The iPhone launch is at 9:15 pm, see you there!"
    );
}

#[test]
fn test_title_case_pipeline() {
    let output = tidy(
        "  a tale of two cities:the   ap style guide  ",
        &Options {
            trim: true,
            collapse_spaces: true,
            colon_as_sentence_punct: true,
            case: CaseMode::Title,
            ..Options::default()
        },
    );
    assert_eq!(output, "A Tale of Two Cities: The AP Style Guide");
}

#[test]
fn test_whitespace_pipeline() {
    let output = tidy(
        "First line .\r\n\r\n\r\n\r\nSecond   line",
        &Options {
            collapse_spaces: true,
            collapse_blank_lines: true,
            ..Options::default()
        },
    );
    assert_eq!(output, "First line.\n\nSecond line");

    let joined = tidy(
        "one,\ntwo",
        &Options {
            remove_line_breaks: true,
            ..Options::default()
        },
    );
    assert_eq!(joined, "one, two");
}

#[test]
fn test_configured_lexicon() {
    let config = Config::from_toml(
        r#"
[case]
mode = "sentence"

[lexicon]
acronyms = ["GDPR"]

[lexicon.proper_case]
"tidytext" = "TidyText"
"#,
    )
    .unwrap();
    let (common, title) = config.lexicons().unwrap();
    let input = "WE USE TIDYTEXT FOR GDPR NOTICES.";

    let output = tidy_with_lexicons(input, &config.to_options(), &common, &title);
    assert_eq!(output, "We use TidyText for GDPR notices.");

    let stock = tidy_with_lexicons(
        input,
        &config.to_options(),
        CommonLexicon::builtin(),
        TitleLexicon::builtin(),
    );
    assert_eq!(stock, "We use tidytext for gdpr notices.");
}

#[test]
fn test_technical_tokens_survive_every_stage() {
    let input = "see `a ,b` and me@example.com,or C:\\Temp\\x.txt,then v2.0.1.";
    let output = tidy(input, &options(CaseMode::None));
    assert_eq!(
        output,
        "see `a ,b` and me@example.com, or C:\\Temp\\x.txt, then v2.0.1."
    );
}

/// Prose mixed with the characters that start or end protected tokens.
const PROSE_AND_TOKENS: &str = "[a-zA-Z0-9 ,.!?;:'\"()\\[\\]/@`\n-]{0,40}";

proptest! {
    #[test]
    fn prop_spacing_is_idempotent(text in PROSE_AND_TOKENS) {
        let once = fix_punctuation_spacing(&text, false);
        let twice = fix_punctuation_spacing(&once, false);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_spacing_with_colon_is_idempotent(text in PROSE_AND_TOKENS) {
        let once = fix_punctuation_spacing(&text, true);
        let twice = fix_punctuation_spacing(&once, true);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_spacing_leaves_no_space_runs(text in "[a-z]{1,6}([ ,.!?;]{1,3}[a-z]{1,6}){0,8}") {
        let output = fix_punctuation_spacing(&text, false);
        prop_assert!(!output.contains("  "));
        prop_assert!(!output.contains(" ,"));
        prop_assert!(!output.ends_with(' '));
    }

    #[test]
    fn prop_colon_spacing_is_idempotent_after_punctuation(
        text in "[a-z]{0,3}([,.!?;:]{1,3} ?[a-zA-Z0-9]{0,3}){1,6}"
    ) {
        let once = fix_punctuation_spacing(&text, true);
        let twice = fix_punctuation_spacing(&once, true);
        prop_assert_eq!(twice, once);
    }
}
