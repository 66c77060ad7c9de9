//! WebAssembly bindings for Tidytext.
//!
//! This module provides JavaScript-friendly bindings for the tidy pipeline
//! and the individual engines.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::casing::{CommonLexicon, Culture, LexiconConfig, TitleLexicon};
use crate::{CaseMode, Options};

/// JavaScript-friendly options struct.
///
/// All fields are optional and use camelCase naming for JavaScript conventions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsOptions {
    /// Trim whitespace at both ends (default: false).
    pub trim: Option<bool>,

    /// Trim leading whitespace (default: false).
    pub trim_start: Option<bool>,

    /// Trim trailing whitespace (default: false).
    pub trim_end: Option<bool>,

    /// Collapse runs of spaces (default: false).
    pub collapse_spaces: Option<bool>,

    /// Collapse consecutive blank lines (default: false).
    pub collapse_blank_lines: Option<bool>,

    /// Remove every line break (default: false).
    pub remove_line_breaks: Option<bool>,

    /// Fix spacing around punctuation (default: true).
    pub fix_spacing: Option<bool>,

    /// Space colons like sentence punctuation (default: false).
    pub colon_as_sentence_punct: Option<bool>,

    /// "none", "upper", "lower", "sentence", or "title" (default: "none").
    pub case: Option<String>,

    /// "invariant" or "turkic" (default: "invariant").
    pub culture: Option<String>,

    /// Additions to the built-in lexicons, with the same keys as the
    /// `[lexicon]` table of `.tidytext.toml`.
    pub lexicon: Option<LexiconConfig>,
}

impl JsOptions {
    /// Convert JavaScript options to Rust Options.
    fn to_options(&self) -> Result<Options, JsError> {
        let mut opts = Options::default();

        let flags = [
            (self.trim, &mut opts.trim),
            (self.trim_start, &mut opts.trim_start),
            (self.trim_end, &mut opts.trim_end),
            (self.collapse_spaces, &mut opts.collapse_spaces),
            (self.collapse_blank_lines, &mut opts.collapse_blank_lines),
            (self.remove_line_breaks, &mut opts.remove_line_breaks),
            (self.fix_spacing, &mut opts.fix_spacing),
            (self.colon_as_sentence_punct, &mut opts.colon_as_sentence_punct),
        ];
        for (value, field) in flags {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(ref v) = self.case {
            opts.case = v.parse::<CaseMode>().map_err(|e| JsError::new(&e))?;
        }
        if let Some(ref v) = self.culture {
            let culture = v.parse::<Culture>().map_err(|e| JsError::new(&e))?;
            opts.culture = culture;
            opts.sentence_case.culture = culture;
            opts.title_case.culture = culture;
        }

        Ok(opts)
    }
}

fn parse_options(options: JsValue) -> Result<JsOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        Ok(JsOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Run the tidy pipeline: whitespace cleanup, punctuation spacing, then
/// letter case.
///
/// # Arguments
///
/// * `input` - Text to tidy
/// * `options` - Optional options as a JavaScript object
#[wasm_bindgen]
pub fn tidy(input: &str, options: JsValue) -> Result<String, JsError> {
    let js_opts = parse_options(options)?;
    let opts = js_opts.to_options()?;

    match js_opts.lexicon {
        Some(ref lexicon) if !lexicon.is_empty() => {
            let common =
                CommonLexicon::extended(lexicon).map_err(|e| JsError::new(&e.to_string()))?;
            let title =
                TitleLexicon::extended(lexicon).map_err(|e| JsError::new(&e.to_string()))?;
            Ok(crate::tidy_with_lexicons(input, &opts, &common, &title))
        }
        _ => Ok(crate::tidy(input, &opts)),
    }
}

/// Convert text to sentence case with the built-in lexicon.
#[wasm_bindgen(js_name = sentenceCase)]
pub fn sentence_case(input: &str) -> String {
    crate::sentence_case(input, CommonLexicon::builtin(), &Default::default())
}

/// Convert text to AP-style title case with the built-in lexicons.
#[wasm_bindgen(js_name = titleCase)]
pub fn title_case(input: &str) -> String {
    crate::title_case(
        input,
        TitleLexicon::builtin(),
        CommonLexicon::builtin(),
        &Default::default(),
    )
}

/// Fix the spacing around punctuation.
///
/// # Arguments
///
/// * `input` - Text to fix
/// * `colon` - Whether to space colons like sentence punctuation
#[wasm_bindgen(js_name = fixPunctuationSpacing)]
pub fn fix_punctuation_spacing(input: &str, colon: bool) -> String {
    crate::fix_punctuation_spacing(input, colon)
}
