//! Word lists that drive the casing converters.
//!
//! The converters only see the [`SentenceCaseLexicon`] and
//! [`TitleCaseLexicon`] traits, so callers can plug in their own word lists.
//! [`CommonLexicon`] and [`TitleLexicon`] are the stock implementations; both
//! are immutable once built and can be shared freely between threads.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::shape::{is_all_caps_word, split_possessive};

/// Lookups used by the sentence-case converter (and, for acronyms and
/// canonical brand spellings, by the title-case converter).
///
/// Abbreviation, proper-noun, brand, and honorific lookups ignore case.
/// Stopword and acronym lookups are exact.
pub trait SentenceCaseLexicon: Send + Sync {
    /// Dotted abbreviations that do not end a sentence, compared without
    /// the trailing dot (`p.m`, `e.g`, `mr`).
    fn is_non_terminal_abbreviation(&self, word: &str) -> bool;

    /// Short ALL-CAPS words that must never be mistaken for acronyms.
    fn is_upper_short_stopword(&self, word: &str) -> bool;

    /// Whitelisted ALL-CAPS acronyms.
    fn is_upper_acronym(&self, word: &str) -> bool;

    /// Names that are title-cased mid-sentence.
    fn is_proper_case_token(&self, word: &str) -> bool;

    /// Model-family markers after which a brand suffix is capitalized.
    fn is_brand_token(&self, word: &str) -> bool;

    /// Qualifiers such as `Pro` or `Max`.
    fn is_brand_suffix(&self, word: &str) -> bool;

    /// Titles such as `Mr` or `Dr` whose following word is a name.
    fn is_honorific(&self, word: &str) -> bool;

    /// Looks up the canonical spelling for a lowercase key that uses straight
    /// apostrophes.
    fn proper_case(&self, key: &str) -> Option<&str>;

    /// Returns the canonical spelling of `word`, if any.
    ///
    /// The lookup ignores case, treats `’` like `'`, and keeps a possessive
    /// suffix: `mcdonald’s` becomes `McDonald’s`.
    fn canonical_case(&self, word: &str) -> Option<String> {
        let curly = word.contains('\u{2019}');
        let restyle = |s: &str| {
            if curly {
                s.replace('\'', "\u{2019}")
            } else {
                s.to_string()
            }
        };
        let key = word.to_lowercase().replace('\u{2019}', "'");
        if let Some(found) = self.proper_case(&key) {
            return Some(restyle(found));
        }
        let (core, suffix) = split_possessive(word);
        if suffix.is_empty() {
            return None;
        }
        let key = core.to_lowercase().replace('\u{2019}', "'");
        let found = self.proper_case(&key)?;
        let mut out = restyle(found);
        out.push_str(&suffix.to_lowercase());
        Some(out)
    }
}

/// Lookups used only by the title-case converter.
pub trait TitleCaseLexicon: Send + Sync {
    /// Articles, conjunctions, and short prepositions (case-insensitive).
    fn is_small_word(&self, word: &str) -> bool;

    /// Tokens that are never rewritten (exact match).
    fn is_protected(&self, word: &str) -> bool;
}

const NON_TERMINAL_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "v", "etc", "e.g", "eg", "i.e", "ie",
    "a.m", "am", "p.m", "pm", "u.s", "u.s.a", "usa", "u.k", "uk", "u.n", "un", "ai", "a.i",
];

const UPPER_SHORT_STOPWORDS: &[&str] = &[
    // articles, conjunctions, prepositions
    "A", "AN", "THE", "AND", "OR", "NOR", "BUT", "SO", "TO", "IN", "ON", "AT", "OF", "BY", "AS",
    "IS", "AM", "ARE", "WAS", "WERE", "BE", "BEEN", "DO", "DID", "DONE", "FOR", "FROM", "WITH",
    "WITHOUT", "OVER", "UNDER", "OUT", "OFF", "UP", "DOWN", "NEW", "ALL", "ANY", "NOT", "ONE",
    "TWO", // pronouns and determiners
    "I", "ME", "MY", "YOU", "YOUR", "WE", "US", "OUR", "HE", "HIM", "HIS", "SHE", "HER", "IT",
    "ITS", "THEY", "THEM", "THEIR", "THIS", "THAT", "THESE", "THOSE", // misc
    "IF", "THAN", "THEN", "PER", "ET", "AL", "CAN", "MAY", "HAS", "HAD",
];

const UPPER_ACRONYMS: &[&str] = &[
    "AI", "ML", "AP", "API", "SDK", "CLI", "UI", "UX", "ID", "IP", "DNS", "TCP", "UDP", "SSL",
    "TLS", "SSH", "CPU", "GPU", "RAM", "ROM", "SSD", "HDD", "USB", "WPF", "GPT", "USA", "UK",
    "EU", "UN", "UAE", "SLS", "NASA", "HTTP", "HTTPS", "HTML", "JSON", "XML", "SQL", "UUID",
    "GUID", "JPEG", "PNG", "WASM", "WLAN", "SSID",
];

const PROPER_CASE_TOKENS: &[&str] = &["Claude", "Sonnet", "Gemini"];

const BRAND_TOKENS: &[&str] = &[
    "Claude", "Gemini", "iPhone", "iPad", "Pixel", "Galaxy", "MacBook", "ThinkPad",
];

const BRAND_SUFFIXES: &[&str] = &["Pro", "Max", "Ultra", "Plus", "Mini"];

const HONORIFIC_BASES: &[&str] = &[
    "mr", "mrs", "ms", "mx", "dr", "prof", "sr", "jr", "st", "rev", "hon", "gen", "capt", "sgt",
    "lt", "col", "gov", "sen", "rep", "pres", "fr",
];

const PROPER_CASE_MAP: &[&str] = &[
    "iPhone",
    "iPad",
    "iPod",
    "iOS",
    "iPadOS",
    "macOS",
    "watchOS",
    "tvOS",
    "iCloud",
    "iTunes",
    "eBay",
    "YouTube",
    "OpenAI",
    "ChatGPT",
    "GitHub",
    "GitLab",
    "LinkedIn",
    "PayPal",
    "PlayStation",
    "WordPress",
    "JavaScript",
    "TypeScript",
    "PowerPoint",
    "PowerShell",
    "McDonald",
    "MacDonald",
    "MacBook",
    "ThinkPad",
    "DeepMind",
    "FedEx",
    "WhatsApp",
];

const SMALL_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "for", "nor", "or", "so", "yet", "as", "at", "by", "in", "of",
    "off", "on", "per", "to", "up", "via", "vs",
];

/// An error in a custom lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// An entry in the named table is empty.
    Empty(&'static str),
    /// An entry in the named table contains whitespace.
    Whitespace(&'static str, String),
    /// An acronym is not written as two or more uppercase letters.
    NotAnAcronym(String),
    /// A canonical spelling is not a recasing of its key.
    ProperCaseMismatch(String, String),
}

impl std::fmt::Display for LexiconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexiconError::Empty(table) => write!(f, "empty entry in lexicon table '{}'", table),
            LexiconError::Whitespace(table, entry) => {
                write!(
                    f,
                    "entry '{}' in lexicon table '{}' contains whitespace",
                    entry, table
                )
            }
            LexiconError::NotAnAcronym(entry) => {
                write!(
                    f,
                    "acronym '{}' must be at least two uppercase letters",
                    entry
                )
            }
            LexiconError::ProperCaseMismatch(key, value) => {
                write!(
                    f,
                    "canonical spelling '{}' does not match key '{}'",
                    value, key
                )
            }
        }
    }
}

impl std::error::Error for LexiconError {}

/// Additions to the built-in lexicons, usually read from the `[lexicon]`
/// table of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Dotted abbreviations that do not end a sentence (`approx`, `i.e`).
    pub abbreviations: Vec<String>,

    /// ALL-CAPS words that are never acronyms.
    pub stopwords: Vec<String>,

    /// ALL-CAPS acronyms to preserve.
    pub acronyms: Vec<String>,

    /// Names to title-case mid-sentence.
    pub proper_nouns: Vec<String>,

    /// Brand or model-family names.
    pub brands: Vec<String>,

    /// Model qualifiers capitalized after a brand or a number.
    pub brand_suffixes: Vec<String>,

    /// Titles whose following word is a name.
    pub honorifics: Vec<String>,

    /// Canonical spellings keyed by their lowercase form.
    pub proper_case: IndexMap<String, String>,

    /// Words lowercased inside titles.
    pub small_words: Vec<String>,

    /// Tokens the title-case converter never rewrites.
    pub protected: Vec<String>,
}

impl LexiconConfig {
    /// Check if no additions are configured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Export the full contents of the given lexicons.
    pub fn from_lexicons(common: &CommonLexicon, title: &TitleLexicon) -> Self {
        let list = |set: &IndexSet<String>| set.iter().cloned().collect::<Vec<_>>();
        Self {
            abbreviations: list(&common.non_terminal_abbreviations),
            stopwords: list(&common.upper_short_stopwords),
            acronyms: list(&common.upper_acronyms),
            proper_nouns: list(&common.proper_case_tokens),
            brands: list(&common.brand_tokens),
            brand_suffixes: list(&common.brand_suffixes),
            honorifics: list(&common.honorific_bases),
            proper_case: common.proper_case_map.clone(),
            small_words: list(&title.small_words),
            protected: list(&title.protected_as_is),
        }
    }
}

fn check_entry(table: &'static str, entry: &str) -> Result<(), LexiconError> {
    if entry.trim().is_empty() {
        return Err(LexiconError::Empty(table));
    }
    if entry.chars().any(char::is_whitespace) {
        return Err(LexiconError::Whitespace(table, entry.to_string()));
    }
    Ok(())
}

fn extend_folded(
    set: &mut IndexSet<String>,
    table: &'static str,
    entries: &[String],
) -> Result<(), LexiconError> {
    for entry in entries {
        check_entry(table, entry)?;
        set.insert(entry.trim_end_matches('.').to_lowercase());
    }
    Ok(())
}

fn extend_exact(
    set: &mut IndexSet<String>,
    table: &'static str,
    entries: &[String],
) -> Result<(), LexiconError> {
    for entry in entries {
        check_entry(table, entry)?;
        set.insert(entry.clone());
    }
    Ok(())
}

fn folded(words: &[&str]) -> IndexSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn exact(words: &[&str]) -> IndexSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// The stock sentence-case lexicon.
#[derive(Debug, Clone)]
pub struct CommonLexicon {
    non_terminal_abbreviations: IndexSet<String>,
    upper_short_stopwords: IndexSet<String>,
    upper_acronyms: IndexSet<String>,
    proper_case_tokens: IndexSet<String>,
    brand_tokens: IndexSet<String>,
    brand_suffixes: IndexSet<String>,
    honorific_bases: IndexSet<String>,
    proper_case_map: IndexMap<String, String>,
}

static BUILTIN_COMMON: LazyLock<CommonLexicon> = LazyLock::new(|| CommonLexicon {
    non_terminal_abbreviations: folded(NON_TERMINAL_ABBREVIATIONS),
    upper_short_stopwords: exact(UPPER_SHORT_STOPWORDS),
    upper_acronyms: exact(UPPER_ACRONYMS),
    proper_case_tokens: folded(PROPER_CASE_TOKENS),
    brand_tokens: folded(BRAND_TOKENS),
    brand_suffixes: folded(BRAND_SUFFIXES),
    honorific_bases: folded(HONORIFIC_BASES),
    proper_case_map: PROPER_CASE_MAP
        .iter()
        .map(|v| (v.to_lowercase(), (*v).to_string()))
        .collect(),
});

impl CommonLexicon {
    /// The process-wide built-in lexicon.
    pub fn builtin() -> &'static CommonLexicon {
        &BUILTIN_COMMON
    }

    /// Build a new lexicon from the built-in one plus the given additions.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is empty, contains whitespace, is an
    /// acronym that is not ALL-CAPS, or is a canonical spelling that does not
    /// match its key.
    pub fn extended(config: &LexiconConfig) -> Result<Self, LexiconError> {
        let mut lexicon = Self::builtin().clone();
        extend_folded(
            &mut lexicon.non_terminal_abbreviations,
            "abbreviations",
            &config.abbreviations,
        )?;
        extend_exact(
            &mut lexicon.upper_short_stopwords,
            "stopwords",
            &config.stopwords,
        )?;
        for acronym in &config.acronyms {
            check_entry("acronyms", acronym)?;
            if !is_all_caps_word(acronym) {
                return Err(LexiconError::NotAnAcronym(acronym.clone()));
            }
            lexicon.upper_acronyms.insert(acronym.clone());
        }
        extend_folded(
            &mut lexicon.proper_case_tokens,
            "proper_nouns",
            &config.proper_nouns,
        )?;
        extend_folded(&mut lexicon.brand_tokens, "brands", &config.brands)?;
        extend_folded(
            &mut lexicon.brand_suffixes,
            "brand_suffixes",
            &config.brand_suffixes,
        )?;
        extend_folded(
            &mut lexicon.honorific_bases,
            "honorifics",
            &config.honorifics,
        )?;
        for (key, value) in &config.proper_case {
            check_entry("proper_case", key)?;
            check_entry("proper_case", value)?;
            let key = key.to_lowercase().replace('\u{2019}', "'");
            if value.to_lowercase().replace('\u{2019}', "'") != key {
                return Err(LexiconError::ProperCaseMismatch(key, value.clone()));
            }
            lexicon.proper_case_map.insert(key, value.clone());
        }
        log::debug!(
            "Extended lexicon: {} acronyms, {} canonical spellings",
            lexicon.upper_acronyms.len(),
            lexicon.proper_case_map.len()
        );
        Ok(lexicon)
    }
}

impl SentenceCaseLexicon for CommonLexicon {
    fn is_non_terminal_abbreviation(&self, word: &str) -> bool {
        self.non_terminal_abbreviations
            .contains(&word.to_lowercase())
    }

    fn is_upper_short_stopword(&self, word: &str) -> bool {
        self.upper_short_stopwords.contains(word)
    }

    fn is_upper_acronym(&self, word: &str) -> bool {
        self.upper_acronyms.contains(word)
    }

    fn is_proper_case_token(&self, word: &str) -> bool {
        self.proper_case_tokens.contains(&word.to_lowercase())
    }

    fn is_brand_token(&self, word: &str) -> bool {
        self.brand_tokens.contains(&word.to_lowercase())
    }

    fn is_brand_suffix(&self, word: &str) -> bool {
        self.brand_suffixes.contains(&word.to_lowercase())
    }

    fn is_honorific(&self, word: &str) -> bool {
        self.honorific_bases.contains(&word.to_lowercase())
    }

    fn proper_case(&self, key: &str) -> Option<&str> {
        self.proper_case_map.get(key).map(String::as_str)
    }
}

/// The stock title-case lexicon (AP headline style).
#[derive(Debug, Clone)]
pub struct TitleLexicon {
    small_words: IndexSet<String>,
    protected_as_is: IndexSet<String>,
}

static BUILTIN_TITLE: LazyLock<TitleLexicon> = LazyLock::new(|| TitleLexicon {
    small_words: folded(SMALL_WORDS),
    protected_as_is: IndexSet::new(),
});

impl TitleLexicon {
    /// The process-wide built-in lexicon.
    pub fn builtin() -> &'static TitleLexicon {
        &BUILTIN_TITLE
    }

    /// Build a new lexicon from the built-in one plus the given additions.
    ///
    /// # Errors
    ///
    /// Returns an error if a small word or protected token is empty or
    /// contains whitespace.
    pub fn extended(config: &LexiconConfig) -> Result<Self, LexiconError> {
        let mut lexicon = Self::builtin().clone();
        extend_folded(&mut lexicon.small_words, "small_words", &config.small_words)?;
        extend_exact(&mut lexicon.protected_as_is, "protected", &config.protected)?;
        Ok(lexicon)
    }
}

impl TitleCaseLexicon for TitleLexicon {
    fn is_small_word(&self, word: &str) -> bool {
        self.small_words.contains(&word.to_lowercase())
    }

    fn is_protected(&self, word: &str) -> bool {
        self.protected_as_is.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookups() {
        let lex = CommonLexicon::builtin();
        assert!(lex.is_non_terminal_abbreviation("P.M"));
        assert!(lex.is_non_terminal_abbreviation("a.i"));
        assert!(!lex.is_non_terminal_abbreviation("us"));
        assert!(lex.is_upper_acronym("GPU"));
        assert!(!lex.is_upper_acronym("gpu"));
        assert!(lex.is_upper_short_stopword("THE"));
        assert!(!lex.is_upper_short_stopword("the"));
        assert!(lex.is_brand_token("iphone"));
        assert!(lex.is_brand_suffix("PRO"));
        assert!(lex.is_honorific("Dr"));
        assert!(lex.is_proper_case_token("claude"));
    }

    #[test]
    fn test_canonical_case() {
        let lex = CommonLexicon::builtin();
        assert_eq!(lex.canonical_case("IPHONE").as_deref(), Some("iPhone"));
        assert_eq!(
            lex.canonical_case("macdonald's").as_deref(),
            Some("MacDonald's")
        );
        assert_eq!(
            lex.canonical_case("mcdonald\u{2019}s").as_deref(),
            Some("McDonald\u{2019}s")
        );
        assert_eq!(lex.canonical_case("pixel"), None);
    }

    #[test]
    fn test_title_lexicon() {
        let lex = TitleLexicon::builtin();
        assert!(lex.is_small_word("The"));
        assert!(lex.is_small_word("vs"));
        assert!(!lex.is_small_word("is"));
        assert!(!lex.is_protected("anything"));
    }

    #[test]
    fn test_extended_lexicon() {
        let config = LexiconConfig {
            acronyms: vec!["NATO".to_string()],
            abbreviations: vec!["approx.".to_string()],
            proper_case: IndexMap::from([("kubectl".to_string(), "kubectl".to_string())]),
            ..LexiconConfig::default()
        };
        let lex = CommonLexicon::extended(&config).unwrap();
        assert!(lex.is_upper_acronym("NATO"));
        assert!(lex.is_non_terminal_abbreviation("approx"));
        assert_eq!(lex.canonical_case("KUBECTL").as_deref(), Some("kubectl"));
        assert!(!CommonLexicon::builtin().is_upper_acronym("NATO"));
    }

    #[test]
    fn test_extended_lexicon_rejects_bad_entries() {
        let bad_acronym = LexiconConfig {
            acronyms: vec!["Nato".to_string()],
            ..LexiconConfig::default()
        };
        assert_eq!(
            CommonLexicon::extended(&bad_acronym).unwrap_err(),
            LexiconError::NotAnAcronym("Nato".to_string())
        );

        let spaced = LexiconConfig {
            small_words: vec!["out of".to_string()],
            ..LexiconConfig::default()
        };
        assert!(matches!(
            TitleLexicon::extended(&spaced),
            Err(LexiconError::Whitespace("small_words", _))
        ));

        let empty = LexiconConfig {
            brands: vec!["  ".to_string()],
            ..LexiconConfig::default()
        };
        assert_eq!(
            CommonLexicon::extended(&empty).unwrap_err(),
            LexiconError::Empty("brands")
        );

        let mismatch = LexiconConfig {
            proper_case: IndexMap::from([("ios".to_string(), "macOS".to_string())]),
            ..LexiconConfig::default()
        };
        assert!(matches!(
            CommonLexicon::extended(&mismatch),
            Err(LexiconError::ProperCaseMismatch(_, _))
        ));
    }

    #[test]
    fn test_export_round_trip() {
        let exported =
            LexiconConfig::from_lexicons(CommonLexicon::builtin(), TitleLexicon::builtin());
        assert_eq!(exported.acronyms.first().map(String::as_str), Some("AI"));
        assert_eq!(
            exported.proper_case.get("iphone").map(String::as_str),
            Some("iPhone")
        );
        assert!(!exported.is_empty());
        assert!(LexiconConfig::default().is_empty());
    }
}
