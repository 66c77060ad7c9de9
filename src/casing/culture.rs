//! Culture-sensitive case mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The casing culture used by the converters.
///
/// Only the dotted/dotless `i` differs between the two cultures; every other
/// character follows the Unicode default case mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    /// Locale-independent mapping (default).
    #[default]
    Invariant,
    /// Turkish and Azerbaijani: `i` ↔ `İ` and `ı` ↔ `I`.
    Turkic,
}

impl Culture {
    /// Appends the uppercase form of `c` to `out`.
    pub fn push_upper(self, out: &mut String, c: char) {
        match (self, c) {
            (Culture::Turkic, 'i') => out.push('\u{130}'),
            (Culture::Turkic, '\u{131}') => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }

    /// Appends the lowercase form of `c` to `out`.
    pub fn push_lower(self, out: &mut String, c: char) {
        match (self, c) {
            (Culture::Turkic, 'I') => out.push('\u{131}'),
            (Culture::Turkic, '\u{130}') => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }

    /// Returns `s` in uppercase.
    pub fn to_upper(self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            self.push_upper(&mut out, c);
        }
        out
    }

    /// Returns `s` in lowercase.
    pub fn to_lower(self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            self.push_lower(&mut out, c);
        }
        out
    }

    /// Uppercases the first character and lowercases the rest.
    pub fn upper_first_lower_rest(self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        if let Some(first) = chars.next() {
            self.push_upper(&mut out, first);
        }
        for c in chars {
            self.push_lower(&mut out, c);
        }
        out
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Culture::Invariant => write!(f, "invariant"),
            Culture::Turkic => write!(f, "turkic"),
        }
    }
}

impl FromStr for Culture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "invariant" | "" => Ok(Culture::Invariant),
            "turkic" | "tr" | "az" => Ok(Culture::Turkic),
            other => Err(format!(
                "unknown culture '{}': expected 'invariant' or 'turkic'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_mapping() {
        assert_eq!(Culture::Invariant.to_upper("istanbul"), "ISTANBUL");
        assert_eq!(Culture::Invariant.to_lower("ISTANBUL"), "istanbul");
    }

    #[test]
    fn test_turkic_dotted_i() {
        assert_eq!(Culture::Turkic.to_upper("istanbul"), "\u{130}STANBUL");
        assert_eq!(Culture::Turkic.to_lower("ISPARTA"), "\u{131}sparta");
        assert_eq!(Culture::Turkic.to_lower("\u{130}zmir"), "izmir");
    }

    #[test]
    fn test_upper_first_lower_rest() {
        assert_eq!(Culture::Invariant.upper_first_lower_rest("hELLO"), "Hello");
        assert_eq!(Culture::Invariant.upper_first_lower_rest("ß"), "SS");
        assert_eq!(Culture::Invariant.upper_first_lower_rest(""), "");
    }

    #[test]
    fn test_parse_culture() {
        assert_eq!("Turkic".parse::<Culture>(), Ok(Culture::Turkic));
        assert_eq!("invariant".parse::<Culture>(), Ok(Culture::Invariant));
        assert!("klingon".parse::<Culture>().is_err());
    }
}
