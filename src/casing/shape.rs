//! Token-shape heuristics shared by the sentence-case and title-case
//! converters.

use super::Culture;

/// Letters that may follow an apostrophe in a contraction or possessive.
const CONTRACTION_TAILS: &[&str] = &["s", "t", "d", "m", "n", "ll", "re", "ve", "em"];

/// Check if a character is a straight or curly apostrophe.
pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Check if the token contains at least one decimal digit.
pub fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_numeric())
}

/// Check if `tail` (the letters after an apostrophe) is a contraction or
/// possessive ending such as `s`, `ll`, or `em`.
pub fn is_contraction_tail(tail: &str) -> bool {
    CONTRACTION_TAILS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tail))
}

/// Check if a token reads as a contraction or possessive (`it's`, `we're`,
/// `o'clock`) rather than an elided surname (`o'neill`).
pub fn looks_like_contraction_or_possessive(token: &str) -> bool {
    let Some(apos) = token.find(is_apostrophe) else {
        return false;
    };
    if apos == 0 {
        return false;
    }
    let tail_start = apos + token[apos..].chars().next().map_or(1, char::len_utf8);
    let tail = &token[tail_start..];
    if tail.is_empty() {
        return false;
    }
    if is_contraction_tail(tail) {
        return true;
    }
    let head = &token[..apos];
    head.eq_ignore_ascii_case("o") && tail.eq_ignore_ascii_case("clock")
}

/// Capitalize the first letter of the token and the first letter after each
/// apostrophe, lowercasing everything else.
///
/// A letter after an apostrophe stays lowercase when the letters up to the
/// next non-letter form a contraction tail, so `o'neill` becomes `O'Neill`
/// while `don't` becomes `Don't`.
pub fn capitalize_with_apostrophes(token: &str, culture: Culture) -> String {
    let chars: Vec<char> = token.chars().collect();
    let mut out = String::with_capacity(token.len());
    let mut cap_next = true;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphabetic() {
            if cap_next {
                culture.push_upper(&mut out, c);
            } else {
                culture.push_lower(&mut out, c);
            }
            cap_next = false;
        } else {
            out.push(c);
            cap_next = if is_apostrophe(c) {
                let tail: String = chars[i + 1..]
                    .iter()
                    .take_while(|c| c.is_alphabetic())
                    .collect();
                !tail.is_empty() && !is_contraction_tail(&tail)
            } else {
                false
            };
        }
    }
    out
}

/// Check if the token consists only of uppercase letters, with at least two.
pub fn is_all_caps_word(token: &str) -> bool {
    let mut letters = 0;
    for c in token.chars() {
        if !c.is_alphabetic() || !c.is_uppercase() {
            return false;
        }
        letters += 1;
    }
    letters >= 2
}

/// Check if the token has a deliberate mixed-case shape such as `iPhone`,
/// `eBay`, `macOS`, `OpenAI`, or `McDonald's`.
///
/// Tokens whose letters alternate case almost every character (`tEsT`) are
/// rejected as noise.
pub fn is_camel_or_mixed_case(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    let mut letters = 0usize;
    let mut uppers = 0usize;
    let mut lowers = 0usize;
    let mut transitions = 0usize;
    let mut prev_upper: Option<bool> = None;

    for &c in &chars {
        if !c.is_alphabetic() {
            continue;
        }
        letters += 1;
        let upper = c.is_uppercase();
        if upper {
            uppers += 1;
        } else {
            lowers += 1;
        }
        if let Some(prev) = prev_upper
            && prev != upper
        {
            transitions += 1;
        }
        prev_upper = Some(upper);
    }

    if uppers == 0 || lowers == 0 || transitions >= letters - 1 {
        return false;
    }

    for i in 1..chars.len().saturating_sub(1) {
        if chars[i].is_uppercase() && (chars[i - 1].is_lowercase() || chars[i + 1].is_lowercase()) {
            return true;
        }
    }

    // Lowercase prefix followed by an uppercase run: "iOS", "eID".
    let mut saw_lower_prefix = false;
    let mut saw_upper_after = false;
    for &c in &chars {
        if c.is_lowercase() {
            if !saw_upper_after {
                saw_lower_prefix = true;
            }
        } else if c.is_uppercase() && saw_lower_prefix {
            saw_upper_after = true;
        }
    }
    saw_lower_prefix && saw_upper_after
}

/// Check if the token ends with two or more consecutive uppercase letters.
pub fn ends_with_upper_run(token: &str) -> bool {
    let mut rev = token.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase()
    )
}

/// Split a trailing possessive (`'s` or `’s`) off a word.
///
/// Returns the core word and the suffix; the suffix is empty when the word is
/// not possessive.
pub fn split_possessive(word: &str) -> (&str, &str) {
    for suffix in ["'s", "'S", "\u{2019}s", "\u{2019}S"] {
        if let Some(core) = word.strip_suffix(suffix)
            && !core.is_empty()
        {
            return (core, &word[core.len()..]);
        }
    }
    (word, "")
}
