//! Scanners for spans that punctuation spacing must not touch.
//!
//! Each scanner looks at `chars[i..]` and, when a span of its kind starts at
//! `i`, returns the index just past its end.  Scanners never look at the
//! output being built, only at the input.

/// Left double quotation mark (U+201C)
pub const LEFT_DOUBLE_QUOTE: char = '\u{201C}';
/// Right double quotation mark (U+201D)
pub const RIGHT_DOUBLE_QUOTE: char = '\u{201D}';
/// Left single quotation mark (U+2018)
pub const LEFT_SINGLE_QUOTE: char = '\u{2018}';
/// Right single quotation mark (U+2019), also used as curly apostrophe
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';
/// Left-pointing double angle quotation mark (U+00AB)
pub const LEFT_GUILLEMET: char = '\u{AB}';
/// Right-pointing double angle quotation mark (U+00BB)
pub const RIGHT_GUILLEMET: char = '\u{BB}';
/// Horizontal ellipsis (U+2026)
pub const ELLIPSIS: char = '\u{2026}';

/// Check if a character is a letter, digit, or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check if a character is one of `, . ! ? ;`.
pub fn is_sentence_punct(c: char) -> bool {
    matches!(c, ',' | '.' | '!' | '?' | ';')
}

/// Check if a character always closes a bracket or quote.
pub fn is_closer(c: char) -> bool {
    matches!(
        c,
        ')' | ']' | '}' | RIGHT_GUILLEMET | RIGHT_DOUBLE_QUOTE | RIGHT_SINGLE_QUOTE
    )
}

/// Check if a character can open a quotation.
pub fn is_opening_quote(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | LEFT_DOUBLE_QUOTE | LEFT_SINGLE_QUOTE | LEFT_GUILLEMET
    )
}

pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == RIGHT_SINGLE_QUOTE
}

/// Punctuation that clings to the end of a URL or path in prose.
fn is_trailing_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | '!'
            | '?'
            | ';'
            | ':'
            | ')'
            | ']'
            | '}'
            | '"'
            | '\''
            | RIGHT_GUILLEMET
            | RIGHT_DOUBLE_QUOTE
            | RIGHT_SINGLE_QUOTE
            | ELLIPSIS
    )
}

/// Characters that end a filesystem path.
fn is_path_stop(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | ';'
                | '!'
                | '?'
                | ':'
                | ')'
                | ']'
                | '}'
                | '"'
                | '\''
                | RIGHT_GUILLEMET
                | RIGHT_DOUBLE_QUOTE
                | RIGHT_SINGLE_QUOTE
                | ELLIPSIS
        )
}

fn at(chars: &[char], i: usize) -> Option<char> {
    chars.get(i).copied()
}

fn prev(chars: &[char], i: usize) -> Option<char> {
    i.checked_sub(1).map(|p| chars[p])
}

fn starts_with(chars: &[char], i: usize, pattern: &str) -> bool {
    let mut j = i;
    for p in pattern.chars() {
        match chars.get(j) {
            Some(c) if c.eq_ignore_ascii_case(&p) => j += 1,
            _ => return false,
        }
    }
    true
}

fn digits_end(chars: &[char], i: usize, max: usize) -> usize {
    let mut j = i;
    while j < chars.len() && j - i < max && chars[j].is_ascii_digit() {
        j += 1;
    }
    j
}

/// A fenced (```` ``` ````) or inline (`` ` ``) code span.
///
/// A fence runs to the matching fence or the end of the text; an inline span
/// runs to the next backtick or stops before a line break.
pub fn code_span(chars: &[char], i: usize) -> Option<usize> {
    if at(chars, i) != Some('`') {
        return None;
    }
    if starts_with(chars, i, "```") {
        let mut j = i + 3;
        while j < chars.len() {
            if starts_with(chars, j, "```") {
                return Some(j + 3);
            }
            j += 1;
        }
        return Some(chars.len());
    }
    let mut j = i + 1;
    while j < chars.len() && chars[j] != '`' && chars[j] != '\n' {
        j += 1;
    }
    if at(chars, j) == Some('`') {
        j += 1;
    }
    Some(j)
}

/// A URL with an explicit scheme (`https://`, `ftp://`, …) or starting with
/// `www.`.
pub fn url(chars: &[char], i: usize) -> Option<usize> {
    if prev(chars, i).is_some_and(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '+')) {
        return None;
    }
    if starts_with(chars, i, "www.") {
        return Some(url_end(chars, i, i + 4));
    }
    if !at(chars, i).is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut j = i + 1;
    let is_scheme_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.');
    while at(chars, j).is_some_and(is_scheme_char) {
        j += 1;
    }
    if starts_with(chars, j, "://") {
        Some(url_end(chars, i, j + 3))
    } else {
        None
    }
}

/// Find the end of a URL whose body starts at `body`.
///
/// The walk stops at whitespace, at a comma or semicolon that is followed by
/// a letter or an opening quote, and before a period that sits between a
/// digit or closer and a letter.  Trailing punctuation is then dropped unless
/// it balances an opener inside the URL.
fn url_end(chars: &[char], start: usize, body: usize) -> usize {
    let n = chars.len();
    let mut j = body;

    // Bracketed IPv6 host: http://[2001:db8::1]:443
    if at(chars, j) == Some('[')
        && let Some(close) = chars[j..].iter().position(|&c| c == ']')
        && !chars[j..j + close].iter().any(|c| c.is_whitespace())
    {
        j += close + 1;
    }

    while j < n && !chars[j].is_whitespace() {
        let c = chars[j];
        let next = at(chars, j + 1);
        if matches!(c, ',' | ';')
            && next.is_some_and(|c| c.is_alphabetic() || is_opening_quote(c))
        {
            break;
        }
        if c == '.'
            && j > body
            && (chars[j - 1].is_ascii_digit() || is_closer(chars[j - 1]))
            && next.is_some_and(char::is_alphabetic)
        {
            break;
        }
        j += 1;
    }

    trim_trailing_punct(chars, start, body, j)
}

fn trim_trailing_punct(chars: &[char], start: usize, body: usize, end: usize) -> usize {
    let mut k = end;
    while k > body && is_trailing_punct(chars[k - 1]) {
        let inner = &chars[start..k - 1];
        let keep = match chars[k - 1] {
            ')' => unmatched_opener(inner, '(', ')'),
            ']' => unmatched_opener(inner, '[', ']'),
            '}' => unmatched_opener(inner, '{', '}'),
            _ => false,
        };
        if keep {
            break;
        }
        k -= 1;
    }
    k
}

fn unmatched_opener(span: &[char], open: char, close: char) -> bool {
    let opens = span.iter().filter(|&&c| c == open).count();
    let closes = span.iter().filter(|&&c| c == close).count();
    opens > closes
}

/// A Windows drive path (`C:\Temp`, `D:/data`) or a root-relative path
/// (`/usr/bin`).
pub fn path(chars: &[char], i: usize) -> Option<usize> {
    if prev(chars, i).is_some_and(is_word_char) {
        return None;
    }
    let c = at(chars, i)?;
    let body = if c.is_ascii_alphabetic()
        && at(chars, i + 1) == Some(':')
        && matches!(at(chars, i + 2), Some('\\' | '/'))
    {
        i + 3
    } else if c == '/'
        && at(chars, i + 1).is_some_and(|c| c != '/' && !c.is_whitespace())
        && prev(chars, i) != Some('/')
    {
        i + 1
    } else {
        return None;
    };
    let mut j = body;
    while j < chars.len() && !is_path_stop(chars[j]) {
        j += 1;
    }
    Some(trim_trailing_punct(chars, i, body, j))
}

/// A dotted-quad IPv4 address.
fn ipv4(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i;
    for octet in 0..4 {
        if octet > 0 {
            if at(chars, j) != Some('.') {
                return None;
            }
            j += 1;
        }
        let end = digits_end(chars, j, 3);
        if end == j || at(chars, end).is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }
        j = end;
    }
    Some(j)
}

/// An IPv6 literal such as `2001:db8::1` or `::ffff:192.0.2.128`.
pub fn ipv6(chars: &[char], i: usize) -> Option<usize> {
    if prev(chars, i).is_some_and(|c| c.is_alphanumeric() || matches!(c, ':' | '.' | '_')) {
        return None;
    }

    let mut j = i;
    let mut groups = 0;
    let mut compressed = false;
    let mut ipv4_tail = false;
    let mut saw_digit = false;

    if starts_with(chars, j, "::") {
        compressed = true;
        j += 2;
    }
    loop {
        if j > i
            && chars[j - 1] == ':'
            && let Some(end) = ipv4(chars, j)
        {
            j = end;
            ipv4_tail = true;
            break;
        }
        let group_start = j;
        while j < chars.len() && j - group_start < 4 && chars[j].is_ascii_hexdigit() {
            j += 1;
        }
        if j == group_start {
            break;
        }
        if at(chars, j).is_some_and(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        groups += 1;
        saw_digit |= chars[group_start..j].iter().any(char::is_ascii_digit);

        if starts_with(chars, j, "::") {
            if compressed {
                return None;
            }
            compressed = true;
            j += 2;
        } else if at(chars, j) == Some(':')
            && at(chars, j + 1).is_some_and(|c| c.is_ascii_hexdigit())
        {
            j += 1;
        } else {
            break;
        }
    }

    let qualifies = ipv4_tail || compressed || (groups >= 2 && saw_digit);
    if !qualifies || j == i {
        return None;
    }
    let next = at(chars, j);
    if next.is_some_and(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    if next == Some('.') && at(chars, j + 1).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(j)
}

/// Scan dot-separated domain labels starting at `i`.
///
/// Returns the end of the last label and the number of dots.  A dot is only
/// consumed when a label follows it, so a sentence-ending period stays out.
fn domain_labels(chars: &[char], i: usize) -> Option<(usize, usize)> {
    if !at(chars, i).is_some_and(char::is_alphanumeric) {
        return None;
    }
    let mut j = i;
    let mut dots = 0;
    while j < chars.len() {
        let c = chars[j];
        if c.is_alphanumeric() || c == '-' {
            j += 1;
        } else if c == '.' && at(chars, j + 1).is_some_and(char::is_alphanumeric) {
            dots += 1;
            j += 1;
        } else {
            break;
        }
    }
    Some((j, dots))
}

/// Return the top-level label of a domain ending at `end`, if it is made of
/// two or more letters.
fn letter_tld(chars: &[char], end: usize) -> Option<&[char]> {
    let start = chars[..end]
        .iter()
        .rposition(|&c| c == '.')
        .map_or(0, |p| p + 1);
    let tld = &chars[start..end];
    (tld.len() >= 2 && tld.iter().all(|c| c.is_alphabetic())).then_some(tld)
}

fn is_email_local_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

/// An email address: `local@label.tld`.
pub fn email(chars: &[char], i: usize) -> Option<usize> {
    if prev(chars, i).is_some_and(is_email_local_char)
        || !at(chars, i).is_some_and(is_email_local_char)
    {
        return None;
    }
    let mut j = i;
    while j < chars.len() && is_email_local_char(chars[j]) {
        j += 1;
    }
    if at(chars, j) != Some('@') {
        return None;
    }
    let (end, dots) = domain_labels(chars, j + 1)?;
    if dots == 0 {
        return None;
    }
    letter_tld(chars, end)?;
    Some(end)
}

/// A bare domain such as `example.co.uk` or `EXAMPLE.COM`.
///
/// The top-level label must be lowercase unless the whole domain is
/// uppercase, so that `done.Next` is not mistaken for a domain.
pub fn domain(chars: &[char], i: usize) -> Option<usize> {
    let joined = |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@');
    if prev(chars, i).is_some_and(joined) {
        return None;
    }
    let (end, dots) = domain_labels(chars, i)?;
    if dots == 0 || at(chars, end) == Some('_') {
        return None;
    }
    let tld = letter_tld(chars, end)?;
    let tld_lower = tld.iter().all(|c| c.is_lowercase());
    let all_upper = chars[i..end]
        .iter()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase());
    (tld_lower || all_upper).then_some(end)
}

/// A version string: `1.2`, `v1.2.3`.
pub fn version(chars: &[char], i: usize) -> Option<usize> {
    let mut j = i;
    if matches!(at(chars, j), Some('v' | 'V')) {
        if prev(chars, i).is_some_and(char::is_alphanumeric) {
            return None;
        }
        j += 1;
    }
    let end = digits_end(chars, j, usize::MAX);
    if end == j {
        return None;
    }
    j = end;
    let mut groups = 0;
    while at(chars, j) == Some('.') {
        let end = digits_end(chars, j + 1, usize::MAX);
        if end == j + 1 {
            break;
        }
        j = end;
        groups += 1;
    }
    (groups > 0).then_some(j)
}

/// A number with thousands separators or a decimal part: `1,234.56`, `3,5`.
pub fn decimal(chars: &[char], i: usize) -> Option<usize> {
    let mut j = digits_end(chars, i, usize::MAX);
    if j == i {
        return None;
    }
    let mut separated = false;
    while at(chars, j) == Some(',') && at(chars, j + 1).is_some_and(|c| c.is_ascii_digit()) {
        j = digits_end(chars, j + 1, usize::MAX);
        separated = true;
    }
    if matches!(at(chars, j), Some('.' | ','))
        && at(chars, j + 1).is_some_and(|c| c.is_ascii_digit())
    {
        j = digits_end(chars, j + 1, usize::MAX);
        separated = true;
    }
    separated.then_some(j)
}

/// A time or ratio: `4:3`, `10:30`, `10:30:05`, `10:30 am`, `9:15PM`.
pub fn time(chars: &[char], i: usize) -> Option<usize> {
    let hours = digits_end(chars, i, 2);
    if hours == i || at(chars, hours) != Some(':') {
        return None;
    }
    let minutes = digits_end(chars, hours + 1, 2);
    if minutes == hours + 1 {
        return None;
    }
    let mut j = minutes;
    if at(chars, j) == Some(':') {
        let seconds = digits_end(chars, j + 1, 2);
        if seconds == j + 3 {
            j = seconds;
        }
    }
    let mut k = j;
    while at(chars, k) == Some(' ') {
        k += 1;
    }
    if matches!(at(chars, k), Some('a' | 'A' | 'p' | 'P'))
        && matches!(at(chars, k + 1), Some('m' | 'M'))
        && !at(chars, k + 2).is_some_and(char::is_alphabetic)
    {
        j = k + 2;
    }
    Some(j)
}

/// An ellipsis: `…` or three or more periods.
pub fn ellipsis(chars: &[char], i: usize) -> Option<usize> {
    if at(chars, i) == Some(ELLIPSIS) {
        return Some(i + 1);
    }
    if !starts_with(chars, i, "...") {
        return None;
    }
    let mut j = i + 3;
    while at(chars, j) == Some('.') {
        j += 1;
    }
    Some(j)
}

/// A dotted abbreviation of two or more letter-period pairs: `e.g.`,
/// `U.S.A.`.
pub fn dotted_abbreviation(chars: &[char], i: usize) -> Option<usize> {
    if prev(chars, i).is_some_and(char::is_alphanumeric) {
        return None;
    }
    let mut j = i;
    let mut pairs = 0;
    while at(chars, j).is_some_and(|c| c.is_ascii_alphabetic()) && at(chars, j + 1) == Some('.') {
        pairs += 1;
        j += 2;
    }
    (pairs >= 2).then_some(j)
}

/// Check if the letters after an apostrophe at `i` form a contraction tail
/// (`’s`, `’ll`, `’re`) that ends the word.
pub fn contraction_tail_follows(chars: &[char], i: usize) -> bool {
    let mut j = i + 1;
    while at(chars, j).is_some_and(char::is_alphabetic) {
        j += 1;
    }
    let tail: String = chars[i + 1..j]
        .iter()
        .flat_map(|c| c.to_lowercase())
        .collect();
    let ends_word = !at(chars, j).is_some_and(|c| {
        c.is_alphabetic() || matches!(c, '\'' | '"' | RIGHT_SINGLE_QUOTE | RIGHT_DOUBLE_QUOTE)
    });
    ends_word && matches!(tail.as_str(), "s" | "t" | "d" | "m" | "ll" | "re" | "ve")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn matched(scan: fn(&[char], usize) -> Option<usize>, s: &str) -> Option<String> {
        let cs = chars(s);
        scan(&cs, 0).map(|end| cs[..end].iter().collect())
    }

    #[test]
    fn test_code_span() {
        assert_eq!(matched(code_span, "`a, b` c").as_deref(), Some("`a, b`"));
        assert_eq!(matched(code_span, "`open\nnext").as_deref(), Some("`open"));
        assert_eq!(
            matched(code_span, "```\nx\n``` y").as_deref(),
            Some("```\nx\n```")
        );
        assert_eq!(
            matched(code_span, "```\nunclosed").as_deref(),
            Some("```\nunclosed")
        );
    }

    #[test]
    fn test_url() {
        assert_eq!(
            matched(url, "https://ex.com/a?x=1,2&y=3.Please").as_deref(),
            Some("https://ex.com/a?x=1,2&y=3")
        );
        assert_eq!(
            matched(url, "https://example.com).Thanks").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            matched(url, "https://en.wikipedia.org/wiki/Rust_(language)).").as_deref(),
            Some("https://en.wikipedia.org/wiki/Rust_(language)")
        );
        assert_eq!(
            matched(url, "http://[2001:db8::1]:443.OK").as_deref(),
            Some("http://[2001:db8::1]:443")
        );
        assert_eq!(
            matched(url, "www.example.org;then").as_deref(),
            Some("www.example.org")
        );
        assert_eq!(matched(url, "mailto:x@example.com"), None);
    }

    #[test]
    fn test_path() {
        assert_eq!(
            matched(path, "C:\\Temp\\file.txt,ok").as_deref(),
            Some("C:\\Temp\\file.txt")
        );
        assert_eq!(
            matched(path, "/usr/bin/env,ok").as_deref(),
            Some("/usr/bin/env")
        );
        assert_eq!(matched(path, "// comment"), None);
        assert_eq!(matched(path, "/ alone"), None);
    }

    #[test]
    fn test_ipv6() {
        assert_eq!(
            matched(ipv6, "2001:db8::1.Ok").as_deref(),
            Some("2001:db8::1")
        );
        assert_eq!(
            matched(ipv6, "::ffff:192.0.2.128.Ok").as_deref(),
            Some("::ffff:192.0.2.128")
        );
        assert_eq!(matched(ipv6, "fe80::1%eth0"), Some("fe80::1".to_string()));
        assert_eq!(matched(ipv6, "cafe:bad"), None);
        assert_eq!(matched(ipv6, "10:30am"), None);
        assert_eq!(matched(ipv6, "12345:1"), None);
        assert_eq!(matched(ipv6, "1::2::3"), None);
    }

    #[test]
    fn test_email_and_domain() {
        assert_eq!(
            matched(email, "a.b-c+d@foo.bar,before").as_deref(),
            Some("a.b-c+d@foo.bar")
        );
        assert_eq!(matched(email, "me@host."), None);
        assert_eq!(
            matched(email, "me@example.com.").as_deref(),
            Some("me@example.com")
        );
        assert_eq!(
            matched(domain, "example.co.uk,now").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(
            matched(domain, "EXAMPLE.COM,please").as_deref(),
            Some("EXAMPLE.COM")
        );
        assert_eq!(matched(domain, "fine.Ok"), None);
        assert_eq!(matched(domain, "3.14"), None);
        assert_eq!(matched(domain, "file.tar_gz"), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(matched(version, "v1.2.3,and").as_deref(), Some("v1.2.3"));
        assert_eq!(matched(version, "3.14.Go").as_deref(), Some("3.14"));
        assert_eq!(matched(version, "42"), None);
        assert_eq!(matched(decimal, "1,234.56").as_deref(), Some("1,234.56"));
        assert_eq!(matched(decimal, "10,is"), None);
        assert_eq!(matched(time, "10:30am.").as_deref(), Some("10:30am"));
        assert_eq!(matched(time, "10:30:05.Ok").as_deref(), Some("10:30:05"));
        assert_eq!(matched(time, "9:15 PM,").as_deref(), Some("9:15 PM"));
        assert_eq!(matched(time, "4:3 is").as_deref(), Some("4:3"));
        assert_eq!(matched(time, "10:30 amber").as_deref(), Some("10:30"));
    }

    #[test]
    fn test_ellipsis_and_abbreviation() {
        assert_eq!(matched(ellipsis, "....Dots").as_deref(), Some("...."));
        assert_eq!(matched(ellipsis, "\u{2026}OK").as_deref(), Some("\u{2026}"));
        assert_eq!(matched(ellipsis, "..x"), None);
        assert_eq!(
            matched(dotted_abbreviation, "U.S.A.,rocks").as_deref(),
            Some("U.S.A.")
        );
        assert_eq!(
            matched(dotted_abbreviation, "e.g.,this").as_deref(),
            Some("e.g.")
        );
        assert_eq!(matched(dotted_abbreviation, "a.b"), None);
    }

    #[test]
    fn test_contraction_tail_follows() {
        assert!(contraction_tail_follows(&chars("\u{2019}ll go"), 0));
        assert!(contraction_tail_follows(&chars("'s."), 0));
        assert!(!contraction_tail_follows(&chars("'sup"), 0));
        assert!(!contraction_tail_follows(&chars("'s'"), 0));
    }
}
