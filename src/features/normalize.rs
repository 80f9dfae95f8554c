//! Canonical text form used for n-gram tokenization.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

/// Normalize request text: lowercase, percent-decode twice, collapse
/// whitespace runs to one space, trim.
///
/// A decode pass that fails leaves the text as it was; normalization
/// carries on regardless.
pub fn clean(text: &str) -> String {
    let mut text: String = text.chars().map(simple_lowercase).collect();

    for _ in 0..2 {
        let decoded = path_unescape(&text).map(Cow::into_owned);
        if let Some(decoded) = decoded {
            text = decoded;
        }
    }

    whitespace().replace_all(&text, " ").trim().to_string()
}

/// One-to-one lowercase mapping. Where the full mapping expands (only
/// `İ` → `i̇`), the leading character is the simple mapping.
fn simple_lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Percent-decode a path component. `+` stays literal.
///
/// Fails only on a `%` not followed by two hex digits. Decoded bytes that
/// are not valid UTF-8 become U+FFFD.
pub fn path_unescape(s: &str) -> Option<Cow<'_, str>> {
    if !has_valid_escapes(s) {
        return None;
    }
    let decoded = match urlencoding::decode_binary(s.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(s),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    };
    Some(decoded)
}

/// True when every `%` in `s` starts a well-formed `%XX` escape.
pub(crate) fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(clean("  GET\t/Admin \n\n X  "), "get /admin x");
    }

    #[test]
    fn decodes_twice() {
        // %253C -> %3C -> <
        assert_eq!(clean("q=%253Cscript%253E"), "q=<script>");
    }

    #[test]
    fn third_level_encoding_survives() {
        assert_eq!(clean("%25253C"), "%3c");
    }

    #[test]
    fn decoded_whitespace_is_collapsed() {
        assert_eq!(clean("a%20%20%0Ab"), "a b");
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(clean("a+b"), "a+b");
    }

    #[test]
    fn malformed_escape_skips_decoding() {
        assert_eq!(clean("%3C %zz"), "%3c %zz");
        assert_eq!(clean("100%"), "100%");
    }

    #[test]
    fn second_pass_failure_keeps_first_pass() {
        // first pass yields "%zz <", which no longer decodes
        assert_eq!(clean("%25zz %3C"), "%zz <");
    }

    #[test]
    fn invalid_utf8_escape_becomes_replacement_char() {
        assert_eq!(clean("%FF%3C"), "\u{fffd}<");
    }

    #[test]
    fn overlong_utf8_does_not_block_other_escapes() {
        let out = clean("%c0%ae%c0%ae/%3Cscript%3E");
        assert_eq!(out, "\u{fffd}\u{fffd}\u{fffd}\u{fffd}/<script>");
        assert!(out.contains("<script>"));
    }

    #[test]
    fn lowercase_is_one_to_one() {
        assert_eq!(clean("İSTANBUL"), "istanbul");
        assert_eq!(clean("İ").chars().count(), 1);
        assert_eq!(clean("ΣΟΦΟΣ"), "σοφοσ");
    }

    #[test]
    fn unicode_lowercase_and_whitespace() {
        assert_eq!(clean("ÀB\u{2003}C"), "àb c");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean(" \t\n "), "");
    }

    #[test]
    fn idempotent_on_clean_text() {
        let once = clean("GET /Index.HTML  user=john&pass=doe");
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn escape_validation() {
        assert!(has_valid_escapes("/a%2Fb"));
        assert!(has_valid_escapes("plain"));
        assert!(!has_valid_escapes("%"));
        assert!(!has_valid_escapes("%4"));
        assert!(!has_valid_escapes("%g1"));
    }
}
