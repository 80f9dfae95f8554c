//! Character n-gram counting over Unicode scalar values.

use std::collections::HashMap;

/// Count every contiguous substring of `min_len..=max_len` characters.
///
/// Windows overlap; repeats accumulate in the same counter. An invalid range
/// (`min_len == 0` or `min_len > max_len`) produces no windows, so the result
/// is empty. Lengths beyond the text simply contribute nothing.
pub fn ngrams(text: &str, min_len: usize, max_len: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    if min_len == 0 || min_len > max_len {
        return counts;
    }

    let chars: Vec<char> = text.chars().collect();
    for len in min_len..=max_len.min(chars.len()) {
        for window in chars.windows(len) {
            *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn unigrams_and_bigrams() {
        assert_eq!(
            ngrams("abc", 1, 2),
            counts(&[("a", 1), ("b", 1), ("c", 1), ("ab", 1), ("bc", 1)])
        );
    }

    #[test]
    fn overlapping_windows_accumulate() {
        let g = ngrams("aaaa", 2, 3);
        assert_eq!(g, counts(&[("aa", 3), ("aaa", 2)]));
    }

    #[test]
    fn counts_code_points_not_bytes() {
        let g = ngrams("é<", 2, 2);
        assert_eq!(g, counts(&[("é<", 1)]));
        let g = ngrams("日本語", 1, 1);
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn window_longer_than_text() {
        assert!(ngrams("ab", 3, 5).is_empty());
        assert_eq!(ngrams("ab", 2, 5), counts(&[("ab", 1)]));
    }

    #[test]
    fn empty_text() {
        assert!(ngrams("", 1, 3).is_empty());
    }

    #[test]
    fn invalid_range_yields_nothing() {
        assert!(ngrams("abc", 0, 2).is_empty());
        assert!(ngrams("abc", 3, 2).is_empty());
    }
}
