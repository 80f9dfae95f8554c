//! Statistical signals appended after the TF-IDF block.
//!
//! All of these read the joined request text as-is, before cleaning.

use std::collections::HashMap;

pub const LENGTH_SCALE: f64 = 1000.0;
pub const ENTROPY_SCALE: f64 = 10.0;

/// Shannon entropy (natural log) of the character distribution. 0 for "".
pub fn shannon_entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.ln()
        })
        .sum()
}

/// Append scaled length, scaled entropy and one frequency per keyword.
///
/// Keyword frequency is the non-overlapping occurrence count divided by
/// `chars + 1`.
pub fn augment(mut vector: Vec<f64>, original_text: &str, keywords: &[String]) -> Vec<f64> {
    let len = original_text.chars().count() as f64;
    vector.reserve(2 + keywords.len());

    vector.push(len / LENGTH_SCALE);
    vector.push(shannon_entropy(original_text) / ENTROPY_SCALE);
    for kw in keywords {
        let count = original_text.matches(kw.as_str()).count();
        vector.push(count as f64 / (len + 1.0));
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_single_symbol_is_zero() {
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert_eq!(shannon_entropy(""), 0.0);
    }

    #[test]
    fn entropy_of_uniform_pair_is_ln2() {
        assert!((shannon_entropy("abab") - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn entropy_counts_characters() {
        // two distinct multi-byte characters, equally likely
        assert!((shannon_entropy("éü") - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn augment_layout() {
        let keywords = vec!["select".to_string(), "'".to_string()];
        let text = "id=1' SELECT select";
        let out = augment(vec![0.6, 0.8], text, &keywords);
        assert_eq!(out.len(), 2 + 2 + 2);
        assert_eq!(&out[..2], &[0.6, 0.8]);
        let len = text.chars().count() as f64;
        assert!((out[2] - len / 1000.0).abs() < 1e-15);
        assert!((out[3] - shannon_entropy(text) / 10.0).abs() < 1e-15);
        // case-sensitive literal match
        assert!((out[4] - 1.0 / (len + 1.0)).abs() < 1e-15);
        assert!((out[5] - 1.0 / (len + 1.0)).abs() < 1e-15);
    }

    #[test]
    fn keyword_occurrences_do_not_overlap() {
        let out = augment(vec![], "aaaa", &["aa".to_string()]);
        assert!((out[2] - 2.0 / 5.0).abs() < 1e-15);
    }

    #[test]
    fn empty_text_is_well_defined() {
        let out = augment(vec![0.0], "", &["or".to_string()]);
        assert_eq!(out, vec![0.0, 0.0, 0.0, 0.0]);
    }
}
