//! TF-IDF weighting over a fixed, ordered vocabulary.
//!
//! Weights are raw counts times idf, then L2-normalized. This has to match
//! the convention that produced the idf values (sklearn `TfidfVectorizer`
//! with `sublinear_tf=False`, `norm="l2"`); a different TF transform at
//! training time would silently skew every score.

use super::{ngrams, normalize};
use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive character n-gram length range. Serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

impl NgramRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min == 0 || self.min > self.max {
            return Err(DetectorError::InvalidNgramRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl From<[usize; 2]> for NgramRange {
    fn from([min, max]: [usize; 2]) -> Self {
        Self { min, max }
    }
}

impl From<NgramRange> for [usize; 2] {
    fn from(r: NgramRange) -> Self {
        [r.min, r.max]
    }
}

/// Ordered terms with aligned idf weights and a term → slot index.
///
/// Slot `i` of every TF-IDF vector belongs to `terms[i]`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f64>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build and validate: equal lengths, non-empty, distinct terms, finite idf.
    pub fn new(terms: Vec<String>, idf: Vec<f64>) -> Result<Self> {
        if terms.len() != idf.len() {
            return Err(DetectorError::VocabularyMismatch {
                vocabulary: terms.len(),
                idf: idf.len(),
            });
        }
        if terms.is_empty() {
            return Err(DetectorError::EmptyVocabulary);
        }
        if let Some((index, &value)) = idf.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(DetectorError::InvalidIdf { index, value });
        }

        let mut index = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(DetectorError::DuplicateTerm {
                    term: term.clone(),
                    index: i,
                });
            }
        }

        Ok(Self { terms, idf, index })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Slot of `term`, if it is in the vocabulary.
    pub fn slot(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Raw-count × idf weights for a tokenized multiset. Not normalized.
    pub fn weigh(&self, counts: &HashMap<String, usize>) -> Vec<f64> {
        let mut weights = vec![0.0; self.terms.len()];
        for (gram, &count) in counts {
            if let Some(i) = self.slot(gram) {
                weights[i] = count as f64 * self.idf[i];
            }
        }
        weights
    }
}

/// Clean `text`, tokenize it into n-grams and return the L2-normalized
/// TF-IDF sub-vector (length `vocabulary.len()`).
pub fn tfidf(text: &str, vocabulary: &Vocabulary, range: NgramRange) -> Vec<f64> {
    let cleaned = normalize::clean(text);
    let counts = ngrams::ngrams(&cleaned, range.min, range.max);
    let mut weights = vocabulary.weigh(&counts);
    l2_normalize(&mut weights);
    weights
}

/// Scale to unit Euclidean norm. An all-zero vector is left as is.
pub fn l2_normalize(v: &mut [f64]) {
    let sum_sq: f64 = v.iter().map(|x| x * x).sum();
    if sum_sq > 0.0 {
        let norm = sum_sq.sqrt();
        v.iter_mut().for_each(|x| *x /= norm);
    }
}
