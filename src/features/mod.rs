//! Request text → fixed-layout feature vector.
//!
//! Layout: `[0, V)` L2-normalized TF-IDF over the vocabulary, `V` scaled
//! length, `V + 1` scaled entropy, then one slot per keyword in metadata
//! order. The classifier was trained on exactly this layout.

pub mod ngrams;
pub mod normalize;
mod pipeline;
pub mod stats;
pub mod tfidf;

pub use ngrams::ngrams;
pub use normalize::clean;
pub use pipeline::{Extraction, FeatureExtractor};
pub use stats::{augment, shannon_entropy};
pub use tfidf::{tfidf, NgramRange, Vocabulary};

use serde::{Deserialize, Serialize};

/// Feature vector in f64. Narrowed to f32 only at the model boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
    /// Number of leading TF-IDF slots
    pub vocab_len: usize,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn tfidf(&self) -> &[f64] {
        &self.values[..self.vocab_len]
    }

    pub fn scaled_length(&self) -> f64 {
        self.values[self.vocab_len]
    }

    pub fn scaled_entropy(&self) -> f64 {
        self.values[self.vocab_len + 1]
    }

    pub fn keyword_frequencies(&self) -> &[f64] {
        &self.values[self.vocab_len + 2..]
    }

    /// Model input precision (ONNX `float_input` is f32)
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}
