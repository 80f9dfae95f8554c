//! Feature extraction pipeline: payload → fields → joined text → vector.

use super::{stats, tfidf, FeatureVector};
use crate::model::ModelMetadata;
use crate::request::{self, RequestFields};
use serde::Serialize;
use std::sync::Arc;

/// Everything derived from one payload on its way to the classifier.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub fields: RequestFields,
    /// Joined, uncleaned text; the statistical features read this
    pub text: String,
    pub features: FeatureVector,
}

/// Stateless per call; the only shared state is the read-only metadata.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    metadata: Arc<ModelMetadata>,
}

impl FeatureExtractor {
    pub fn new(metadata: Arc<ModelMetadata>) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Vector length: vocabulary + length + entropy + keywords
    pub fn dim(&self) -> usize {
        self.metadata.feature_dim()
    }

    /// Parse, join and vectorize a raw payload.
    pub fn extract(&self, payload: &str) -> Extraction {
        let fields = request::parse(payload);
        let text = request::extract_text(&fields);
        let features = self.vectorize(&text);
        tracing::debug!(
            method = %fields.method,
            text_len = text.len(),
            dim = features.len(),
            "extracted features"
        );
        Extraction {
            fields,
            text,
            features,
        }
    }

    /// Vectorize already-joined request text.
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        let meta = &self.metadata;
        let weights = tfidf::tfidf(text, &meta.vocabulary, meta.ngram_range);
        let vocab_len = weights.len();
        let values = stats::augment(weights, text, &meta.keywords);
        FeatureVector { values, vocab_len }
    }
}
