//! Vectorizer metadata exported alongside the model: n-gram range,
//! vocabulary with idf weights, and keyword list.

use crate::error::{DetectorError, Result};
use crate::features::{NgramRange, Vocabulary};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;

/// On-disk shape of `model_metadata.json`.
#[derive(Debug, Deserialize)]
struct MetadataFile {
    ngram_range: NgramRange,
    #[serde(default)]
    max_features: usize,
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Validated metadata. Immutable once loaded; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub ngram_range: NgramRange,
    /// Advisory only; the vocabulary length is authoritative
    pub max_features: usize,
    pub vocabulary: Vocabulary,
    pub keywords: Vec<String>,
    /// Hex SHA-256 of the source document (empty when built in memory)
    pub fingerprint: String,
}

impl ModelMetadata {
    pub fn new(
        ngram_range: NgramRange,
        vocabulary: Vec<String>,
        idf: Vec<f64>,
        keywords: Vec<String>,
    ) -> Result<Self> {
        ngram_range.validate()?;
        let vocabulary = Vocabulary::new(vocabulary, idf)?;
        Ok(Self {
            ngram_range,
            max_features: vocabulary.len(),
            vocabulary,
            keywords,
            fingerprint: String::new(),
        })
    }

    /// Read and validate a metadata JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| DetectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let meta = Self::from_json_str(&data)?;
        tracing::info!(
            path = %path.display(),
            vocabulary = meta.vocabulary.len(),
            keywords = meta.keywords.len(),
            ngram_min = meta.ngram_range.min,
            ngram_max = meta.ngram_range.max,
            fingerprint = %meta.fingerprint,
            "model metadata loaded"
        );
        Ok(meta)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let file: MetadataFile = serde_json::from_str(data)?;
        file.ngram_range.validate()?;
        let vocabulary = Vocabulary::new(file.vocabulary, file.idf)?;
        if file.max_features > 0 && vocabulary.len() > file.max_features {
            tracing::warn!(
                vocabulary = vocabulary.len(),
                max_features = file.max_features,
                "vocabulary exceeds max_features; using full vocabulary"
            );
        }

        let fingerprint: String = Sha256::digest(data.as_bytes())
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        Ok(Self {
            ngram_range: file.ngram_range,
            max_features: file.max_features,
            vocabulary,
            keywords: file.keywords,
            fingerprint,
        })
    }

    /// Length of every feature vector built from this metadata.
    pub fn feature_dim(&self) -> usize {
        self.vocabulary.len() + 2 + self.keywords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ngram_range": [1, 3],
        "max_features": 5000,
        "vocabulary": ["<sc", "or", "/"],
        "idf": [3.2, 1.7, 1.0],
        "keywords": ["select", "<script", "../"]
    }"#;

    #[test]
    fn parses_sample() {
        let m = ModelMetadata::from_json_str(SAMPLE).unwrap();
        assert_eq!(m.ngram_range, NgramRange { min: 1, max: 3 });
        assert_eq!(m.max_features, 5000);
        assert_eq!(m.vocabulary.terms(), &["<sc", "or", "/"]);
        assert_eq!(m.vocabulary.idf(), &[3.2, 1.7, 1.0]);
        assert_eq!(m.vocabulary.slot("or"), Some(1));
        assert_eq!(m.keywords.len(), 3);
        assert_eq!(m.feature_dim(), 3 + 2 + 3);
        assert_eq!(m.fingerprint.len(), 64);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = ModelMetadata::from_json_str(SAMPLE).unwrap();
        let b = ModelMetadata::from_json_str(&SAMPLE.replace("3.2", "3.3")).unwrap();
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn keywords_and_max_features_are_optional() {
        let m = ModelMetadata::from_json_str(
            r#"{"ngram_range": [2, 2], "vocabulary": ["ab"], "idf": [1.0]}"#,
        )
        .unwrap();
        assert!(m.keywords.is_empty());
        assert_eq!(m.feature_dim(), 3);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = ModelMetadata::from_json_str(
            r#"{"ngram_range": [1, 2], "vocabulary": ["a", "b"], "idf": [1.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectorError::VocabularyMismatch { .. }));
    }

    #[test]
    fn rejects_bad_ngram_range() {
        let err = ModelMetadata::from_json_str(
            r#"{"ngram_range": [3, 1], "vocabulary": ["a"], "idf": [1.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectorError::InvalidNgramRange { min: 3, max: 1 }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ModelMetadata::from_json_str(r#"{"ngram_range": [1]}"#),
            Err(DetectorError::MetadataParse(_))
        ));
        assert!(matches!(
            ModelMetadata::from_json_str(
                r#"{"ngram_range": [-1, 2], "vocabulary": ["a"], "idf": [1.0]}"#
            ),
            Err(DetectorError::MetadataParse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ModelMetadata::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DetectorError::Io { .. }));
    }
}
