//! Error types for the detector.
//!
//! Only configuration, metadata and model problems surface here. Malformed URLs,
//! undecodable percent escapes and zero-norm vectors are handled inside the
//! feature pipeline and never become errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    /// File could not be read
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Metadata document is not valid JSON or has the wrong shape
    #[error("could not decode metadata: {0}")]
    MetadataParse(#[from] serde_json::Error),

    #[error("vocabulary has {vocabulary} terms but idf has {idf} weights")]
    VocabularyMismatch { vocabulary: usize, idf: usize },

    #[error("vocabulary is empty")]
    EmptyVocabulary,

    #[error("duplicate vocabulary term {term:?} at index {index}")]
    DuplicateTerm { term: String, index: usize },

    #[error("idf weight at index {index} is not finite: {value}")]
    InvalidIdf { index: usize, value: f64 },

    #[error("invalid n-gram range [{min}, {max}]: bounds must satisfy 1 <= min <= max")]
    InvalidNgramRange { min: usize, max: usize },

    /// ONNX Runtime failure (environment, session or run)
    #[error("ONNX runtime error: {0}")]
    Onnx(#[from] ort::Error),

    #[error("unexpected model output: {0}")]
    ModelOutput(String),

    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("attack class index {index} out of range for {classes} classes")]
    ClassOutOfRange { index: usize, classes: usize },
}

pub type Result<T> = std::result::Result<T, DetectorError>;
