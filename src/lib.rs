//! WAF detector — flags malicious HTTP requests with a pretrained linear
//! text classifier.
//!
//! Modular structure:
//! - [`request`] — Heuristic request parsing and field joining
//! - [`features`] — Normalization, n-grams, TF-IDF and statistical features
//! - [`model`] — Vectorizer metadata and ONNX inference
//! - [`risk`] — ATTACK / NORMAL decision policy
//! - [`logging`] — Structured logging and detection reports

pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod request;
pub mod risk;

pub use config::DetectorConfig;
pub use error::{DetectorError, Result};
pub use features::{FeatureExtractor, FeatureVector};
pub use logging::StructuredLogger;
pub use model::{ModelMetadata, OnnxClassifier};
pub use request::RequestFields;
pub use risk::{DecisionEngine, Label, Verdict};
