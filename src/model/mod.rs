//! Model-side collaborators: vectorizer metadata and the ONNX classifier.

mod metadata;
mod onnx;

pub use metadata::ModelMetadata;
pub use onnx::{ClassScores, OnnxClassifier};
