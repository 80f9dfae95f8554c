//! ONNX Runtime inference for the request classifier.
//! Input: `[1, feature_dim]` f32. Outputs: `label` int64 `[1]` and
//! `probabilities` f32 `[1, classes]` (sklearn export with zipmap off).
//! If the model file is missing, runs disabled and `predict` returns `None`.

use crate::config::RuntimeConfig;
use crate::error::{DetectorError, Result};
use crate::features::FeatureVector;
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LABEL_OUTPUT: &str = "label";
const DEFAULT_INPUT: &str = "float_input";

/// Raw classifier output for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    /// Label chosen by the model itself (argmax), if the model exports one
    pub label: Option<i64>,
    pub probabilities: Vec<f32>,
}

pub struct OnnxClassifier {
    session: Option<Session>,
    input_name: String,
    probabilities_output: String,
    feature_dim: usize,
}

fn init_runtime(runtime: &RuntimeConfig) -> Result<()> {
    let builder = match &runtime.library_path {
        Some(lib) => ort::init_from(lib.display().to_string()),
        None => ort::init(),
    };
    builder.with_name("waf-detector").commit()?;
    Ok(())
}

impl OnnxClassifier {
    /// Load model from `path`. A missing file yields a disabled classifier.
    pub fn load(path: &Path, feature_dim: usize, runtime: &RuntimeConfig) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "ONNX model not found; inference disabled");
            return Ok(Self::disabled(feature_dim, runtime));
        }

        init_runtime(runtime)?;
        let session = Session::builder()?.commit_from_file(path)?;

        let input_name = runtime
            .input_name
            .clone()
            .or_else(|| session.inputs.first().map(|i| i.name.clone()))
            .unwrap_or_else(|| DEFAULT_INPUT.to_string());
        tracing::info!(path = %path.display(), input = %input_name, feature_dim, "ONNX model loaded");

        Ok(Self {
            session: Some(session),
            input_name,
            probabilities_output: runtime.probabilities_output.clone(),
            feature_dim,
        })
    }

    /// Classifier with no model behind it; `predict` always yields `None`.
    pub fn disabled(feature_dim: usize, runtime: &RuntimeConfig) -> Self {
        Self {
            session: None,
            input_name: runtime
                .input_name
                .clone()
                .unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            probabilities_output: runtime.probabilities_output.clone(),
            feature_dim,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// Score one vector. `Ok(None)` when running disabled.
    pub fn predict(&self, features: &FeatureVector) -> Result<Option<ClassScores>> {
        let Some(ref session) = self.session else {
            return Ok(None);
        };
        if features.len() != self.feature_dim {
            return Err(DetectorError::DimensionMismatch {
                expected: self.feature_dim,
                got: features.len(),
            });
        }

        let arr = Array2::from_shape_vec((1, features.len()), features.to_f32())
            .map_err(|e| DetectorError::ModelOutput(e.to_string()))?;
        let input = Tensor::from_array(arr)?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input]?)?;

        let probabilities: Vec<f32> = outputs
            .get(self.probabilities_output.as_str())
            .ok_or_else(|| {
                DetectorError::ModelOutput(format!(
                    "missing output {:?}",
                    self.probabilities_output
                ))
            })?
            .try_extract_tensor::<f32>()?
            .iter()
            .copied()
            .collect();
        if probabilities.is_empty() {
            return Err(DetectorError::ModelOutput("empty probabilities".to_string()));
        }

        let label = outputs
            .get(LABEL_OUTPUT)
            .and_then(|v| v.try_extract_tensor::<i64>().ok())
            .and_then(|t| t.iter().next().copied());

        Ok(Some(ClassScores {
            label,
            probabilities,
        }))
    }
}
