//! Detector configuration, loaded from JSON. Every section has defaults so
//! partial files work.

use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "WAF_DETECTOR_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Vectorizer metadata exported with the model
    pub metadata_path: PathBuf,
    /// Path to ONNX classifier
    pub model_path: PathBuf,
    /// ONNX Runtime settings
    pub runtime: RuntimeConfig,
    /// ATTACK / NORMAL decision policy
    pub decision: DecisionConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Explicit onnxruntime shared library; otherwise ORT_DYLIB_PATH / system lookup
    pub library_path: Option<PathBuf>,
    /// Model input name; defaults to the model's first input
    pub input_name: Option<String>,
    pub probabilities_output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Attack probability at or above this is ATTACK (0.0–1.0)
    pub attack_threshold: f64,
    /// Index of the attack class in the probability output
    pub attack_class: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            metadata_path: PathBuf::from("assets/model_metadata.json"),
            model_path: PathBuf::from("assets/model.onnx"),
            runtime: RuntimeConfig::default(),
            decision: DecisionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            input_name: None,
            probabilities_output: "probabilities".to_string(),
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            attack_threshold: 0.7,
            attack_class: 1,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl DetectorConfig {
    /// Load from JSON file if present; otherwise return default. An
    /// unreadable or malformed file is logged and ignored.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(c) => c.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file; using defaults");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when no file exists at `path`.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path).map_err(|source| DetectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| DetectorError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Config path from [`CONFIG_ENV`], falling back to `config.json`
    pub fn path_from_env() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    }
}
