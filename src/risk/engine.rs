//! Turns classifier probabilities into an ATTACK / NORMAL verdict using a
//! configurable threshold on the attack-class probability.

use crate::config::DecisionConfig;
use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Attack,
    Normal,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Attack => "ATTACK",
            Label::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for a single request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    /// Probability of the chosen label
    pub confidence: f64,
    pub attack_probability: f64,
}

pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// `p >= threshold` → ATTACK with confidence `p`; otherwise NORMAL with
    /// confidence `1 - p`.
    pub fn decide(&self, probabilities: &[f32]) -> Result<Verdict> {
        let p = probabilities
            .get(self.config.attack_class)
            .map(|&p| p as f64)
            .ok_or(DetectorError::ClassOutOfRange {
                index: self.config.attack_class,
                classes: probabilities.len(),
            })?;

        let verdict = if p >= self.config.attack_threshold {
            Verdict {
                label: Label::Attack,
                confidence: p,
                attack_probability: p,
            }
        } else {
            Verdict {
                label: Label::Normal,
                confidence: 1.0 - p,
                attack_probability: p,
            }
        };
        Ok(verdict)
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(threshold: f64) -> DecisionEngine {
        DecisionEngine::new(DecisionConfig {
            attack_threshold: threshold,
            attack_class: 1,
        })
    }

    #[test]
    fn default_threshold_is_point_seven() {
        let e = DecisionEngine::new(DecisionConfig::default());
        assert_eq!(e.config().attack_threshold, 0.7);
        assert_eq!(e.decide(&[0.2, 0.8]).unwrap().label, Label::Attack);
        assert_eq!(e.decide(&[0.4, 0.6]).unwrap().label, Label::Normal);
    }

    #[test]
    fn threshold_is_inclusive() {
        let v = engine(0.5).decide(&[0.5, 0.5]).unwrap();
        assert_eq!(v.label, Label::Attack);
        assert_eq!(v.confidence, 0.5);
    }

    #[test]
    fn normal_confidence_is_complement() {
        let v = engine(0.7).decide(&[0.75, 0.25]).unwrap();
        assert_eq!(v.label, Label::Normal);
        assert!((v.confidence - 0.75).abs() < 1e-7);
        assert!((v.attack_probability - 0.25).abs() < 1e-7);
    }

    #[test]
    fn class_out_of_range() {
        let err = engine(0.7).decide(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            DetectorError::ClassOutOfRange { index: 1, classes: 1 }
        ));
    }

    #[test]
    fn label_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Label::Attack).unwrap(), "\"ATTACK\"");
        assert_eq!(Label::Normal.to_string(), "NORMAL");
    }
}
