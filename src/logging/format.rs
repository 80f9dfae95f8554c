//! Log setup and per-request report output: either one JSON object per line
//! (ndjson) or a human-readable block.

use crate::features::Extraction;
use crate::model::ClassScores;
use crate::request::RequestFields;
use crate::risk::Verdict;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Outcome of one detection run, as reported to the operator.
#[derive(Debug, Serialize)]
pub struct DetectionReport<'a> {
    pub request_id: Uuid,
    pub ts: DateTime<Utc>,
    pub fields: &'a RequestFields,
    pub combined_text: &'a str,
    pub feature_dim: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<&'a [f64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<&'a ClassScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    pub metadata_fingerprint: &'a str,
    pub elapsed_us: u64,
}

impl<'a> DetectionReport<'a> {
    pub fn new(
        extraction: &'a Extraction,
        scores: Option<&'a ClassScores>,
        verdict: Option<Verdict>,
        metadata_fingerprint: &'a str,
        elapsed: Duration,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            ts: Utc::now(),
            fields: &extraction.fields,
            combined_text: &extraction.text,
            feature_dim: extraction.features.len(),
            features: None,
            scores,
            verdict,
            metadata_fingerprint,
            elapsed_us: elapsed.as_micros() as u64,
        }
    }

    /// Include the raw feature values in the report
    pub fn with_features(mut self, extraction: &'a Extraction) -> Self {
        self.features = Some(extraction.features.as_slice());
        self
    }

    /// Human-readable block
    pub fn write_text(&self, w: &mut impl Write) -> std::io::Result<()> {
        writeln!(w, "--- Request Simulation ---")?;
        writeln!(w, "Method:  {}", self.fields.method)?;
        writeln!(w, "Path:    {}", self.fields.path)?;
        writeln!(w, "Query:   {}", self.fields.query)?;
        writeln!(w, "Headers: {}", self.fields.headers)?;
        writeln!(w, "Body:    {}", self.fields.body)?;
        writeln!(w, "Combined for Prediction: {}", self.combined_text)?;
        writeln!(w, "--------------------------")?;
        if let Some(features) = self.features {
            writeln!(w, "Features ({}): {:?}", self.feature_dim, features)?;
        }
        match self.verdict {
            Some(v) => {
                writeln!(w, "Prediction: {}", v.label)?;
                writeln!(w, "Confidence: {:.4}", v.confidence)?;
            }
            None => writeln!(w, "Prediction: unavailable (no model loaded)")?,
        }
        writeln!(w, "Time: {:?}", Duration::from_micros(self.elapsed_us))
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber on stderr; level from RUST_LOG or default.
    /// Stdout is left to reports. Fails if a subscriber is already set.
    pub fn init(json: bool, default_level: &str) -> Result<(), TryInitError> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let json_layer = json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr)
        });
        let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer)
            .try_init()
    }

    /// Write `event` as one JSON line, bypassing tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        serde_json::to_writer(&mut *w, event)?;
        writeln!(w)
    }
}
