//! WAF detector entrypoint: scores one raw request string and prints the
//! parsed fields, the combined text and the verdict.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use waf_detector::{
    config::DetectorConfig,
    features::FeatureExtractor,
    logging::{DetectionReport, StructuredLogger},
    model::{ModelMetadata, OnnxClassifier},
    risk::DecisionEngine,
};

#[derive(Debug, Parser)]
#[command(name = "waf-detector")]
#[command(about = "Classify a raw HTTP request as ATTACK or NORMAL")]
#[command(version)]
struct Cli {
    /// Raw request: method line, JSON body, query string or path
    payload: String,

    /// Config file (default: $WAF_DETECTOR_CONFIG or config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override vectorizer metadata path
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Override ONNX model path
    #[arg(long)]
    model: Option<PathBuf>,

    /// Override attack probability threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Print the report as a single JSON line
    #[arg(long)]
    json: bool,

    /// Skip inference and include the feature vector in the report
    #[arg(long)]
    features_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(DetectorConfig::path_from_env);
    let (mut config, config_error) = match DetectorConfig::try_load(&config_path) {
        Ok(c) => (c.unwrap_or_default(), None),
        Err(e) => (DetectorConfig::default(), Some(e)),
    };
    if let Some(p) = cli.metadata {
        config.metadata_path = p;
    }
    if let Some(p) = cli.model {
        config.model_path = p;
    }
    if let Some(t) = cli.threshold {
        config.decision.attack_threshold = t;
    }

    StructuredLogger::init(config.log.json, &config.log.level)?;
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file; using defaults");
    }
    info!(config = %config_path.display(), "waf detector starting");

    let metadata = Arc::new(ModelMetadata::load(&config.metadata_path)?);
    let extractor = FeatureExtractor::new(Arc::clone(&metadata));
    let classifier = if cli.features_only {
        OnnxClassifier::disabled(extractor.dim(), &config.runtime)
    } else {
        OnnxClassifier::load(&config.model_path, extractor.dim(), &config.runtime)?
    };
    let engine = DecisionEngine::new(config.decision.clone());

    let started = Instant::now();
    let extraction = extractor.extract(&cli.payload);
    let scores = classifier.predict(&extraction.features)?;
    let verdict = scores
        .as_ref()
        .map(|s| engine.decide(&s.probabilities))
        .transpose()?;
    let elapsed = started.elapsed();

    if let Some(v) = verdict {
        info!(
            label = %v.label,
            confidence = v.confidence,
            attack_probability = v.attack_probability,
            "request classified"
        );
    }

    let mut report = DetectionReport::new(
        &extraction,
        scores.as_ref(),
        verdict,
        &metadata.fingerprint,
        elapsed,
    );
    if cli.features_only {
        report = report.with_features(&extraction);
    }

    let mut out = std::io::stdout().lock();
    if cli.json {
        StructuredLogger::emit_json(&report, &mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    Ok(())
}
