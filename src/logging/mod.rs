//! Structured logging and detection reports.

mod format;

pub use format::{DetectionReport, StructuredLogger};
