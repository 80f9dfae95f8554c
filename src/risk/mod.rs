//! Decision policy applied to classifier output.

mod engine;

pub use engine::{DecisionEngine, Label, Verdict};
