//! Joins parsed fields into the text blob used for analysis.

use super::RequestFields;

/// Concatenate path, query, headers and body (in that order) with single
/// spaces. Values are trimmed; empty values and the literal `nan` (any
/// case, a pandas artifact in the training data) are skipped.
pub fn extract_text(fields: &RequestFields) -> String {
    [&fields.path, &fields.query, &fields.headers, &fields.body]
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
        .collect::<Vec<_>>()
        .join(" ")
}
