//! Heuristic decomposition of raw request strings into HTTP-like fields.

mod joiner;
mod parser;

pub use joiner::extract_text;
pub use parser::parse;

use serde::{Deserialize, Serialize};

/// Field names in their canonical order.
pub const FIELD_NAMES: [&str; 5] = ["method", "path", "query", "headers", "body"];

/// HTTP-like fields of a single request. Built fresh per parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFields {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: String,
    pub body: String,
}

impl Default for RequestFields {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: String::new(),
            headers: String::new(),
            body: String::new(),
        }
    }
}

impl RequestFields {
    /// Look up a field by name; `None` for anything outside [`FIELD_NAMES`].
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "method" => Some(&self.method),
            "path" => Some(&self.path),
            "query" => Some(&self.query),
            "headers" => Some(&self.headers),
            "body" => Some(&self.body),
            _ => None,
        }
    }

    /// `(name, value)` pairs in [`FIELD_NAMES`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELD_NAMES
            .into_iter()
            .filter_map(move |name| self.get(name).map(|v| (name, v)))
    }
}
