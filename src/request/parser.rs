//! Best-effort request parser for payloads that are not real HTTP messages.
//!
//! Four shapes are recognised, checked in priority order: a method line
//! (`GET /path?q=v body`), a JSON body (`{...}` / `[...]`), a bare query
//! string (`a=1&b=2`), and anything else treated as a path.

use super::RequestFields;
use crate::features::normalize::has_valid_escapes;

const METHOD_PREFIXES: [&str; 4] = ["GET ", "POST ", "PUT ", "DELETE "];

/// Decompose `payload` into request fields. Never fails; unrecognised input
/// lands in `path`.
pub fn parse(payload: &str) -> RequestFields {
    let mut row = RequestFields::default();
    if payload.is_empty() {
        return row;
    }

    if METHOD_PREFIXES.iter().any(|p| payload.starts_with(p)) {
        let mut parts = payload.splitn(3, ' ');
        if let Some(method) = parts.next() {
            row.method = method.to_string();
        }
        if let Some(url_part) = parts.next() {
            match split_url(url_part) {
                Some((path, query)) => {
                    row.path = path.to_string();
                    row.query = query.to_string();
                }
                None => row.path = url_part.to_string(),
            }
        }
        if let Some(rest) = parts.next() {
            row.body = rest.to_string();
        }
    } else if payload.starts_with('{') || payload.starts_with('[') {
        row.method = "POST".to_string();
        row.body = payload.to_string();
    } else if (payload.contains('=') || payload.contains('&')) && !payload.contains(' ') {
        row.query = payload.to_string();
    } else {
        row.path = payload.to_string();
    }

    row
}

/// Split a URI reference into its raw path and raw query. The authority and
/// fragment are dropped; nothing is decoded or normalised (`..` segments
/// survive).
///
/// Returns `None` for references a strict URI parser rejects: control
/// characters, a colon in the first segment of a relative path, or a
/// malformed percent escape in the path or fragment.
fn split_url(raw: &str) -> Option<(&str, &str)> {
    if raw.chars().any(|c| c.is_ascii_control()) {
        return None;
    }

    let (raw, fragment) = raw.split_once('#').unwrap_or((raw, ""));
    if !has_valid_escapes(fragment) {
        return None;
    }
    let (rest, query) = raw.split_once('?').unwrap_or((raw, ""));

    let path = match scheme_end(rest) {
        Some(colon) => skip_authority(&rest[colon + 1..]),
        None if rest.starts_with("//") => skip_authority(rest),
        None => {
            let first_segment = rest.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return None;
            }
            rest
        }
    };

    if !has_valid_escapes(path) {
        return None;
    }
    Some((path, query))
}

/// Path part of a hierarchical part: after `//authority` when present.
fn skip_authority(hier: &str) -> &str {
    match hier.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map_or("", |slash| &authority_and_path[slash..]),
        None => hier,
    }
}

/// Byte offset of the `:` terminating a leading URI scheme, if any.
fn scheme_end(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b':' => return Some(i),
            b if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.') => {}
            _ => return None,
        }
    }
    None
}
