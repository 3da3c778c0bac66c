//! Line codec for the store's text format
//!
//! One line holds one entry: `key=value`, CRLF-terminated. Lines starting
//! with `#`, `;` or `[` are comments/section markers and produce no entry.
//! Values are typed by inference on read:
//!
//! - numeric text becomes Integer (or Float when it contains a `.`)
//! - unquoted `true` / `false` / `null` become Boolean / Null
//! - `"JSON:<base64>"` payloads decode into a Structured tree
//! - everything else is a String, unwrapped from surrounding double quotes
//!
//! The inference rules are ordered, and the order is load-bearing: quote
//! unwrapping happens only in the fallback branch, after the literal
//! keyword checks, so a quoted `"true"` reads back as the String `true`
//! while the unquoted word reads back as a Boolean.
//!
//! Known lossy edge: a String whose text passes the numeric test (e.g.
//! `"42"`) is written bare and re-reads as an Integer/Float after a
//! save+reload cycle. This matches the historical format and is kept.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value as Json;
use tracing::warn;

use crate::value::Value;

/// Marker prefix for inline structured payloads.
const JSON_PREFIX: &str = "JSON:";

/// Decode one line into a `(key, value)` entry.
///
/// Returns `None` for comments, section markers, blank lines, and lines
/// with an empty key. A line without `=` yields a Null value for the whole
/// line's text as key.
pub fn decode(line: &str) -> Option<(String, Value)> {
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() || matches!(line.as_bytes()[0], b'#' | b';' | b'[') {
        return None;
    }

    let (key, rhs) = match line.split_once('=') {
        Some((key, rhs)) => (key, Some(rhs)),
        None => (line, None),
    };
    if key.is_empty() {
        return None;
    }

    let value = match rhs {
        None => Value::Null,
        Some(text) => infer(text),
    };
    Some((key.to_string(), value))
}

/// Infer a typed value from raw value text, applying the format's ordered
/// rules. This is the right-hand-side half of [`decode`], exposed so that
/// callers accepting values as text (the CLI) type them identically.
pub fn infer(text: &str) -> Value {
    if let Some(value) = numeric(text) {
        return value;
    }
    if text.is_empty() {
        return Value::String(String::new());
    }
    match text {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        "null" => return Value::Null,
        _ => {}
    }

    // Fallback branch: only here does quote unwrapping happen, keeping the
    // literal checks above on the raw text.
    let text = unquote(text);
    if let Some(payload) = text.strip_prefix(JSON_PREFIX) {
        match decode_structured(payload) {
            Ok(tree) => return Value::Structured(tree),
            Err(reason) => {
                // Degrade the single entry to its plain text, keep loading.
                warn!(reason, "malformed structured payload, keeping as text");
            }
        }
    }
    Value::String(text.to_string())
}

/// Encode an entry back into its line text, without the CRLF terminator.
pub fn encode(key: &str, value: &Value) -> String {
    match value {
        Value::Integer(n) => format!("{key}={n}"),
        Value::Float(f) => format!("{key}={}", format_float(*f)),
        Value::Boolean(b) => format!("{key}={b}"),
        Value::Null => format!("{key}=null"),
        Value::String(s) if s.is_empty() => format!("{key}=\"\""),
        // Numeric-looking text goes out bare and re-reads as a number.
        Value::String(s) if numeric(s).is_some() => format!("{key}={s}"),
        Value::String(s) => format!("{key}=\"{s}\""),
        Value::Structured(tree) => {
            let b64 = BASE64.encode(tree.to_string());
            format!("{key}=\"{JSON_PREFIX}{b64}\"")
        }
    }
}

/// Numeric text test: with a `.` it must parse as a finite float, without
/// one it must parse as a signed 64-bit integer.
fn numeric(text: &str) -> Option<Value> {
    if text.contains('.') {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
    } else {
        text.parse::<i64>().ok().map(Value::Integer)
    }
}

/// Strip one matching pair of surrounding double quotes, if present.
fn unquote(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Render a float so it re-reads as a Float: integral values keep a
/// trailing `.0` to satisfy the contains-a-dot rule on the way back in.
fn format_float(f: f64) -> String {
    let mut s = f.to_string();
    if f.is_finite() && !s.contains('.') && !s.contains('e') {
        s.push_str(".0");
    }
    s
}

fn decode_structured(payload: &str) -> Result<Json, String> {
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| format!("invalid base64: {e}"))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("invalid JSON: {e}"))
}
