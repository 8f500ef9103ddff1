//! Null-safe coercions from raw dump cells into strict internal values.
//!
//! Field-level irregularities never produce errors here: every helper
//! resolves bad input to an empty string, an empty list or `None`.

use crate::types::RawValue;
use once_cell::sync::Lazy;
use regex::Regex;

static LIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,/]").unwrap());

/// Null becomes `""`, everything else is stringified and trimmed.
pub fn normalize(value: &RawValue) -> String {
    match value {
        RawValue::Null => String::new(),
        RawValue::String(s) => s.trim().to_string(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Number(n) => number_to_string(n),
        RawValue::Array(items) => items.iter().map(normalize).collect::<Vec<_>>().join(","),
        RawValue::Object(_) => value.to_string(),
    }
}

/// Integral floats print without a fraction, so `3.0` reads as `"3"`.
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Like [`normalize`] but maps the empty string to `None`.
pub fn normalize_opt(value: &RawValue) -> Option<String> {
    let s = normalize(value);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Finite number or `None`. Never panics.
pub fn to_number(value: &RawValue) -> Option<f64> {
    let n = match value {
        RawValue::Number(n) => n.as_f64()?,
        RawValue::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Always returns a list: arrays are normalized element-wise, anything else
/// is split on `,` or `/`.
pub fn listify(value: &RawValue) -> Vec<String> {
    match value {
        RawValue::Array(items) => items
            .iter()
            .map(normalize)
            .filter(|s| !s.is_empty())
            .collect(),
        other => LIST_SEPARATOR
            .split(&normalize(other))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Appends `value` unless already present; keeps first-seen order.
pub(crate) fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
