//! Query string tokenizer and per-parameter value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::color::parse_color;
use super::schema::{self, PARAMS, ParamKind, ParamSpec};
use super::{Arguments, ParseWarning, Value};
use crate::caption::Unit;

/// Apply every `key=value` pair in `query` to `args`, collecting warnings.
pub(crate) fn apply_query(args: &mut Arguments, query: &str) -> Vec<ParseWarning> {
    let mut warnings = Vec::new();
    let mut seen: Vec<&'static str> = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);

        let Some(spec) = schema::find(key.trim()) else {
            warnings.push(ParseWarning::KeyNotRecognized { key, value });
            continue;
        };

        if seen.contains(&spec.name) {
            warnings.push(ParseWarning::DuplicateKey {
                key: spec.name,
                value: value.clone(),
            });
        } else {
            seen.push(spec.name);
        }

        match parse_value(spec, &value, &mut warnings) {
            Some(v) => {
                args.set(spec.id, v);
            }
            None => warnings.push(ParseWarning::ValueInvalid {
                key: spec.name,
                value,
                reason: expected(spec),
            }),
        }
    }

    warnings
}

/// Parse one value according to its parameter's kind.
fn parse_value(spec: &ParamSpec, value: &str, warnings: &mut Vec<ParseWarning>) -> Option<Value> {
    match spec.kind {
        ParamKind::Int { min, max, .. } => {
            let v: i64 = value.trim().parse().ok()?;
            let clamped = v.clamp(min as i64, max as i64) as u32;
            if clamped as i64 != v {
                warnings.push(ParseWarning::ValueClamped {
                    key: spec.name,
                    value: String::from(value),
                    clamped,
                });
            }
            Some(Value::Int(clamped))
        }
        ParamKind::Color { .. } => parse_color(value).map(Value::Color),
        ParamKind::Font => {
            let name = value.trim();
            Some(Value::Font((!name.is_empty()).then(|| String::from(name))))
        }
        ParamKind::Text { .. } => Some(Value::Text(String::from(value))),
        ParamKind::Unit { .. } => Unit::parse(value).map(Value::Unit),
    }
}

fn expected(spec: &ParamSpec) -> &'static str {
    match spec.kind {
        ParamKind::Int { .. } => "expected an integer",
        ParamKind::Color { .. } => "expected hex color or color name",
        ParamKind::Unit { .. } => "expected px|pt|in|mm|pc",
        ParamKind::Font | ParamKind::Text { .. } => "expected text",
    }
}

/// Serialize every parameter, in registration order.
pub(crate) fn to_query(args: &Arguments) -> String {
    let mut out = String::new();
    for spec in &PARAMS {
        let value = match args.get(spec.id) {
            Value::Int(v) => alloc::format!("{v}"),
            Value::Color(c) => alloc::format!("{c}"),
            Value::Font(f) => f.unwrap_or_default(),
            Value::Text(t) => t,
            Value::Unit(u) => String::from(u.abbreviation()),
        };
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(spec.name);
        out.push('=');
        percent_encode(&value, &mut out);
    }
    out
}

// ---- Query string tokenizer ----

/// Split query string on '&', dropping a leading '?'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component, treating '+' as space.
///
/// Decoded bytes are read as UTF-8; invalid sequences become U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode everything except unreserved characters.
fn percent_encode(s: &str, out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0xf) as usize] as char);
        }
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
