//! Front-matter serialisation: render a document's metadata as a YAML block.
//!
//! ## Why a custom emitter on top of `serde_yaml::Value`?
//!
//! The output files are a wire contract for downstream static-site tooling
//! that was written against the classic js-yaml rendering of this header:
//! 2-space indentation, `categories` as a block sequence, and scalars that
//! YAML would otherwise misread — dates like `2024-01-01`, `true`, `007` —
//! single-quoted. `serde_yaml`'s emitter follows the YAML 1.2 core schema
//! and leaves date-like scalars unquoted, which silently changes their type
//! for YAML 1.1 consumers. So the metadata is built as a
//! [`serde_yaml::Value`] mapping (the structured form callers can consume
//! directly) and rendered by a small emitter that applies the stricter
//! quoting rules. Every emitted block still re-parses with `serde_yaml`
//! to the same values; the tests hold that invariant.
//!
//! Field order is the document's own: `title`, `status`, `datePublished`,
//! `tags`, `categories`. Absent fields are omitted entirely — an absent
//! field says nothing, while an empty string still serialises (as `''`),
//! keeping "empty" and "not supplied" distinguishable in the output.

use crate::pipeline::mapper::Document;
use serde_yaml::{Mapping, Value};

/// Build the front-matter metadata as a structured YAML mapping.
///
/// Body content is not part of the front matter.
pub fn front_matter_value(doc: &Document) -> Value {
    let mut map = Mapping::new();
    let mut put = |key: &str, value: Option<Value>| {
        if let Some(value) = value {
            map.insert(Value::String(key.to_string()), value);
        }
    };

    put("title", doc.title.clone().map(Value::String));
    put("status", doc.status.clone().map(Value::String));
    put(
        "datePublished",
        doc.date_published.clone().map(Value::String),
    );
    put("tags", doc.tags.clone().map(Value::String));
    put(
        "categories",
        doc.categories.as_ref().map(|cats| {
            Value::Sequence(cats.iter().cloned().map(Value::String).collect())
        }),
    );

    Value::Mapping(map)
}

/// Render a document's metadata fields as a YAML front-matter block.
///
/// The returned block has no trailing newline; the writer owns the `---`
/// delimiters and surrounding layout.
pub fn serialize(doc: &Document) -> String {
    let Value::Mapping(map) = front_matter_value(doc) else {
        unreachable!("front_matter_value always builds a mapping");
    };

    let mut lines: Vec<String> = Vec::with_capacity(map.len() + 2);
    for (key, value) in &map {
        let key = key.as_str().unwrap_or_default();
        match value {
            Value::Sequence(items) if items.is_empty() => {
                // A bare "key:" would re-parse as null, not an empty list.
                lines.push(format!("{key}: []"));
            }
            Value::Sequence(items) => {
                lines.push(format!("{key}:"));
                for item in items {
                    let scalar = item.as_str().unwrap_or_default();
                    lines.push(format!("  - {}", emit_scalar(scalar)));
                }
            }
            Value::String(s) => lines.push(format!("{key}: {}", emit_scalar(s))),
            other => lines.push(format!("{key}: {other:?}")),
        }
    }
    lines.join("\n")
}

/// Emit one string scalar, quoting whenever a YAML 1.1 reader could
/// resolve the plain form to anything other than this exact string.
fn emit_scalar(s: &str) -> String {
    if s.chars().any(|c| c.is_control()) {
        return double_quote(s);
    }
    if needs_quoting(s) {
        return format!("'{}'", s.replace('\'', "''"));
    }
    s.to_string()
}

fn needs_quoting(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    // Leading/trailing whitespace would be eaten by a plain scalar.
    if s != s.trim() {
        return true;
    }
    // Values the YAML 1.1 resolver claims as null/bool.
    const RESOLVED: &[&str] = &[
        "~", "null", "true", "false", "yes", "no", "on", "off", "y", "n",
    ];
    let lower = s.to_ascii_lowercase();
    if RESOLVED.contains(&lower.as_str()) {
        return true;
    }
    if looks_numeric(s) || looks_like_timestamp(s) {
        return true;
    }
    // Leading character that is a YAML indicator in block context.
    let first = s.chars().next().unwrap_or(' ');
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return true;
    }
    // A ": " or trailing ":" would start a mapping; " #" starts a comment.
    s.contains(": ") || s.ends_with(':') || s.contains(" #")
}

fn looks_numeric(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    if body.is_empty() {
        return false;
    }
    body.parse::<f64>().is_ok()
        || body.starts_with("0x")
        || body.starts_with("0o")
        || matches!(body, ".inf" | ".Inf" | ".INF" | ".nan" | ".NaN" | ".NAN")
}

/// YAML 1.1 resolves `2024-01-01` (and the long ISO forms) as a timestamp.
fn looks_like_timestamp(s: &str) -> bool {
    let date_len = s
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'-')
        .count();
    let date = &s[..date_len];
    let mut parts = date.split('-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if parts.next().is_some() {
        return false;
    }
    let plausible = y.len() == 4
        && !m.is_empty()
        && m.len() <= 2
        && !d.is_empty()
        && d.len() <= 2
        && [y, m, d].iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()));
    // Either a bare date, or a date followed by a time part.
    plausible && (date_len == s.len() || s[date_len..].starts_with(['T', 't', ' ']))
}

fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
