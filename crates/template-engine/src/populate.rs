//! Placeholder interpolation for contract template previews

use serde_json::Value;
use shared_types::TemplateData;
use tracing::debug;

use crate::scanner::scan_placeholders;

/// Replace every resolvable `{{path}}` token in `html` with its value from `data`.
///
/// Tokens whose path does not resolve, or resolves to `null`, are left
/// exactly as written. Every other value is substituted, falsy ones (`0`,
/// `""`, `false`) included. Never fails.
pub fn populate_template(html: &str, data: &TemplateData) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut output = String::with_capacity(html.len());
    let mut cursor = 0;
    let mut substituted = 0usize;

    for placeholder in scan_placeholders(html) {
        match resolve_path(data, &placeholder.path).and_then(render_value) {
            Some(value) => {
                output.push_str(&html[cursor..placeholder.span.start]);
                output.push_str(&value);
                cursor = placeholder.span.end;
                substituted += 1;
            }
            None => debug!(path = %placeholder.path, "Placeholder left unresolved"),
        }
    }

    output.push_str(&html[cursor..]);
    debug!(substituted, "Template populated");
    output
}

/// Walk `data` along the dotted `path`, one level per segment.
///
/// Array levels are indexed by a decimal segment (`items.0.name`).
pub fn resolve_path<'a>(data: &'a TemplateData, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Paths of the tokens in `html` that [`populate_template`] would leave verbatim
pub fn unresolved_placeholders(html: &str, data: &TemplateData) -> Vec<String> {
    scan_placeholders(html)
        .into_iter()
        .filter(|p| resolve_path(data, &p.path).and_then(render_value).is_none())
        .map(|p| p.path)
        .collect()
}

/// Text substituted for a resolved value; `None` (only for `null`) keeps the token
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(stringify(other)),
    }
}

/// Arrays join their items with `,` (null items render empty); objects
/// render as compact JSON
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
