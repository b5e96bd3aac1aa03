//! Multiline-string normalization for raw notebook documents.
//!
//! nbformat allows `source`, stream `text` and textual `data` payloads to be either one string
//! or an array of line fragments. Fragments already carry their own `\n`, so they are joined
//! with no separator. Everything here is idempotent: a string input is left untouched.
use serde_json::Value;

/// Collapses a string-or-array-of-strings value into one string.
///
/// Returns `None` when the value is not text (numbers, objects, arrays holding non-strings).
pub fn normalize_multiline(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let mut out = String::new();
            for part in parts {
                out.push_str(part.as_str()?);
            }
            Some(out)
        }
        _ => None,
    }
}

/// Rewrites a value in place if it is a fragment array.
///
/// Returns `true` when the value is (now) a single string.
fn collapse_in_place(value: &mut Value) -> bool {
    if value.is_string() {
        return true;
    }
    match normalize_multiline(value) {
        Some(joined) => {
            *value = Value::String(joined);
            true
        }
        None => false,
    }
}

/// Normalizes every multiline field of a raw notebook in place.
///
/// Touches cell `source`, output `text`, and every string-or-array entry of output `data`.
/// Fields of any other shape are left as they are; the typed model decides what to do with them.
pub fn normalize_document(doc: &mut Value) {
    let Some(cells) = doc.get_mut("cells").and_then(Value::as_array_mut) else {
        return;
    };

    for cell in cells.iter_mut() {
        let Some(cell) = cell.as_object_mut() else {
            continue;
        };
        if let Some(source) = cell.get_mut("source") {
            collapse_in_place(source);
        }

        let Some(outputs) = cell.get_mut("outputs").and_then(Value::as_array_mut) else {
            continue;
        };
        for output in outputs.iter_mut() {
            normalize_output(output);
        }
    }
}

fn normalize_output(output: &mut Value) {
    let Some(output) = output.as_object_mut() else {
        return;
    };
    if let Some(text) = output.get_mut("text") {
        collapse_in_place(text);
    }
    if let Some(data) = output.get_mut("data").and_then(Value::as_object_mut) {
        for payload in data.values_mut() {
            collapse_in_place(payload);
        }
    }
}
