use thiserror::Error;

/// Structural failure of a raw notebook document.
///
/// A missing or empty `cells` field is *not* an error; it yields an empty notebook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("notebook document must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("notebook `cells` must be an array, found {0}")]
    CellsNotArray(&'static str),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
