//! Errors for the few fallible entry points: parsing JSON text and JSON
//! pointers. Everything else in the crate degrades to `None` or `false`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input wasn't valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed, but its top level wasn't an object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// A JSON pointer must be empty or start with `/`.
    #[error("json pointer must be absolute or empty: {0:?}")]
    InvalidPointer(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Names the kind of a JSON value for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
