//! Document Loading
//!
//! Reads a JSON document from disk into a [`serde_json::Value`]. Object key
//! order is preserved so that reports follow document order.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and parse a JSON document from a file.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value, DocumentError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON document from a string.
pub fn parse_document(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(content)
}

/// Name of the JSON type of `value`, as used in shape messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
