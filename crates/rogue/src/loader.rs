//! Build objects from JSON or RON documents.

use std::{ffi::OsStr, fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::{Error, Result, RogueObject, error::excerpt_at};

/// Document formats accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON document with an object at the top level.
    Json,
    /// RON document with a map at the top level.
    Ron,
}

impl Format {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("json") => Some(Self::Json),
            Some("ron") => Some(Self::Ron),
            _ => None,
        }
    }
}

/// Parse `source` as `format` into value members.
pub(crate) fn parse_document(source: &str, format: Format) -> Result<RogueObject> {
    let doc: Value = match format {
        Format::Json => serde_json::from_str::<Value>(source).map_err(|err| {
            let (line, col) = (err.line().max(1), err.column().max(1));
            Error::Parse {
                path: None,
                line: Some(line),
                col: Some(col),
                message: err.to_string(),
                excerpt: Some(excerpt_at(source, line, col)),
            }
        })?,
        Format::Ron => ron::from_str::<Value>(source).map_err(|err| Error::Parse {
            path: None,
            line: None,
            col: None,
            message: err.to_string(),
            excerpt: None,
        })?,
    };
    into_object(doc)
}

/// Load an object from a `.json` or `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<RogueObject> {
    let Some(format) = Format::from_path(path) else {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported document format (expected a .json or .ron file)".to_string(),
        });
    };
    let source = fs::read_to_string(path).map_err(|err| Error::Read {
        path: Some(path.to_path_buf()),
        message: err.to_string(),
    })?;
    debug!(path = %path.display(), ?format, "loading object document");
    parse_document(&source, format).map_err(|err| err.with_path(path))
}

/// Require a top-level map and turn its entries into value members.
fn into_object(doc: Value) -> Result<RogueObject> {
    match doc {
        Value::Object(map) => Ok(RogueObject::from(map)),
        other => Err(Error::Validation {
            path: None,
            message: format!(
                "expected a map at the top level, found {}",
                kind_name(&other)
            ),
        }),
    }
}

/// Short name of a JSON value kind for diagnostics.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
