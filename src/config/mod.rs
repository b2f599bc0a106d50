//! Input configuration: the package list and the base repository definition
//!
//! Both files are JSON. Key order is preserved so that generated manifests
//! keep the layout of their inputs.

mod packages;
mod repository;

pub use packages::{PackageList, PackageSource};
pub use repository::RepositoryDefinition;

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ResultExt, SatisfyError};

/// Read a file and parse it as a JSON object
fn read_json_object(path: &Path, what: &str, hint: &str) -> Result<Map<String, Value>, SatisfyError> {
    let content = std::fs::read_to_string(path)
        .context_with_hint(format!("Cannot open {} {}", what, path.display()), hint)?;

    parse_json_object(&content, &format!("{} {}", what, path.display()), hint)
}

/// Parse JSON content that must be an object at the top level
fn parse_json_object(content: &str, origin: &str, hint: &str) -> Result<Map<String, Value>, SatisfyError> {
    let value: Value = serde_json::from_str(content)
        .context_with_hint(format!("Cannot parse {}", origin), hint)?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(SatisfyError::config_error_with_hint(
            format!("{} must be a JSON object, found {}", origin, json_kind(&other)),
            None,
            hint,
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
