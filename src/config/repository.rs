//! Base repository definition (a satis.json) that generated packages are
//! appended to

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{json_kind, parse_json_object, read_json_object};
use crate::error::{hints, SatisfyError};

const REPOSITORIES_KEY: &str = "repositories";

/// A satis repository definition
///
/// Always holds a `repositories` array. Every other member is carried
/// through untouched and in its original position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepositoryDefinition {
    document: Map<String, Value>,
}

impl RepositoryDefinition {
    /// Load the definition from a file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SatisfyError> {
        let path = path.as_ref();
        let document = read_json_object(path, "repository definition", hints::missing_repositories())?;
        Self::from_document(document, &path.display().to_string())
    }

    /// Parse the definition from JSON content
    pub fn parse(content: &str) -> Result<Self, SatisfyError> {
        let document = parse_json_object(content, "repository definition", hints::missing_repositories())?;
        Self::from_document(document, "repository definition")
    }

    /// Wrap an already parsed document, checking for `repositories`
    ///
    /// An empty object counts as an empty list. A non-empty object is
    /// rejected: its entries have no position to append after.
    pub fn from_document(mut document: Map<String, Value>, origin: &str) -> Result<Self, SatisfyError> {
        if matches!(document.get(REPOSITORIES_KEY), Some(Value::Object(map)) if map.is_empty()) {
            // Replacing an existing key keeps its position
            document.insert(REPOSITORIES_KEY.to_string(), Value::Array(Vec::new()));
        }

        match document.get(REPOSITORIES_KEY) {
            Some(Value::Array(_)) => Ok(Self { document }),
            Some(other) => Err(SatisfyError::config_error_with_hint(
                format!(
                    "\"{}\" in {} must be an array, found {}",
                    REPOSITORIES_KEY,
                    origin,
                    json_kind(other)
                ),
                None,
                hints::missing_repositories(),
            )),
            None => Err(SatisfyError::config_error_with_hint(
                format!(
                    "Repo file {} must contain \"{}\" member, even if empty",
                    origin, REPOSITORIES_KEY
                ),
                None,
                hints::missing_repositories(),
            )),
        }
    }

    /// Existing repository entries, in order
    pub fn repositories(&self) -> &[Value] {
        match self.document.get(REPOSITORIES_KEY) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Copy of this definition with `entries` appended after the existing
    /// repositories
    pub fn with_appended<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut document = self.document.clone();
        if let Some(Value::Array(items)) = document.get_mut(REPOSITORIES_KEY) {
            items.extend(entries);
        }
        Self { document }
    }

    pub fn as_document(&self) -> &Map<String, Value> {
        &self.document
    }
}
