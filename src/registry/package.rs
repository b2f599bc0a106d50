//! Package descriptors for satis `package` repositories
//!
//! A descriptor starts from the source's defaults; identity, source and
//! dist fields are then set on top, so defaults never override them.
//!
//! ```json
//! {
//!     "type": "package",
//!     "package": {
//!         "homepage": "https://acme.example",
//!         "description": "Widgets; Autogenerated by satisfy",
//!         "name": "acme/widget",
//!         "version": "2.0.0",
//!         "source": { "url": "https://github.com/acme/widget.git", "type": "git", "reference": "v2.0.0" },
//!         "dist": { "url": "https://api.github.com/repos/acme/widget/zipball/v2.0.0", "type": "zip" }
//!     }
//! }
//! ```

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::archive::resolve_archive_url;
use crate::config::PackageSource;

/// Marker appended to every generated description
pub const AUTOGENERATED_MARKER: &str = "Autogenerated by satisfy";

/// Description for a generated package given the configured one
pub fn autogenerated_description(existing: Option<&str>) -> String {
    match existing {
        Some(description) => format!("{}; {}", description, AUTOGENERATED_MARKER),
        None => AUTOGENERATED_MARKER.to_string(),
    }
}

/// One resolved version of a package
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PackageDescriptor {
    fields: Map<String, Value>,
}

impl PackageDescriptor {
    /// Build the descriptor for `version_key` of `source`
    pub fn synthesize(source: &PackageSource, version_key: &str, reference: &str) -> Self {
        let mut fields = source.defaults.clone();

        // Non-string descriptions are replaced rather than stringified
        let description = autogenerated_description(fields.get("description").and_then(Value::as_str));
        fields.insert("description".to_string(), Value::String(description));

        fields.insert("name".to_string(), Value::String(source.name.clone()));
        fields.insert("version".to_string(), Value::String(version_key.to_string()));
        fields.insert(
            "source".to_string(),
            json!({
                "url": source.url,
                "type": "git",
                "reference": reference,
            }),
        );

        match resolve_archive_url(&source.url, reference) {
            Some(url) => {
                fields.insert("dist".to_string(), json!({ "url": url, "type": "zip" }));
            }
            None => {
                fields.remove("dist");
            }
        }

        Self { fields }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    pub fn reference(&self) -> Option<&str> {
        self.fields.get("source")?.get("reference")?.as_str()
    }

    pub fn dist_url(&self) -> Option<&str> {
        self.fields.get("dist")?.get("url")?.as_str()
    }

    /// Wrap into a `{"type": "package", "package": ...}` repository entry
    pub fn into_repository_entry(self) -> Value {
        json!({
            "type": "package",
            "package": Value::Object(self.fields),
        })
    }
}
