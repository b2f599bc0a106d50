//! Package list parsing
//!
//! ```json
//! {
//!     "frontend/fontawesome": {
//!         "url": "https://github.com/FortAwesome/Font-Awesome.git",
//!         "minversion": "2.0",
//!         "defaults": { "homepage": "http://fontawesome.io/" }
//!     },
//!     "frontend/bootstrap": {
//!         "url": "git://github.com/twbs/bootstrap.git",
//!         "defaults": []
//!     }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{json_kind, parse_json_object, read_json_object};
use crate::error::{hints, SatisfyError};
use crate::version::DottedVersion;

/// One configured package: a git remote plus the metadata every generated
/// version of it starts from
#[derive(Debug, Clone)]
pub struct PackageSource {
    /// Package name, unique within the list
    pub name: String,

    /// Git remote URL
    pub url: String,

    /// Versions below this bound are skipped
    pub min_version: Option<DottedVersion>,

    /// Metadata copied into every descriptor of this package
    pub defaults: Map<String, Value>,
}

impl PackageSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            min_version: None,
            defaults: Map::new(),
        }
    }

    pub fn with_min_version(mut self, bound: DottedVersion) -> Self {
        self.min_version = Some(bound);
        self
    }

    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }
}

/// A minimum version as written: `"2.0"` or a bare number such as `2.0`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBound {
    Text(String),
    Number(serde_json::Number),
}

impl RawBound {
    fn into_text(self) -> String {
        match self {
            RawBound::Text(text) => text,
            RawBound::Number(number) => number.to_string(),
        }
    }
}

/// Package entry as written in the packages file
#[derive(Debug, Deserialize)]
struct RawPackageSource {
    url: String,

    #[serde(default, alias = "minVersion", alias = "min_version")]
    minversion: Option<RawBound>,

    #[serde(default)]
    defaults: Value,
}

impl RawPackageSource {
    fn into_source(self, name: &str) -> Result<PackageSource, SatisfyError> {
        let min_version = match self.minversion.map(RawBound::into_text) {
            Some(raw) => Some(DottedVersion::parse_bound(&raw).map_err(|e| {
                SatisfyError::config_error_with_hint(
                    format!("Invalid minversion for '{}': {}", name, e),
                    Some(e),
                    hints::invalid_min_version(),
                )
            })?),
            None => None,
        };

        let defaults = match self.defaults {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            // An empty list is how "no defaults" serializes from some tools
            Value::Array(items) if items.is_empty() => Map::new(),
            other => {
                return Err(SatisfyError::config_error_with_hint(
                    format!(
                        "defaults for '{}' must be an object, found {}",
                        name,
                        json_kind(&other)
                    ),
                    None,
                    hints::invalid_packages_file(),
                ))
            }
        };

        Ok(PackageSource {
            name: name.to_string(),
            url: self.url,
            min_version,
            defaults,
        })
    }
}

/// Ordered set of package sources
#[derive(Debug, Clone, Default)]
pub struct PackageList {
    sources: Vec<PackageSource>,
}

impl PackageList {
    /// Load the package list from a file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SatisfyError> {
        let map = read_json_object(path.as_ref(), "packages file", hints::invalid_packages_file())?;
        Self::from_map(map)
    }

    /// Parse the package list from JSON content
    pub fn parse(content: &str) -> Result<Self, SatisfyError> {
        let map = parse_json_object(content, "packages file", hints::invalid_packages_file())?;
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, SatisfyError> {
        let mut sources = Vec::with_capacity(map.len());

        for (name, entry) in map {
            let raw: RawPackageSource = serde_json::from_value(entry).map_err(|e| {
                SatisfyError::config_error_with_hint(
                    format!("Invalid package definition for '{}': {}", name, e),
                    Some(e.into()),
                    hints::invalid_packages_file(),
                )
            })?;
            sources.push(raw.into_source(&name)?);
        }

        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[PackageSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
