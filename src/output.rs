//! Writing the generated repository definition
//!
//! The manifest is pretty printed with four-space indentation. serde_json
//! never escapes `/`, so URLs come out verbatim.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::RepositoryDefinition;
use crate::error::SatisfyError;

/// Serialize a value with four-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize repository definition")?;
    String::from_utf8(buf).context("Serialized repository definition is not UTF-8")
}

/// Write the definition to `output`, or to stdout when no path is given
pub fn write_definition(definition: &RepositoryDefinition, output: Option<&Path>) -> Result<()> {
    let mut content = to_pretty_json(definition)?;
    content.push('\n');

    match output {
        Some(path) => write_file(path, &content).map_err(|source| SatisfyError::Output {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.flush())
                .context("Failed to write repository definition to stdout")?;
        }
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}
