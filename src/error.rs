//! Error types and helpers for user-friendly error messages
//!
//! Configuration problems are fatal and reported before any remote is
//! contacted. Per-source resolution problems are absorbed and logged, except
//! for [`SatisfyError::NoVersions`] when the strict policy is requested.

use std::path::PathBuf;

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum SatisfyError {
    /// Malformed or unreadable input configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// A package source produced no qualifying versions (strict mode only)
    #[error("No versions found for '{package}' at {url}")]
    NoVersions {
        package: String,
        url: String,
        hint: String,
    },

    /// The generated manifest could not be written
    #[error("Failed to write repository definition to {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SatisfyError {
    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create an error for a source without qualifying versions
    pub fn no_versions(package: impl Into<String>, url: impl Into<String>) -> Self {
        Self::NoVersions {
            package: package.into(),
            url: url.into(),
            hint: hints::no_versions().to_string(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, SatisfyError::Config { .. })
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            SatisfyError::Config { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            SatisfyError::NoVersions { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            SatisfyError::Output { source, .. } => {
                eprintln!("  {} {}", style("caused by:").dim(), source);
            }
        }

        eprintln!();
    }
}

/// Helper trait for adding hints to Result types
pub trait ResultExt<T> {
    /// Add context with a hint, turning the failure into a configuration error
    fn context_with_hint(
        self,
        context: impl Into<String>,
        hint: impl Into<String>,
    ) -> Result<T, SatisfyError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context_with_hint(
        self,
        context: impl Into<String>,
        hint: impl Into<String>,
    ) -> Result<T, SatisfyError> {
        self.map_err(|e| {
            SatisfyError::config_error_with_hint(
                format!("{}: {}", context.into(), e),
                Some(e.into()),
                hint,
            )
        })
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing Git
    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager:\n\
         • macOS: brew install git\n\
         • Ubuntu: sudo apt install git\n\
         • Windows: winget install Git.Git\n\
         \n\
         Or point satisfy at a git executable with --git / SATISFY_GIT."
    }

    /// Get hint for an invalid packages file
    pub fn invalid_packages_file() -> &'static str {
        "The packages file must be a JSON object keyed by package name:\n\
         {\n\
         \x20   \"acme/widget\": {\n\
         \x20       \"url\": \"https://github.com/acme/widget.git\",\n\
         \x20       \"minversion\": \"2.0\",\n\
         \x20       \"defaults\": { \"homepage\": \"https://acme.example\" }\n\
         \x20   }\n\
         }"
    }

    /// Get hint for a repository definition without `repositories`
    pub fn missing_repositories() -> &'static str {
        "The repository definition must contain a \"repositories\" array, even if empty:\n\
         { \"name\": \"my/repo\", \"repositories\": [] }"
    }

    /// Get hint for an invalid minimum version
    pub fn invalid_min_version() -> &'static str {
        "minversion must be a dotted number such as \"2\", \"2.0\" or \"2.0.1\""
    }

    /// Get hint for a source without versions
    pub fn no_versions() -> &'static str {
        "Check that the URL is reachable and that it has tags or branches.\n\
         Run without --fail-on-empty to skip such sources with a warning."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = SatisfyError::config_error_with_hint("Cannot open packages.json", None, hints::invalid_packages_file());
        assert_eq!(err.to_string(), "Configuration error: Cannot open packages.json");
        assert!(err.is_config());
    }

    #[test]
    fn test_context_with_hint_keeps_source() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err = parsed
            .context_with_hint("Cannot parse repo.json", hints::missing_repositories())
            .unwrap_err();

        match &err {
            SatisfyError::Config { message, source, hint } => {
                assert!(message.starts_with("Cannot parse repo.json: "));
                assert!(source.is_some());
                assert!(hint.is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_no_versions_is_not_config() {
        let err = SatisfyError::no_versions("acme/widget", "https://github.com/acme/widget.git");
        assert!(!err.is_config());
        assert!(err.to_string().contains("acme/widget"));
    }
}
