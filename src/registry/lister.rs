//! Listing of remote references
//!
//! The resolver only consumes raw listing lines; where they come from is
//! behind [`RefLister`]. [`GitRefLister`] asks a remote directly with
//! `git ls-remote --tags --heads`, without cloning.

use crate::exec::{command_exists, run_command};

/// Keeps git from blocking on a credential prompt for private remotes
const GIT_ENV: &[(&str, &str)] = &[("GIT_TERMINAL_PROMPT", "0")];
use crate::utils::terminal::{print_info, print_warning};

/// Source of raw `<object-id> <ref-path>` lines for a remote
pub trait RefLister: Send + Sync {
    /// List tags and branches of `url`. Failures yield an empty listing.
    fn list_refs(&self, url: &str) -> Vec<String>;
}

/// Lists references with the git command line client
#[derive(Debug, Clone)]
pub struct GitRefLister {
    /// Git executable path
    git_path: String,
    verbose: bool,
}

impl Default for GitRefLister {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRefLister {
    pub fn new(git_path: impl Into<String>) -> Self {
        Self {
            git_path: git_path.into(),
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn git_path(&self) -> &str {
        &self.git_path
    }

    /// Whether the configured git executable can be found
    pub fn is_available(&self) -> bool {
        command_exists(&self.git_path)
    }
}

impl RefLister for GitRefLister {
    fn list_refs(&self, url: &str) -> Vec<String> {
        let result = match run_command(&self.git_path, &["ls-remote", "--tags", "--heads", url], GIT_ENV) {
            Ok(result) => result,
            Err(e) => {
                print_warning(&format!("Cannot list references of {}: {:#}", url, e));
                return Vec::new();
            }
        };

        if !result.success {
            print_warning(&format!(
                "git ls-remote failed for {} (exit code {}): {}",
                url,
                result.exit_code,
                result.stderr.trim()
            ));
            return Vec::new();
        }

        let lines: Vec<String> = result.stdout.lines().map(str::to_string).collect();
        if self.verbose {
            print_info(&format!(
                "Listed {} references from {} in {:.2}s",
                lines.len(),
                url,
                result.duration.as_secs_f64()
            ));
        }
        lines
    }
}

/// Fixed listings keyed by URL
#[cfg(test)]
#[derive(Debug, Default)]
pub struct StaticRefLister {
    listings: std::collections::HashMap<String, Vec<String>>,
}

#[cfg(test)]
impl StaticRefLister {
    pub fn with_listing(mut self, url: &str, lines: &[&str]) -> Self {
        self.listings
            .insert(url.to_string(), lines.iter().map(|l| l.to_string()).collect());
        self
    }
}

#[cfg(test)]
impl RefLister for StaticRefLister {
    fn list_refs(&self, url: &str) -> Vec<String> {
        self.listings.get(url).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_git_gives_empty_listing() {
        let lister = GitRefLister::new("/nonexistent/git");
        assert!(!lister.is_available());
        assert!(lister.list_refs("https://github.com/acme/widget.git").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_git_gives_empty_listing() {
        // `false` ignores its arguments and exits non-zero
        let lister = GitRefLister::new("false");
        assert!(lister.list_refs("https://github.com/acme/widget.git").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_git_runs_without_prompt() {
        use std::os::unix::fs::PermissionsExt;

        // A stand-in git that lists one branch only when prompting is off
        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("git");
        std::fs::write(
            &script,
            "#!/bin/sh\n[ \"$GIT_TERMINAL_PROMPT\" = 0 ] || exit 1\necho \"abc\trefs/heads/main\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let lister = GitRefLister::new(script.to_string_lossy());
        assert_eq!(lister.list_refs("https://example.com/acme/widget.git"), vec!["abc\trefs/heads/main"]);
    }

    #[test]
    fn test_static_lister() {
        let lister = StaticRefLister::default().with_listing("u", &["a refs/heads/main"]);
        assert_eq!(lister.list_refs("u"), vec!["a refs/heads/main"]);
        assert!(lister.list_refs("other").is_empty());
    }
}
