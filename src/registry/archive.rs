//! Download archive URLs for hosted repositories
//!
//! Only `https://github.com/<owner>/<repo>[.git]` remotes get an archive
//! URL, pointing at the API zipball endpoint for the resolved reference.
//! Other hosts, self-hosted servers and non-https transports get none.

use std::sync::OnceLock;

use regex::Regex;

/// Host whose API serves zipballs for any reference
pub const GITHUB_HOST: &str = "github.com";

fn github_remote_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https://github\.com/([^/]+)/([^/]+?)(?:\.git)?$")
            .expect("github remote pattern is valid")
    })
}

/// Archive URL for `reference` of the repository at `source_url`, if the
/// host supports it
pub fn resolve_archive_url(source_url: &str, reference: &str) -> Option<String> {
    let caps = github_remote_pattern().captures(source_url)?;
    let owner = caps.get(1)?.as_str();
    let repo = caps.get(2)?.as_str();

    Some(format!(
        "https://api.{}/repos/{}/{}/zipball/{}",
        GITHUB_HOST, owner, repo, reference
    ))
}
