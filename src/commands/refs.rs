//! Refs command - show the versions a single remote would publish
//!
//! Usage:
//!   satisfy refs https://github.com/acme/widget.git
//!   satisfy refs https://github.com/acme/widget.git --min-version 2.0 --sort

use anyhow::Result;
use clap::Args;

use crate::config::PackageSource;
use crate::error::{hints, SatisfyError};
use crate::registry::{resolve_archive_url, GitRefLister, RefLister, ResolveOptions, Resolver};
use crate::utils::terminal::print_warning;
use crate::version::DottedVersion;

/// List the versions found at a git URL
#[derive(Args, Debug)]
pub struct RefsCommand {
    /// Git remote URL
    pub url: String,

    /// Skip versions below this bound
    #[arg(long, value_name = "VERSION")]
    pub min_version: Option<String>,

    /// Order versions from lowest to highest
    #[arg(long)]
    pub sort: bool,

    /// Git executable used to list remote references
    #[arg(long, env = "SATISFY_GIT", default_value = "git", value_name = "PATH")]
    pub git: String,
}

impl RefsCommand {
    /// Execute the refs command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let mut source = PackageSource::new(self.url.clone(), self.url.clone());
        if let Some(raw) = &self.min_version {
            let bound = DottedVersion::parse_bound(raw).map_err(|e| {
                SatisfyError::config_error_with_hint(
                    format!("Invalid --min-version '{}': {}", raw, e),
                    Some(e),
                    hints::invalid_min_version(),
                )
            })?;
            source = source.with_min_version(bound);
        }

        let lister = GitRefLister::new(&self.git).verbose(verbose);
        let lines = lister.list_refs(&source.url);
        let resolver = Resolver::new(lister).with_options(ResolveOptions {
            sort: self.sort,
            verbose,
            ..Default::default()
        });

        let candidates = resolver.qualifying_versions(&source, &lines);
        if candidates.is_empty() {
            print_warning(&format!("No versions found at {}", source.url));
            return Ok(());
        }

        for (version, reference) in &candidates {
            match resolve_archive_url(&source.url, reference) {
                Some(archive) => println!("{}\t{}\t{}", version, reference, archive),
                None => println!("{}\t{}", version, reference),
            }
        }

        Ok(())
    }
}
