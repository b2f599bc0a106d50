//! Build command - generate a satis repository definition
//!
//! Usage:
//!   satisfy build --packages packages.json --repo satis.json
//!   satisfy build --packages packages.json --repo satis.json --output build/satis.json

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::{PackageList, RepositoryDefinition};
use crate::error::hints;
use crate::output::write_definition;
use crate::registry::{merge, GitRefLister, ResolveOptions, Resolver};
use crate::utils::terminal::{create_spinner, print_success, print_warning};

/// Generate a repository definition from git tags and branches
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// JSON file mapping package names to git URLs
    #[arg(short, long, env = "SATISFY_PACKAGES", value_name = "FILE")]
    pub packages: PathBuf,

    /// Base satis.json the generated packages are added to
    #[arg(short, long, env = "SATISFY_REPO", value_name = "FILE")]
    pub repo: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, env = "SATISFY_OUTPUT", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Git executable used to list remote references
    #[arg(long, env = "SATISFY_GIT", default_value = "git", value_name = "PATH")]
    pub git: String,

    /// List remote references of all packages concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Order each package's versions from lowest to highest
    #[arg(long)]
    pub sort: bool,

    /// Fail when a package has no qualifying versions
    #[arg(long)]
    pub fail_on_empty: bool,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, verbose: bool) -> Result<()> {
        // Both files are validated before any remote is contacted
        let packages = PackageList::load_from_path(&self.packages)?;
        let base = RepositoryDefinition::load_from_path(&self.repo)?;

        let lister = GitRefLister::new(&self.git).verbose(verbose);
        if !packages.is_empty() && !lister.is_available() {
            print_warning(&format!("git executable '{}' not found", lister.git_path()));
            eprintln!("{}", hints::git());
        }

        let resolver = Resolver::new(lister).with_options(ResolveOptions {
            parallel: self.parallel,
            sort: self.sort,
            fail_on_empty: self.fail_on_empty,
            verbose,
        });

        let spinner = create_spinner(&format!("Resolving {} packages...", packages.len()));
        let resolved = resolver.resolve_all(packages.sources());
        spinner.finish_and_clear();
        let descriptors = resolved?;

        let count = descriptors.len();
        let definition = merge(&base, descriptors);
        write_definition(&definition, self.output.as_deref())?;

        if verbose || self.output.is_some() {
            let destination = match &self.output {
                Some(path) => path.display().to_string(),
                None => "stdout".to_string(),
            };
            print_success(&format!(
                "Wrote {} package versions from {} sources to {}",
                count,
                packages.len(),
                destination
            ));
        }

        Ok(())
    }
}
