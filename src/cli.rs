//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{build::BuildCommand, refs::RefsCommand};
use crate::utils::terminal;

/// satisfy - satis repositories from git tags and branches
///
/// Scans git remotes for published versions and adds one package entry per
/// version to a satis repository definition.
#[derive(Parser, Debug)]
#[command(name = "satisfy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a satis repository definition
    Build(BuildCommand),

    /// List the versions found at a git URL
    Refs(RefsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            terminal::disable_colors();
        }

        match self.command {
            Commands::Build(cmd) => cmd.execute(self.verbose),
            Commands::Refs(cmd) => cmd.execute(self.verbose),
        }
    }
}
