//! satisfy CLI entry point

use clap::Parser;

use satisfy::cli::Cli;
use satisfy::error::SatisfyError;
use satisfy::utils::terminal::print_error;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        match err.downcast_ref::<SatisfyError>() {
            Some(e) => e.display_with_hints(),
            None => print_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
