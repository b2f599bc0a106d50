//! External process execution

pub mod subprocess;

pub use subprocess::{command_exists, run_command, CommandResult};
