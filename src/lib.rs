//! satisfy - satis package repositories from git remotes
//!
//! Given a list of packages (each a git URL with an optional minimum version
//! and default metadata), satisfy lists the remote's tags and branches, turns
//! every qualifying reference into a version, and appends one `package`
//! repository per version to a base satis definition.
//!
//! ## Architecture
//!
//! ```text
//! cli → commands → config (packages.json, satis.json)
//!                → registry (list → classify → filter → synthesize → merge)
//!                → output (pretty JSON to file or stdout)
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod output;
pub mod registry;
pub mod utils;
pub mod version;
