//! Satis package repository generation
//!
//! This module provides:
//! - Listing of remote tags and branches (`git ls-remote`)
//! - Classification of references into version keys
//! - Minimum-version filtering
//! - Package descriptor synthesis, including GitHub zipball dist URLs
//! - Merging descriptors into a base satis repository definition
//!
//! # Overview
//!
//! ```text
//! PackageSource ──▶ RefLister ──▶ classify ──▶ should_include ──▶ PackageDescriptor
//!                                                                        │
//!                         RepositoryDefinition ◀──────── merge ◀─────────┘
//! ```
//!
//! Tags become versions named after the tag (`v2.1.0-beta.1` → `2.1.0-beta1`),
//! branches become `dev-` versions (`main` → `dev-main`).

mod archive;
mod filter;
mod lister;
mod merge;
mod package;
mod refs;
mod resolver;

pub use archive::{resolve_archive_url, GITHUB_HOST};
pub use filter::should_include;
pub use lister::{GitRefLister, RefLister};
pub use merge::merge;
pub use package::{autogenerated_description, PackageDescriptor, AUTOGENERATED_MARKER};
pub use refs::{classify, RawRef, RefKind, DEV_PREFIX};
pub use resolver::{sort_candidates, Candidates, ResolveOptions, Resolver};
