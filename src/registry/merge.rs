//! Merging generated packages into the base repository definition

use super::package::PackageDescriptor;
use crate::config::RepositoryDefinition;

/// New definition with one `package` repository per descriptor appended
/// after the existing repositories. `base` is left untouched.
pub fn merge<I>(base: &RepositoryDefinition, synthesized: I) -> RepositoryDefinition
where
    I: IntoIterator<Item = PackageDescriptor>,
{
    base.with_appended(
        synthesized
            .into_iter()
            .map(PackageDescriptor::into_repository_entry),
    )
}
