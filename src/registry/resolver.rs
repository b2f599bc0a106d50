//! Resolution of package sources into package descriptors
//!
//! Per source: list refs, classify, drop versions under the bound,
//! optionally sort, synthesize. Sources are always emitted in input order,
//! even when their refs are listed in parallel.

use anyhow::Result;
use rayon::prelude::*;

use super::filter::should_include;
use super::lister::RefLister;
use super::package::PackageDescriptor;
use super::refs::classify;
use crate::config::PackageSource;
use crate::error::SatisfyError;
use crate::utils::terminal::{print_info, print_warning};
use crate::version::VersionIdentifier;

/// Resolution policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// List refs of all sources concurrently
    pub parallel: bool,
    /// Order each source's versions with the version comparator
    pub sort: bool,
    /// Abort when a source has no qualifying versions
    pub fail_on_empty: bool,
    pub verbose: bool,
}

/// Qualifying `(version key, reference)` pairs of one source
pub type Candidates = Vec<(String, String)>;

/// Order candidates with numeric versions first, ascending. Opaque keys
/// keep their relative order after them.
pub fn sort_candidates(candidates: &mut Candidates) {
    candidates.sort_by(|(a, _), (b, _)| {
        let a = VersionIdentifier::parse(a);
        let b = VersionIdentifier::parse(b);
        match (a.as_numeric(), b.as_numeric()) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

/// Resolves package sources against a [`RefLister`]
pub struct Resolver<L> {
    lister: L,
    options: ResolveOptions,
}

impl<L: RefLister> Resolver<L> {
    pub fn new(lister: L) -> Self {
        Self {
            lister,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Versions of `source` found in `lines` that pass its bound, in
    /// publishing order
    pub fn qualifying_versions<S: AsRef<str>>(&self, source: &PackageSource, lines: &[S]) -> Candidates {
        let mut candidates: Candidates = classify(lines)
            .into_iter()
            .filter(|(key, _)| should_include(source, key))
            .collect();

        if self.options.sort {
            sort_candidates(&mut candidates);
        }
        candidates
    }

    /// List and resolve a single source
    pub fn resolve_source(&self, source: &PackageSource) -> Result<Vec<PackageDescriptor>> {
        let lines = self.lister.list_refs(&source.url);
        self.resolve_listing(source, &lines)
    }

    /// Resolve every source, preserving source order
    pub fn resolve_all(&self, sources: &[PackageSource]) -> Result<Vec<PackageDescriptor>> {
        let mut descriptors = Vec::new();

        if self.options.parallel {
            let listings: Vec<Vec<String>> = sources
                .par_iter()
                .map(|source| self.lister.list_refs(&source.url))
                .collect();

            for (source, lines) in sources.iter().zip(&listings) {
                descriptors.extend(self.resolve_listing(source, lines)?);
            }
        } else {
            for source in sources {
                descriptors.extend(self.resolve_source(source)?);
            }
        }

        Ok(descriptors)
    }

    fn resolve_listing(&self, source: &PackageSource, lines: &[String]) -> Result<Vec<PackageDescriptor>> {
        let candidates = self.qualifying_versions(source, lines);

        if candidates.is_empty() {
            if self.options.fail_on_empty {
                return Err(SatisfyError::no_versions(&source.name, &source.url).into());
            }
            print_warning(&format!("No versions found for {} at {}", source.name, source.url));
            return Ok(Vec::new());
        }

        if self.options.verbose {
            let keys: Vec<&str> = candidates.iter().map(|(key, _)| key.as_str()).collect();
            print_info(&format!("{}: {}", source.name, keys.join(", ")));
        }

        Ok(candidates
            .iter()
            .map(|(key, reference)| PackageDescriptor::synthesize(source, key, reference))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lister::StaticRefLister;
    use crate::version::DottedVersion;

    const WIDGET_URL: &str = "https://github.com/acme/widget.git";
    const GADGET_URL: &str = "git://example.com/acme/gadget.git";
    const MAIN_SHA: &str = "1111111111111111111111111111111111111111";

    fn widget_listing() -> Vec<String> {
        vec![
            format!("{}\trefs/heads/main", MAIN_SHA),
            "2222222222222222222222222222222222222222\trefs/tags/v1.9.0".to_string(),
            "3333333333333333333333333333333333333333\trefs/tags/v2.0.0".to_string(),
            "4444444444444444444444444444444444444444\trefs/tags/v2.0.0^{}".to_string(),
            "5555555555555555555555555555555555555555\trefs/tags/v2.1.0-beta.1".to_string(),
        ]
    }

    fn lister() -> StaticRefLister {
        let widget = widget_listing();
        let widget: Vec<&str> = widget.iter().map(String::as_str).collect();
        StaticRefLister::default()
            .with_listing(WIDGET_URL, &widget)
            .with_listing(
                GADGET_URL,
                &["6666666666666666666666666666666666666666\trefs/tags/0.1.0"],
            )
    }

    fn widget() -> PackageSource {
        PackageSource::new("acme/widget", WIDGET_URL)
            .with_min_version(DottedVersion::parse_bound("2.0").unwrap())
    }

    fn versions(descriptors: &[PackageDescriptor]) -> Vec<&str> {
        descriptors.iter().filter_map(|d| d.version()).collect()
    }

    #[test]
    fn test_bounded_source_end_to_end() {
        let resolver = Resolver::new(lister());
        let descriptors = resolver.resolve_source(&widget()).unwrap();

        assert_eq!(versions(&descriptors), vec!["dev-main", "2.0.0", "2.1.0-beta1"]);

        let references: Vec<&str> = descriptors.iter().filter_map(|d| d.reference()).collect();
        assert_eq!(references, vec![MAIN_SHA, "v2.0.0", "v2.1.0-beta.1"]);

        for descriptor in &descriptors {
            let reference = descriptor.reference().unwrap();
            assert_eq!(
                descriptor.dist_url().map(str::to_string),
                Some(format!("https://api.github.com/repos/acme/widget/zipball/{}", reference))
            );
        }
    }

    #[test]
    fn test_sorted_versions() {
        let resolver = Resolver::new(lister()).with_options(ResolveOptions {
            sort: true,
            ..Default::default()
        });
        let descriptors = resolver.resolve_source(&PackageSource::new("acme/widget", WIDGET_URL)).unwrap();
        assert_eq!(
            versions(&descriptors),
            vec!["1.9.0", "2.0.0", "2.1.0-beta1", "dev-main"]
        );
    }

    #[test]
    fn test_sort_candidates_prerelease_before_release() {
        let mut candidates: Candidates = ["2.0.0", "dev-b", "2.0.0-rc1", "dev-a", "1.0.0"]
            .iter()
            .map(|k| (k.to_string(), k.to_string()))
            .collect();
        sort_candidates(&mut candidates);
        let keys: Vec<&str> = candidates.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["1.0.0", "2.0.0-rc1", "2.0.0", "dev-b", "dev-a"]);
    }

    #[test]
    fn test_empty_listing_is_not_fatal() {
        let resolver = Resolver::new(StaticRefLister::default());
        let source = PackageSource::new("acme/empty", "https://github.com/acme/empty.git");
        assert!(resolver.resolve_source(&source).unwrap().is_empty());
    }

    #[test]
    fn test_empty_listing_fatal_when_requested() {
        let resolver = Resolver::new(StaticRefLister::default()).with_options(ResolveOptions {
            fail_on_empty: true,
            ..Default::default()
        });
        let source = PackageSource::new("acme/empty", "https://github.com/acme/empty.git");
        let err = resolver.resolve_source(&source).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SatisfyError>(),
            Some(SatisfyError::NoVersions { .. })
        ));
    }

    #[test]
    fn test_resolve_all_keeps_source_order() {
        let sources = vec![
            PackageSource::new("acme/gadget", GADGET_URL),
            widget(),
            PackageSource::new("acme/missing", "https://github.com/acme/missing.git"),
        ];

        for parallel in [false, true] {
            let resolver = Resolver::new(lister()).with_options(ResolveOptions {
                parallel,
                ..Default::default()
            });
            let descriptors = resolver.resolve_all(&sources).unwrap();
            let names: Vec<&str> = descriptors.iter().filter_map(|d| d.name()).collect();
            assert_eq!(
                names,
                vec!["acme/gadget", "acme/widget", "acme/widget", "acme/widget"],
                "parallel = {}",
                parallel
            );
            assert!(descriptors[0].dist_url().is_none());
        }
    }
}
