//! Classification of `git ls-remote` output into version candidates
//!
//! Each listing line has the form `<object-id>\t<ref-path>`:
//!
//! ```text
//! 3f2a...  refs/heads/main
//! 9c1b...  refs/tags/v2.0.0
//! 77de...  refs/tags/v2.0.0^{}
//! ```

use indexmap::IndexMap;

use crate::version::VersionIdentifier;

const TAG_PREFIX: &str = "refs/tags/";
const BRANCH_PREFIX: &str = "refs/heads/";
const PEELED_SUFFIX: &str = "^{}";

/// Prefix marking versions that track a branch
pub const DEV_PREFIX: &str = "dev-";

/// Namespace a reference was listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Tag,
    Branch,
}

/// A single reference read from the lister
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRef {
    pub kind: RefKind,
    /// Tag or branch name without its namespace
    pub name: String,
    /// Object id the reference points at
    pub object_id: String,
}

impl RawRef {
    /// Parse one listing line. Returns `None` for malformed lines, refs
    /// outside the tag and branch namespaces, and tags that do not start
    /// like a version.
    pub fn from_line(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let (object_id, path) = match (fields.next(), fields.next(), fields.next()) {
            (Some(id), Some(path), None) => (id, path),
            _ => return None,
        };

        if let Some(tag) = path.strip_prefix(TAG_PREFIX) {
            let tag = tag.strip_suffix(PEELED_SUFFIX).unwrap_or(tag);
            if !looks_like_version(tag) {
                return None;
            }
            return Some(Self {
                kind: RefKind::Tag,
                name: tag.to_string(),
                object_id: object_id.to_string(),
            });
        }

        if let Some(branch) = path.strip_prefix(BRANCH_PREFIX) {
            if branch.is_empty() {
                return None;
            }
            return Some(Self {
                kind: RefKind::Branch,
                name: branch.to_string(),
                object_id: object_id.to_string(),
            });
        }

        None
    }

    /// Version key this reference is published under
    pub fn version_key(&self) -> String {
        let version = VersionIdentifier::parse(&self.name);
        match self.kind {
            RefKind::Tag => version.to_string(),
            RefKind::Branch => format!("{}{}", DEV_PREFIX, version),
        }
    }

    /// Reference recorded in the package source: the tag name for tags,
    /// the listed commit for branches
    ///
    /// Branches record the bare object id, never the whole
    /// `<object-id> <ref-path>` pair: checkouts and zipball URLs need a
    /// single commit.
    pub fn reference(&self) -> &str {
        match self.kind {
            RefKind::Tag => &self.name,
            RefKind::Branch => &self.object_id,
        }
    }
}

/// Optional `v` followed by a digit
fn looks_like_version(name: &str) -> bool {
    let rest = name.strip_prefix('v').unwrap_or(name);
    rest.starts_with(|c: char| c.is_ascii_digit())
}

/// Map listing lines to `version key -> reference`
///
/// Keys keep first-seen order; when a key repeats, the later line's
/// reference replaces the earlier one.
pub fn classify<I, S>(lines: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = IndexMap::new();
    for raw in lines.into_iter().filter_map(|line| RawRef::from_line(line.as_ref())) {
        candidates.insert(raw.version_key(), raw.reference().to_string());
    }
    candidates
}
