//! Selecting the latest existing version tag inside a range

use crate::domain::{Version, VersionRange};
use crate::error::Result;
use crate::git::{RefLister, TAG_REF_PREFIX};
use tracing::debug;

/// Parse a tag reference into a version.
///
/// Strips a `refs/tags/` prefix, then accepts an optional leading `v`/`V`
/// followed by exactly three numeric fields. Returns `None` for anything else.
pub fn parse_tag_ref(raw: &str) -> Option<Version> {
    let name = raw.strip_prefix(TAG_REF_PREFIX).unwrap_or(raw);
    Version::parse(name).ok()
}

/// Highest version among `refs` that satisfies `range`, or `0.0.0`.
///
/// The result does not depend on the order of `refs`.
pub fn resolve_latest<I, S>(refs: I, range: &VersionRange) -> Version
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut latest = Version::ZERO;

    for raw in refs {
        let raw = raw.as_ref();
        let Some(version) = parse_tag_ref(raw) else {
            debug!(tag_ref = raw, "skipping non-version tag");
            continue;
        };
        if range.matches(&version) && version > latest {
            latest = version;
        }
    }

    latest
}

/// List tags through `lister` and resolve the latest version in `range_expr`.
///
/// A "not found" listing counts as no tags at all.
pub fn latest_version(lister: &dyn RefLister, range_expr: &str) -> Result<Version> {
    let range = VersionRange::parse(range_expr)?;
    let refs = match lister.list_tags()? {
        Some(refs) => refs,
        None => {
            debug!("tag listing reported not found, using zero version");
            Vec::new()
        }
    };

    let latest = resolve_latest(&refs, &range);
    debug!(
        range = range.expression(),
        scanned = refs.len(),
        latest = %latest,
        "resolved latest tag"
    );
    Ok(latest)
}
