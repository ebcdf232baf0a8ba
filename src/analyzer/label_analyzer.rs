use crate::domain::{Increment, Label};
use crate::error::{ReleaseError, Result};

/// Determine the increment from a pull request's labels.
///
/// Exactly one label must be a semver keyword. Labels without a name and
/// labels that are not keywords are ignored. A second keyword label is an
/// error, whatever order the labels arrive in.
pub fn extract_increment(labels: &[Label]) -> Result<Increment> {
    let mut found: Option<(Increment, &str)> = None;

    for name in labels.iter().filter_map(|l| l.name.as_deref()) {
        let Ok(increment) = Increment::parse(name) else {
            continue;
        };

        if let Some((_, first)) = found {
            return Err(ReleaseError::MultipleValidLabels {
                first: first.to_string(),
                second: name.to_string(),
            });
        }
        found = Some((increment, name));
    }

    found
        .map(|(increment, _)| increment)
        .ok_or(ReleaseError::NoValidLabel)
}
