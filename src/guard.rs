//! Eligibility checks run before any release decision is computed
//!
//! The checks form an ordered decision list; the first one that does not
//! pass decides the outcome:
//!
//! | Order | Check | On failure |
//! |-------|-------|------------|
//! | 1 | release branch and event path are non-empty | `Fail(EmptyOption)` |
//! | 2 | the event payload parses | `Fail(EventParse)` |
//! | 3 | action is `closed` | `Skip(NotClosed)` |
//! | 4 | pull request is merged | `Skip(NotMerged)` |
//! | 5 | base ref is present | `Fail(MissingBaseRef)` |
//! | 6 | base ref equals the release branch | `Skip(BaseMismatch)` |
//! | 7 | exactly one semver label | `Skip(NoValidLabel)` or `Fail`, per [NoLabelPolicy] |

use crate::analyzer::extract_increment;
use crate::domain::PullRequestEvent;
use crate::error::ReleaseError;
use crate::event::EventSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Why a pull request is not a release trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotClosed,
    NotMerged,
    BaseMismatch,
    NoValidLabel,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::NotClosed => "pull request is not closed",
            SkipReason::NotMerged => "pull request is not merged",
            SkipReason::BaseMismatch => "base ref does not match release branch",
            SkipReason::NoValidLabel => "no valid semver label found",
        };
        f.write_str(msg)
    }
}

/// What a missing or ambiguous semver label means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoLabelPolicy {
    /// Nothing to release; stop successfully
    #[default]
    Skip,
    /// Treat as a defect the operator must fix
    Fail,
}

impl FromStr for NoLabelPolicy {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(NoLabelPolicy::Skip),
            "fail" => Ok(NoLabelPolicy::Fail),
            other => Err(ReleaseError::config(format!(
                "invalid no-label policy '{}', expected skip or fail",
                other
            ))),
        }
    }
}

/// Outcome of the guard
#[derive(Debug)]
pub enum GuardDecision {
    /// Every check passed; carries the parsed event
    Proceed(PullRequestEvent),
    Skip(SkipReason),
    Fail(ReleaseError),
}

/// Validates that a pull request event should trigger a release
#[derive(Debug, Clone, Copy, Default)]
pub struct Guard {
    policy: NoLabelPolicy,
}

impl Guard {
    pub fn new(policy: NoLabelPolicy) -> Self {
        Guard { policy }
    }

    /// Run every check, reading the event through `source`
    pub fn evaluate(
        &self,
        source: &dyn EventSource,
        release_branch: &str,
        event_path: &Path,
    ) -> GuardDecision {
        if release_branch.is_empty() || event_path.as_os_str().is_empty() {
            return GuardDecision::Fail(ReleaseError::EmptyOption);
        }

        let event = match source.parse(event_path) {
            Ok(event) => event,
            Err(e) => return GuardDecision::Fail(e),
        };

        self.check_event(release_branch, event)
    }

    /// Run checks 3 onwards against an already parsed event
    pub fn check_event(&self, release_branch: &str, event: PullRequestEvent) -> GuardDecision {
        if event.action.as_deref() != Some("closed") {
            return GuardDecision::Skip(SkipReason::NotClosed);
        }
        if event.pull_request.merged != Some(true) {
            return GuardDecision::Skip(SkipReason::NotMerged);
        }

        let Some(base_ref) = event.base_ref() else {
            return GuardDecision::Fail(ReleaseError::MissingBaseRef);
        };
        if base_ref != release_branch {
            debug!(base_ref, release_branch, "base ref does not match");
            return GuardDecision::Skip(SkipReason::BaseMismatch);
        }

        if let Err(e) = extract_increment(&event.pull_request.labels) {
            debug!(error = %e, "label check failed");
            return match self.policy {
                NoLabelPolicy::Skip => GuardDecision::Skip(SkipReason::NoValidLabel),
                NoLabelPolicy::Fail => GuardDecision::Fail(e),
            };
        }

        GuardDecision::Proceed(event)
    }
}
