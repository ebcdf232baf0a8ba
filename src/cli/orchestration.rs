//! Release decision workflow
//!
//! Runs the guard, computes the increment and next tag, applies the
//! skip-release veto and dispatches to the release publisher. The host binary
//! only maps the returned outcome to exit codes and output variables.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::analyzer::extract_increment;
use crate::config::ReleaseStrategy;
use crate::domain::{Increment, PullRequestEvent, TagFormat, Version};
use crate::error::{ReleaseError, Result};
use crate::event::EventSource;
use crate::git::{RefLister, ReleasePublisher};
use crate::guard::{Guard, GuardDecision, NoLabelPolicy, SkipReason};
use crate::resolver;

/// Inputs for one release decision
///
/// Mirrors the CLI settings in a form that does not depend on clap, so the
/// workflow can be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    pub release_branch: String,

    /// Path of the webhook payload
    pub event_path: PathBuf,

    /// Range the previous version must fall in (e.g. ">=1.0.0")
    pub version_range: String,

    pub tag_format: TagFormat,

    pub release_strategy: ReleaseStrategy,

    /// Use this tag verbatim instead of computing one
    pub next_tag: Option<String>,

    /// Labels that suppress publishing, each checked independently
    pub skip_labels: Vec<String>,

    /// Commit to publish at; overrides whatever the event names
    pub target_commit: Option<String>,

    pub no_label_policy: NoLabelPolicy,
}

impl ReleaseOptions {
    pub fn new(release_branch: impl Into<String>, event_path: impl Into<PathBuf>) -> Self {
        ReleaseOptions {
            release_branch: release_branch.into(),
            event_path: event_path.into(),
            version_range: ">=0.0.0".to_string(),
            tag_format: TagFormat::default(),
            release_strategy: ReleaseStrategy::Release,
            next_tag: None,
            skip_labels: vec!["skip-release".to_string(), "skipRelease".to_string()],
            target_commit: None,
            no_label_policy: NoLabelPolicy::Skip,
        }
    }
}

/// Publish action actually performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    Release,
    Tag,
    None,
}

impl fmt::Display for ReleaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseAction::Release => "release",
            ReleaseAction::Tag => "tag",
            ReleaseAction::None => "none",
        };
        f.write_str(s)
    }
}

/// Result of a release decision that got past the guard
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseResult {
    /// The tag that was (or would have been) created
    pub next_tag: String,

    pub increment: Increment,

    pub action: ReleaseAction,

    /// Latest existing version the tag was computed from; `None` when the
    /// tag was supplied explicitly
    pub previous_version: Option<Version>,

    /// Whether a veto label suppressed publishing
    pub vetoed: bool,
}

/// Outcome of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The event is not a release trigger; nothing was done
    Skipped(SkipReason),
    Completed(ReleaseResult),
}

/// The release decision workflow over its three collaborators
pub struct ReleaseWorkflow<'a> {
    events: &'a dyn EventSource,
    tags: &'a dyn RefLister,
    publisher: &'a dyn ReleasePublisher,
}

impl<'a> ReleaseWorkflow<'a> {
    pub fn new(
        events: &'a dyn EventSource,
        tags: &'a dyn RefLister,
        publisher: &'a dyn ReleasePublisher,
    ) -> Self {
        ReleaseWorkflow {
            events,
            tags,
            publisher,
        }
    }

    /// Run one release decision
    ///
    /// # Returns
    /// * `Ok(Skipped)` - The guard decided this event is not a release trigger
    /// * `Ok(Completed)` - The tag was computed and, unless vetoed, published
    /// * `Err` - A guard failure, a bad version/range, or a collaborator error
    pub fn run(&self, options: &ReleaseOptions) -> Result<PipelineOutcome> {
        info!(release_branch = %options.release_branch, "running PR guard");
        let guard = Guard::new(options.no_label_policy);
        let decision = guard.evaluate(self.events, &options.release_branch, &options.event_path);
        let event = match decision {
            GuardDecision::Proceed(event) => event,
            GuardDecision::Skip(reason) => {
                warn!(%reason, "skipping release");
                return Ok(PipelineOutcome::Skipped(reason));
            }
            GuardDecision::Fail(e) => return Err(e),
        };

        let increment = extract_increment(&event.pull_request.labels)?;
        debug!(%increment, labels = ?event.label_names(), "increment from labels");

        let (next_tag, previous_version) = match &options.next_tag {
            Some(tag) => {
                debug!(tag = %tag, "using explicit next tag");
                (tag.clone(), None)
            }
            None => {
                let latest = resolver::latest_version(self.tags, &options.version_range)?;
                let next = options.tag_format.render(&latest.bump(increment)?);
                debug!(latest = %latest, next = %next, "computed next tag");
                (next, Some(latest))
            }
        };

        if let Some(label) = veto_label(&options.skip_labels, &event) {
            warn!(label, tag = %next_tag, "release vetoed by label");
            return Ok(PipelineOutcome::Completed(ReleaseResult {
                next_tag,
                increment,
                action: ReleaseAction::None,
                previous_version,
                vetoed: true,
            }));
        }

        let action = self.publish(options, &event, &next_tag)?;
        info!(
            strategy = %options.release_strategy,
            previous = ?previous_version.map(|v| v.to_string()),
            next_tag = %next_tag,
            %increment,
            "release decision complete"
        );

        Ok(PipelineOutcome::Completed(ReleaseResult {
            next_tag,
            increment,
            action,
            previous_version,
            vetoed: false,
        }))
    }

    fn publish(
        &self,
        options: &ReleaseOptions,
        event: &PullRequestEvent,
        tag: &str,
    ) -> Result<ReleaseAction> {
        if options.release_strategy == ReleaseStrategy::None {
            return Ok(ReleaseAction::None);
        }

        let target = options
            .target_commit
            .as_deref()
            .filter(|sha| !sha.is_empty())
            .or_else(|| event.release_commit())
            .ok_or(ReleaseError::MissingTargetCommit)?;

        match options.release_strategy {
            ReleaseStrategy::Release => {
                self.publisher.create_release(tag, target)?;
                Ok(ReleaseAction::Release)
            }
            ReleaseStrategy::Tag => {
                self.publisher.create_tag(tag, target)?;
                Ok(ReleaseAction::Tag)
            }
            ReleaseStrategy::None => Ok(ReleaseAction::None),
        }
    }
}

/// First configured veto label present on the pull request
fn veto_label<'l>(skip_labels: &'l [String], event: &PullRequestEvent) -> Option<&'l str> {
    skip_labels
        .iter()
        .map(String::as_str)
        .find(|label| event.has_label(label))
}
