//! Domain logic - pure release rules independent of any remote or repository

pub mod event;
pub mod range;
pub mod tag;
pub mod version;

pub use event::{has_label, BranchRef, Label, PullRequest, PullRequestEvent};
pub use range::VersionRange;
pub use tag::{bump_and_format, TagFormat};
pub use version::{Increment, Version};
