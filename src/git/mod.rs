//! Tag listing and publishing abstraction layer
//!
//! This module provides trait-based abstractions over the remote side of a
//! release: listing existing tag refs and creating tags or releases. The
//! concrete implementations are:
//!
//! - [github::GitHubClient]: the GitHub REST API over blocking `reqwest`
//! - [repository::Git2Repository]: a local repository through the `git2` crate
//! - [mock::MockRefLister] and [mock::MockPublisher]: in-memory fakes for tests
//!
//! The release pipeline only depends on the traits, so every backend is
//! interchangeable.
//!
//! ```rust
//! # use label_release::git::{RefLister, ReleasePublisher};
//! # fn example(
//! #     lister: &dyn RefLister,
//! #     publisher: &dyn ReleasePublisher,
//! # ) -> label_release::Result<()> {
//! let refs = lister.list_tags()?.unwrap_or_default();
//! if refs.is_empty() {
//!     publisher.create_tag("v0.0.1", "abc123")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod mock;
pub mod repository;

pub use github::GitHubClient;
pub use mock::{MockPublisher, MockRefLister, PublishCall};
pub use repository::Git2Repository;

use crate::error::Result;

/// Prefix of every tag reference name
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Source of existing tag references
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
pub trait RefLister: Send + Sync {
    /// List the raw tag reference names of the repository
    ///
    /// # Returns
    /// * `Ok(Some(refs))` - Reference names such as `refs/tags/v1.2.3`, in any order
    /// * `Ok(None)` - The remote reported that no tag refs exist ("not found")
    /// * `Err` - Listing failed
    fn list_tags(&self) -> Result<Option<Vec<String>>>;
}

/// Creates the release artifacts for a computed tag
///
/// Implementations map their underlying failures to
/// [crate::error::ReleaseError::Publish] (or `Git` for local repositories).
/// Callers never retry.
pub trait ReleasePublisher: Send + Sync {
    /// Create a full release object named `tag` pointing at `target`
    ///
    /// # Arguments
    /// * `tag` - Tag name for the release (e.g., "v1.0.0")
    /// * `target` - Commit the release points at (a sha or revision)
    fn create_release(&self, tag: &str, target: &str) -> Result<()>;

    /// Create a bare tag named `tag` pointing at `target`
    fn create_tag(&self, tag: &str, target: &str) -> Result<()>;
}
