use crate::error::{ReleaseError, Result};
use crate::git::{RefLister, ReleasePublisher, TAG_REF_PREFIX};
use git2::{Object, Repository as Git2Repo, Signature};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Local repository backend: reads and writes tags through `git2`.
///
/// `create_tag` writes a lightweight tag, `create_release` an annotated one.
/// Nothing is pushed.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn repo(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| ReleaseError::publish("repository lock poisoned"))
    }
}

fn resolve_target<'r>(repo: &'r Git2Repo, target: &str) -> Result<Object<'r>> {
    repo.revparse_single(target)
        .map_err(|e| ReleaseError::publish(format!("Cannot resolve target '{}': {}", target, e)))
}

fn signature(repo: &Git2Repo) -> Result<Signature<'static>> {
    match repo.signature() {
        Ok(sig) => Ok(sig.to_owned()),
        Err(_) => Ok(Signature::now("label-release", "label-release@localhost")?),
    }
}

impl RefLister for Git2Repository {
    fn list_tags(&self) -> Result<Option<Vec<String>>> {
        let repo = self.repo()?;
        let tags = repo
            .tag_names(None)
            .map_err(|e| ReleaseError::ref_list(format!("Cannot list tags: {}", e)))?;

        let refs: Vec<String> = tags
            .iter()
            .flatten()
            .map(|name| format!("{}{}", TAG_REF_PREFIX, name))
            .collect();
        debug!(count = refs.len(), "listed local tags");

        Ok(Some(refs))
    }
}

impl ReleasePublisher for Git2Repository {
    fn create_release(&self, tag: &str, target: &str) -> Result<()> {
        let repo = self.repo()?;
        let object = resolve_target(&repo, target)?;
        let tagger = signature(&repo)?;

        repo.tag(tag, &object, &tagger, &format!("Release {}", tag), false)
            .map_err(|e| {
                ReleaseError::publish(format!("Cannot create release tag '{}': {}", tag, e))
            })?;

        Ok(())
    }

    fn create_tag(&self, tag: &str, target: &str) -> Result<()> {
        let repo = self.repo()?;
        let object = resolve_target(&repo, target)?;

        repo.tag_lightweight(tag, &object, false)
            .map_err(|e| ReleaseError::publish(format!("Cannot create tag '{}': {}", tag, e)))?;

        Ok(())
    }
}
