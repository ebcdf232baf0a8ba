//! Reading pull request events from webhook payloads

use crate::domain::PullRequestEvent;
use crate::error::{ReleaseError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Turns an event path into a parsed pull request event
pub trait EventSource: Send + Sync {
    fn parse(&self, path: &Path) -> Result<PullRequestEvent>;
}

/// Reads the JSON payload file a CI runner leaves on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEventSource;

impl FileEventSource {
    pub fn new() -> Self {
        FileEventSource
    }
}

/// Parse a JSON payload into a pull request event
pub fn parse_event(payload: &str) -> Result<PullRequestEvent> {
    serde_json::from_str(payload).map_err(|e| ReleaseError::event(e.to_string()))
}

impl EventSource for FileEventSource {
    fn parse(&self, path: &Path) -> Result<PullRequestEvent> {
        let payload = fs::read_to_string(path)
            .map_err(|e| ReleaseError::event(format!("{}: {}", path.display(), e)))?;
        parse_event(&payload)
    }
}

/// In-memory event source keyed by path, for tests
#[derive(Debug, Clone, Default)]
pub struct MockEventSource {
    events: HashMap<PathBuf, PullRequestEvent>,
}

impl MockEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `event` for `path`
    pub fn with_event(mut self, path: impl Into<PathBuf>, event: PullRequestEvent) -> Self {
        self.events.insert(path.into(), event);
        self
    }
}

impl EventSource for MockEventSource {
    fn parse(&self, path: &Path) -> Result<PullRequestEvent> {
        self.events
            .get(path)
            .cloned()
            .ok_or_else(|| ReleaseError::event(format!("no event at {}", path.display())))
    }
}
