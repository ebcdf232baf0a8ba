use crate::error::{ReleaseError, Result};
use crate::git::{RefLister, ReleasePublisher};
use std::sync::Mutex;

/// In-memory tag listing for tests
#[derive(Debug, Clone, Default)]
pub struct MockRefLister {
    refs: Option<Vec<String>>,
    failure: Option<String>,
}

impl MockRefLister {
    /// A lister that returns the given ref names
    pub fn new<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockRefLister {
            refs: Some(refs.into_iter().map(Into::into).collect()),
            failure: None,
        }
    }

    /// A lister that signals "not found"
    pub fn not_found() -> Self {
        MockRefLister {
            refs: None,
            failure: None,
        }
    }

    /// A lister whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        MockRefLister {
            refs: None,
            failure: Some(message.into()),
        }
    }
}

impl RefLister for MockRefLister {
    fn list_tags(&self) -> Result<Option<Vec<String>>> {
        match &self.failure {
            Some(message) => Err(ReleaseError::ref_list(message.clone())),
            None => Ok(self.refs.clone()),
        }
    }
}

/// A publish call recorded by [MockPublisher]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishCall {
    Release { tag: String, target: String },
    Tag { tag: String, target: String },
}

/// Publisher that records calls instead of creating anything
#[derive(Debug, Default)]
pub struct MockPublisher {
    calls: Mutex<Vec<PublishCall>>,
    failure: Option<String>,
}

impl MockPublisher {
    /// Create a new recording publisher
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every call fails with `message` (calls are still recorded)
    pub fn failing(message: impl Into<String>) -> Self {
        MockPublisher {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: PublishCall) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.failure {
            Some(message) => Err(ReleaseError::publish(message.clone())),
            None => Ok(()),
        }
    }
}

impl ReleasePublisher for MockPublisher {
    fn create_release(&self, tag: &str, target: &str) -> Result<()> {
        self.record(PublishCall::Release {
            tag: tag.to_string(),
            target: target.to_string(),
        })
    }

    fn create_tag(&self, tag: &str, target: &str) -> Result<()> {
        self.record(PublishCall::Tag {
            tag: tag.to_string(),
            target: target.to_string(),
        })
    }
}
