use serde::{Deserialize, Serialize};

/// Pull request webhook payload, reduced to the fields release decisions read.
///
/// Every field is optional: payloads with missing fields still deserialize and
/// the guard decides what a missing field means.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PullRequestEvent {
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PullRequest {
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub merged: Option<bool>,

    #[serde(default)]
    pub merge_commit_sha: Option<String>,

    #[serde(default)]
    pub base: Option<BranchRef>,

    #[serde(default)]
    pub head: Option<BranchRef>,

    #[serde(default)]
    pub labels: Vec<Label>,
}

/// One side (base or head) of a pull request
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BranchRef {
    #[serde(default, rename = "ref")]
    pub ref_name: Option<String>,

    #[serde(default)]
    pub sha: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Label {
    #[serde(default)]
    pub name: Option<String>,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Label {
            name: Some(name.into()),
        }
    }
}

impl PullRequestEvent {
    /// Whether the pull request carries a label named exactly `name`
    pub fn has_label(&self, name: &str) -> bool {
        self.pull_request
            .labels
            .iter()
            .any(|label| label.name.as_deref() == Some(name))
    }

    pub fn base_ref(&self) -> Option<&str> {
        self.pull_request.base.as_ref()?.ref_name.as_deref()
    }

    /// The commit a release for this pull request should point at, if the
    /// payload names one: the merge commit first, then the head commit.
    pub fn release_commit(&self) -> Option<&str> {
        let pr = &self.pull_request;
        let head_sha = pr.head.as_ref().and_then(|h| h.sha.as_deref());
        pr.merge_commit_sha
            .as_deref()
            .filter(|sha| !sha.is_empty())
            .or_else(|| head_sha.filter(|sha| !sha.is_empty()))
    }

    pub fn label_names(&self) -> Vec<&str> {
        self.pull_request
            .labels
            .iter()
            .filter_map(|l| l.name.as_deref())
            .collect()
    }
}

/// Free-standing label presence check
pub fn has_label(name: &str, event: &PullRequestEvent) -> bool {
    event.has_label(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "action": "closed",
        "number": 7,
        "pull_request": {
            "number": 7,
            "merged": true,
            "merge_commit_sha": "abc123",
            "base": { "ref": "main", "sha": "base000" },
            "head": { "ref": "feature", "sha": "head111" },
            "labels": [ { "name": "minor", "color": "ededed" }, { "id": 3 } ],
            "title": "Add things"
        },
        "repository": { "full_name": "octo/repo" }
    }"#;

    #[test]
    fn test_deserialize_github_payload() {
        let event: PullRequestEvent = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(event.action.as_deref(), Some("closed"));
        assert_eq!(event.pull_request.merged, Some(true));
        assert_eq!(event.base_ref(), Some("main"));
        assert_eq!(event.pull_request.labels.len(), 2);
        assert_eq!(event.pull_request.labels[1].name, None);
        assert_eq!(event.label_names(), vec!["minor"]);
    }

    #[test]
    fn test_deserialize_empty_object() {
        let event: PullRequestEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event, PullRequestEvent::default());
        assert_eq!(event.base_ref(), None);
    }

    #[test]
    fn test_has_label() {
        let event: PullRequestEvent = serde_json::from_str(PAYLOAD).unwrap();
        assert!(event.has_label("minor"));
        assert!(has_label("minor", &event));
        assert!(!event.has_label("Minor"));
        assert!(!event.has_label("skip-release"));
    }

    #[test]
    fn test_release_commit_prefers_merge_commit() {
        let mut event: PullRequestEvent = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(event.release_commit(), Some("abc123"));

        event.pull_request.merge_commit_sha = None;
        assert_eq!(event.release_commit(), Some("head111"));

        event.pull_request.head = None;
        assert_eq!(event.release_commit(), None);
    }

    #[test]
    fn test_release_commit_skips_empty_merge_sha() {
        let mut event: PullRequestEvent = serde_json::from_str(PAYLOAD).unwrap();
        event.pull_request.merge_commit_sha = Some(String::new());
        assert_eq!(event.release_commit(), Some("head111"));

        event.pull_request.head = Some(BranchRef {
            ref_name: Some("feature".to_string()),
            sha: Some(String::new()),
        });
        assert_eq!(event.release_commit(), None);
    }
}
