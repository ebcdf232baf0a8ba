use thiserror::Error;

/// Unified error type for release decisions and the collaborators around them
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid increment: '{0}' (expected major, minor or patch)")]
    InvalidIncrement(String),

    #[error("Invalid version range: {0}")]
    InvalidRange(String),

    #[error("Invalid release strategy: '{0}' (expected release, tag or none)")]
    InvalidStrategy(String),

    #[error("Multiple valid semver labels found: '{first}' and '{second}'")]
    MultipleValidLabels { first: String, second: String },

    #[error("No valid semver label found")]
    NoValidLabel,

    #[error("Empty option: release branch and event path must both be set")]
    EmptyOption,

    #[error("Pull request is missing its base ref")]
    MissingBaseRef,

    #[error("No target commit available for publishing")]
    MissingTargetCommit,

    #[error("Failed to parse event: {0}")]
    EventParse(String),

    #[error("Listing tags failed: {0}")]
    RefList(String),

    #[error("Publishing failed: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in label-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(msg.into())
    }

    /// Create a range error with context
    pub fn range(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidRange(msg.into())
    }

    /// Create an event parsing error with context
    pub fn event(msg: impl Into<String>) -> Self {
        ReleaseError::EventParse(msg.into())
    }

    /// Create a tag listing error with context
    pub fn ref_list(msg: impl Into<String>) -> Self {
        ReleaseError::RefList(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        ReleaseError::Publish(msg.into())
    }

    /// Whether this error came from an external collaborator call
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ReleaseError::RefList(_) | ReleaseError::Publish(_) | ReleaseError::Git(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_multiple_labels_names_both() {
        let err = ReleaseError::MultipleValidLabels {
            first: "patch".to_string(),
            second: "minor".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("patch"));
        assert!(msg.contains("minor"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::version("x"), "Invalid version"),
            (ReleaseError::range("x"), "Invalid version range"),
            (ReleaseError::event("x"), "Failed to parse event"),
            (ReleaseError::ref_list("x"), "Listing tags failed"),
            (ReleaseError::publish("x"), "Publishing failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_is_remote() {
        assert!(ReleaseError::publish("boom").is_remote());
        assert!(ReleaseError::ref_list("boom").is_remote());
        assert!(!ReleaseError::EmptyOption.is_remote());
        assert!(!ReleaseError::NoValidLabel.is_remote());
    }
}
