//! Command-line and environment inputs
//!
//! Every flag can also come from the environment variables a GitHub Actions
//! runner sets (`INPUT_*`, `GITHUB_*`). Empty values count as unset.

use std::path::PathBuf;

use clap::Parser;

use crate::cli::orchestration::ReleaseOptions;
use crate::config::{load_config, Backend, Config, ReleaseStrategy};
use crate::domain::TagFormat;
use crate::error::{ReleaseError, Result};
use crate::guard::NoLabelPolicy;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "label-release",
    version,
    about = "Cut a release when a labelled pull request is merged"
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, env = "INPUT_RELEASE_BRANCH", help = "Branch pull requests must target")]
    pub release_branch: Option<String>,

    #[arg(long, env = "INPUT_RELEASE_STRATEGY", help = "release, tag or none")]
    pub release_strategy: Option<String>,

    #[arg(long, env = "INPUT_TAG_FORMAT", help = "Tag template, e.g. v%major%.%minor%.%patch%")]
    pub tag_format: Option<String>,

    #[arg(long, env = "INPUT_VERSION_RANGE", help = "Range the previous version must fall in")]
    pub version_range: Option<String>,

    #[arg(long, env = "INPUT_NEXT_TAG", help = "Use this tag instead of computing one")]
    pub next_tag: Option<String>,

    #[arg(long, env = "INPUT_CUSTOM_RELEASE_SHA", help = "Commit to release")]
    pub release_sha: Option<String>,

    #[arg(long, env = "GITHUB_SHA", hide = true)]
    pub github_sha: Option<String>,

    #[arg(long, env = "GITHUB_EVENT_PATH", help = "Path of the pull request event payload")]
    pub event_path: Option<PathBuf>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/repo")]
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "API token")]
    pub token: Option<String>,

    #[arg(long, env = "INPUT_GITHUB_API_URL", help = "GitHub API base URL")]
    pub github_api_url: Option<String>,

    #[arg(
        long = "skip-label",
        env = "INPUT_SKIP_LABELS",
        value_delimiter = ',',
        help = "Label that suppresses publishing (repeatable)"
    )]
    pub skip_labels: Vec<String>,

    #[arg(
        long,
        env = "INPUT_NO_LABEL_POLICY",
        help = "skip or fail when no single semver label is present"
    )]
    pub no_label_policy: Option<String>,

    #[arg(long, env = "INPUT_BACKEND", help = "github or local")]
    pub backend: Option<String>,

    #[arg(long, default_value = ".", help = "Repository path for the local backend")]
    pub repo_path: PathBuf,
}

/// Fully resolved inputs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub options: ReleaseOptions,
    pub backend: Backend,
    pub repository: Option<String>,
    pub token: Option<String>,
    pub github_api_url: String,
    pub repo_path: PathBuf,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Args {
    /// Load the configuration file named by the arguments and resolve settings
    pub fn into_settings(self) -> Result<Settings> {
        let config = load_config(self.config.as_deref())?;
        self.resolve(config)
    }

    /// Resolve settings on top of `config`; flags and environment win
    pub fn resolve(self, config: Config) -> Result<Settings> {
        let release_strategy = match non_empty(self.release_strategy) {
            Some(s) => s.parse::<ReleaseStrategy>()?,
            None => config.release_strategy,
        };
        let no_label_policy = match non_empty(self.no_label_policy) {
            Some(s) => s.parse::<NoLabelPolicy>()?,
            None => config.no_label_policy,
        };
        let backend = match non_empty(self.backend) {
            Some(s) => s.parse::<Backend>()?,
            None => config.backend,
        };

        let skip_labels: Vec<String> = self
            .skip_labels
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        let options = ReleaseOptions {
            release_branch: non_empty(self.release_branch)
                .or(config.release_branch)
                .unwrap_or_default(),
            event_path: self.event_path.unwrap_or_default(),
            version_range: non_empty(self.version_range).unwrap_or(config.version_range),
            tag_format: TagFormat::new(non_empty(self.tag_format).unwrap_or(config.tag_format)),
            release_strategy,
            next_tag: non_empty(self.next_tag),
            skip_labels: if skip_labels.is_empty() {
                config.skip_labels
            } else {
                skip_labels
            },
            target_commit: non_empty(self.release_sha).or(non_empty(self.github_sha)),
            no_label_policy,
        };

        if !options.tag_format.has_placeholders() && options.next_tag.is_none() {
            tracing::warn!(
                template = %options.tag_format.template,
                "tag format has no %major%/%minor%/%patch% placeholder"
            );
        }

        Ok(Settings {
            options,
            backend,
            repository: non_empty(self.repository),
            token: non_empty(self.token),
            github_api_url: non_empty(self.github_api_url).unwrap_or(config.github_api_url),
            repo_path: self.repo_path,
        })
    }
}

impl Settings {
    /// Repository identifier required by the GitHub backend
    pub fn require_repository(&self) -> Result<&str> {
        self.repository.as_deref().ok_or_else(|| {
            ReleaseError::config("repository is not set (GITHUB_REPOSITORY or --repository)")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: &[&str] = &[
        "INPUT_RELEASE_BRANCH",
        "INPUT_RELEASE_STRATEGY",
        "INPUT_TAG_FORMAT",
        "INPUT_VERSION_RANGE",
        "INPUT_NEXT_TAG",
        "INPUT_CUSTOM_RELEASE_SHA",
        "GITHUB_SHA",
        "GITHUB_EVENT_PATH",
        "GITHUB_REPOSITORY",
        "GITHUB_TOKEN",
        "INPUT_GITHUB_API_URL",
        "INPUT_SKIP_LABELS",
        "INPUT_NO_LABEL_POLICY",
        "INPUT_BACKEND",
    ];

    fn args(extra: &[&str]) -> Args {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        let mut argv = vec!["label-release"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    #[serial]
    fn test_flags_override_config() {
        let config = Config {
            release_branch: Some("develop".to_string()),
            tag_format: "%major%.%minor%.%patch%".to_string(),
            ..Config::default()
        };
        let settings = args(&[
            "--release-branch",
            "main",
            "--release-strategy",
            "tag",
            "--event-path",
            "event.json",
            "--skip-label",
            "hold,freeze",
        ])
        .resolve(config)
        .unwrap();

        assert_eq!(settings.options.release_branch, "main");
        assert_eq!(settings.options.release_strategy, ReleaseStrategy::Tag);
        assert_eq!(settings.options.tag_format.template, "%major%.%minor%.%patch%");
        assert_eq!(settings.options.skip_labels, vec!["hold", "freeze"]);
        assert_eq!(settings.options.event_path, PathBuf::from("event.json"));
    }

    #[test]
    #[serial]
    fn test_config_fills_gaps() {
        let config = Config {
            release_branch: Some("trunk".to_string()),
            version_range: ">=2.0.0".to_string(),
            ..Config::default()
        };
        let settings = args(&[]).resolve(config).unwrap();
        assert_eq!(settings.options.release_branch, "trunk");
        assert_eq!(settings.options.version_range, ">=2.0.0");
        assert_eq!(settings.options.skip_labels, vec!["skip-release", "skipRelease"]);
    }

    #[test]
    #[serial]
    fn test_release_sha_beats_github_sha() {
        let settings = args(&["--release-sha", "custom", "--github-sha", "runner"])
            .resolve(Config::default())
            .unwrap();
        assert_eq!(settings.options.target_commit.as_deref(), Some("custom"));

        let settings = args(&["--release-sha", "", "--github-sha", "runner"])
            .resolve(Config::default())
            .unwrap();
        assert_eq!(settings.options.target_commit.as_deref(), Some("runner"));
    }

    #[test]
    #[serial]
    fn test_empty_release_branch_stays_empty() {
        let settings = args(&["--release-branch", ""]).resolve(Config::default()).unwrap();
        assert_eq!(settings.options.release_branch, "");
    }

    #[test]
    #[serial]
    fn test_invalid_strategy() {
        let err = args(&["--release-strategy", "publish"])
            .resolve(Config::default())
            .unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidStrategy(_)));
    }

    #[test]
    #[serial]
    fn test_require_repository() {
        let settings = args(&[]).resolve(Config::default()).unwrap();
        assert!(settings.require_repository().is_err());

        let settings = args(&["--repository", "octo/widgets"])
            .resolve(Config::default())
            .unwrap();
        assert_eq!(settings.require_repository().unwrap(), "octo/widgets");
    }
}
