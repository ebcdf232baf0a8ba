use crate::error::{ReleaseError, Result};
use crate::git::github::DEFAULT_API_URL;
use crate::guard::NoLabelPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "labelrelease.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".labelrelease.toml";

/// Publish action selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStrategy {
    /// Create a full release object
    #[default]
    Release,
    /// Create a bare tag
    Tag,
    /// Compute the tag only
    None,
}

impl FromStr for ReleaseStrategy {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "release" => Ok(ReleaseStrategy::Release),
            "tag" => Ok(ReleaseStrategy::Tag),
            "none" => Ok(ReleaseStrategy::None),
            other => Err(ReleaseError::InvalidStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ReleaseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseStrategy::Release => "release",
            ReleaseStrategy::Tag => "tag",
            ReleaseStrategy::None => "none",
        };
        f.write_str(s)
    }
}

/// Where tags are listed and published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// GitHub REST API
    #[default]
    Github,
    /// A local git repository
    Local,
}

impl FromStr for Backend {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "github" => Ok(Backend::Github),
            "local" => Ok(Backend::Local),
            other => Err(ReleaseError::config(format!(
                "invalid backend '{}', expected github or local",
                other
            ))),
        }
    }
}

/// Returns the default tag template.
fn default_tag_format() -> String {
    "v%major%.%minor%.%patch%".to_string()
}

/// Returns the default range: every version.
fn default_version_range() -> String {
    ">=0.0.0".to_string()
}

/// Returns the default list of labels that veto publishing.
fn default_skip_labels() -> Vec<String> {
    vec!["skip-release".to_string(), "skipRelease".to_string()]
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Represents the persistent configuration for label-release.
///
/// Per-invocation inputs (event path, repository, token, explicit tag) are not
/// part of the file; they come from flags or the environment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub release_branch: Option<String>,

    #[serde(default)]
    pub release_strategy: ReleaseStrategy,

    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default = "default_version_range")]
    pub version_range: String,

    #[serde(default = "default_skip_labels")]
    pub skip_labels: Vec<String>,

    #[serde(default)]
    pub no_label_policy: NoLabelPolicy,

    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_api_url")]
    pub github_api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release_branch: None,
            release_strategy: ReleaseStrategy::default(),
            tag_format: default_tag_format(),
            version_range: default_version_range(),
            skip_labels: default_skip_labels(),
            no_label_policy: NoLabelPolicy::default(),
            backend: Backend::default(),
            github_api_url: default_api_url(),
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `labelrelease.toml` in current directory
/// 3. `.labelrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or an explicit path is missing
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
