//! GitHub REST API backend
//!
//! Uses the blocking `reqwest` client: every call is a single synchronous
//! request with no retries.

use crate::error::{ReleaseError, Result};
use crate::git::{RefLister, ReleasePublisher, TAG_REF_PREFIX};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("label-release/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the GitHub API
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL (GitHub Enterprise installs use their own)
    pub api_url: String,

    /// Repository in `owner/repo` form
    pub repository: String,

    pub token: Option<String>,
}

/// GitHub API adapter
pub struct GitHubClient {
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Debug, Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    target_commitish: &'a str,
    draft: bool,
    prerelease: bool,
}

/// Split an `owner/repo` identifier
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    match repository.split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ReleaseError::config(format!(
            "invalid repository format: '{}', expected 'owner/repo'",
            repository
        ))),
    }
}

impl GitHubClient {
    /// Create a new GitHub API adapter
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let (owner, repo) = parse_repository(&config.repository)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ReleaseError::config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(GitHubClient {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner,
            repo,
            token: config.token.filter(|t| !t.is_empty()),
            client,
        })
    }

    /// URL of a repository-scoped API path
    pub fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url,
            self.owner,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<()> {
        let url = self.repo_url(path);
        debug!(url = %url, "POST");
        let response = self
            .authorized(self.client.post(&url))
            .json(body)
            .send()
            .map_err(|e| ReleaseError::publish(format!("POST {} failed: {}", url, e)))?;

        check_status(response, &url).map_err(ReleaseError::publish)?;
        Ok(())
    }
}

/// Turn a non-2xx response into an error message carrying status and body
fn check_status(response: Response, url: &str) -> std::result::Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(format!("{} returned {}: {}", url, status, body.trim()))
}

impl RefLister for GitHubClient {
    fn list_tags(&self) -> Result<Option<Vec<String>>> {
        let url = self.repo_url("git/matching-refs/tags");
        debug!(url = %url, "GET");
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .map_err(|e| ReleaseError::ref_list(format!("GET {} failed: {}", url, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            info!("no tag refs found on remote");
            return Ok(None);
        }

        let response = check_status(response, &url).map_err(ReleaseError::ref_list)?;
        let refs: Vec<GitRef> = response
            .json()
            .map_err(|e| ReleaseError::ref_list(format!("Cannot decode refs: {}", e)))?;

        Ok(Some(refs.into_iter().map(|r| r.ref_name).collect()))
    }
}

impl ReleasePublisher for GitHubClient {
    fn create_release(&self, tag: &str, target: &str) -> Result<()> {
        info!(tag, target, "creating GitHub release");
        self.post(
            "releases",
            &CreateReleaseRequest {
                tag_name: tag,
                name: tag,
                target_commitish: target,
                draft: false,
                prerelease: false,
            },
        )
    }

    fn create_tag(&self, tag: &str, target: &str) -> Result<()> {
        info!(tag, target, "creating tag ref");
        self.post(
            "git/refs",
            &CreateRefRequest {
                ref_name: format!("{}{}", TAG_REF_PREFIX, tag),
                sha: target,
            },
        )
    }
}
