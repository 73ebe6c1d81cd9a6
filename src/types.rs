//! Core types for landpr

use crate::error::{Error, Result};
use serde::Deserialize;
use url::Url;

/// Coordinates of a pull request, parsed once from the input URL
///
/// Immutable after parsing; every API endpoint is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    pub number: u64,
}

impl PullRequestRef {
    /// Parse a pull request web URL.
    ///
    /// The path must decompose into exactly `/<owner>/<repo>/pull/<number>`;
    /// any other shape is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| Error::UrlParse(format!("{input}: {e}")))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();

        let [owner, repo, keyword, number] = segments.as_slice() else {
            return Err(Error::UrlParse(format!(
                "{input}: expected path /<owner>/<repo>/pull/<number>"
            )));
        };

        if *keyword != "pull" {
            return Err(Error::UrlParse(format!(
                "{input}: expected path /<owner>/<repo>/pull/<number>"
            )));
        }

        let number: u64 = number
            .parse()
            .map_err(|_| Error::UrlParse(format!("{input}: pull request number is not numeric")))?;
        if number == 0 {
            return Err(Error::UrlParse(format!(
                "{input}: pull request number must be positive"
            )));
        }

        if owner.is_empty() || repo.is_empty() {
            return Err(Error::UrlParse(format!(
                "{input}: owner and repository must be non-empty"
            )));
        }

        Ok(Self {
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
            number,
        })
    }
}

impl std::fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// A pull request snapshot fetched from the API
///
/// Read-only: the state is not re-validated after fetch, so a PR that
/// changes on the remote mid-run is acted on as first seen.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Whether the PR can be merged cleanly
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (GitHub still computing)
    pub mergeable: Option<bool>,
    /// Base branch the PR targets
    pub base: BranchTip,
    /// Head branch the PR merges from
    pub head: BranchTip,
}

/// One side of a pull request (base or head)
#[derive(Debug, Clone, Deserialize)]
pub struct BranchTip {
    /// Commit id at the tip
    pub sha: String,
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Qualified label, e.g. `alice:feature-x`
    pub label: String,
    /// Repository the branch lives in
    pub repo: RepoInfo,
    /// Owner of the branch, when the API reports one
    #[serde(default)]
    pub user: Option<Account>,
}

/// Repository coordinates carried on a branch tip
#[derive(Debug, Clone, Deserialize)]
pub struct RepoInfo {
    /// HTTPS clone URL
    pub clone_url: String,
}

/// A user account reference
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Account login name
    pub login: String,
}

impl PullRequest {
    /// Check that the PR can be merged before any git mutation happens.
    pub fn ensure_mergeable(&self) -> Result<()> {
        match self.mergeable {
            Some(true) => Ok(()),
            Some(false) => Err(Error::NotMergeable("it has merge conflicts".to_string())),
            None => Err(Error::NotMergeable(
                "merge status is unknown (still being computed); retry shortly".to_string(),
            )),
        }
    }

    /// Name of the transient local branch the head is landed through:
    /// `merge-pr-<head-author-login>-<head-ref>`.
    ///
    /// Falls back to the `label` prefix when the API omits the head user.
    pub fn merge_branch_name(&self) -> Result<String> {
        let login = self
            .head
            .user
            .as_ref()
            .map(|u| u.login.as_str())
            .or_else(|| self.head.label.split(':').next().filter(|s| !s.is_empty()))
            .ok_or_else(|| Error::Internal("pull request head has no author".to_string()))?;

        Ok(format!("merge-pr-{login}-{}", self.head.ref_name))
    }
}
