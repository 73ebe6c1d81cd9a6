//! Local git operations
//!
//! Every operation shells out to the `git` binary; its exit code is the
//! sole success signal. Mutating commands inherit stdio so git's own
//! output reaches the user, lookups capture stdout instead.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A git working tree rooted at a directory
#[derive(Debug, Clone)]
pub struct GitWorkingTree {
    root: PathBuf,
}

impl GitWorkingTree {
    /// Open the working tree at `path`, verifying it with a no-op status
    /// probe. On failure git's own diagnostic has already been printed.
    pub async fn open(path: &Path) -> Result<Self> {
        let tree = Self {
            root: path.to_path_buf(),
        };

        let status = Command::new("git")
            .current_dir(&tree.root)
            .args(["status", "--porcelain"])
            .stdout(Stdio::null())
            .status()
            .await?;
        if !status.success() {
            return Err(Error::Git("status".to_string()));
        }

        Ok(tree)
    }

    /// Root directory this working tree was opened at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current branch name, or the commit id when HEAD is detached.
    pub async fn current_head(&self) -> Result<String> {
        if let Ok(branch) = self.run_captured(&["symbolic-ref", "-q", "--short", "HEAD"]).await
            && !branch.is_empty()
        {
            return Ok(branch);
        }
        self.run_captured(&["rev-parse", "HEAD"]).await
    }

    /// Check out a ref or commit id.
    pub async fn checkout(&self, target: &str) -> Result<()> {
        self.run(&["checkout", target]).await
    }

    /// Create and check out a new branch.
    pub async fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name]).await
    }

    /// Fetch a ref from a remote URL.
    pub async fn fetch(&self, url: &str, ref_name: &str) -> Result<()> {
        self.run(&["fetch", url, ref_name]).await
    }

    /// Fast-forward pull a ref from a remote URL into the current branch.
    ///
    /// `--ff-only` enforces that the fetched ref is a direct descendant;
    /// divergent history fails instead of silently merging.
    pub async fn pull_ff(&self, url: &str, ref_name: &str) -> Result<()> {
        self.run(&["pull", "--ff-only", url, ref_name]).await
    }

    /// Rebase the current branch onto `onto`.
    pub async fn rebase(&self, onto: &str) -> Result<()> {
        self.run(&["rebase", onto]).await
    }

    /// Fast-forward merge `branch` into the current branch.
    pub async fn merge_ff(&self, branch: &str) -> Result<()> {
        self.run(&["merge", "--ff-only", branch]).await
    }

    /// Delete a local branch unconditionally.
    pub async fn delete_branch(&self, name: &str) -> Result<()> {
        self.run(&["branch", "-D", name]).await
    }

    /// Push the current branch to its configured upstream.
    pub async fn push(&self) -> Result<()> {
        self.run(&["push"]).await
    }

    /// Look up a config value, `None` when unset or empty.
    pub async fn config(&self, key: &str) -> Option<String> {
        self.run_captured(&["config", key])
            .await
            .ok()
            .filter(|v| !v.is_empty())
    }

    /// Upstream tracking ref of HEAD (e.g. `origin/main`), `None` when
    /// none is configured.
    pub async fn upstream_of_head(&self) -> Option<String> {
        self.run_captured(&["rev-parse", "--abbrev-ref", "@{upstream}"])
            .await
            .ok()
            .filter(|v| !v.is_empty())
    }

    /// One-line-per-commit log of commits reachable from HEAD but not
    /// from `upstream`.
    pub async fn unpushed_log(&self, upstream: &str) -> Result<String> {
        let range = format!("{upstream}..HEAD");
        self.run_captured(&["log", "--pretty=format:%h %s", range.as_str()])
            .await
    }

    /// Run a mutating git command with inherited stdio.
    async fn run(&self, args: &[&str]) -> Result<()> {
        debug!(command = %args.join(" "), "running git");
        let status = Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .status()
            .await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Git(args.join(" ")))
        }
    }

    /// Run a lookup git command, capturing trimmed stdout.
    async fn run_captured(&self, args: &[&str]) -> Result<String> {
        debug!(command = %args.join(" "), "running git (captured)");
        let output = Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()
            .await?;
        if !output.status.success() {
            return Err(Error::Git(args.join(" ")));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Restores the originally checked-out branch or commit when dropped
///
/// Registered once, immediately after the original HEAD is captured, so
/// the restore runs on every exit path: success, error unwind, and
/// cancellation of the in-flight future on interrupt.
#[derive(Debug)]
pub struct HeadGuard {
    root: PathBuf,
    head: String,
}

impl HeadGuard {
    /// Capture `head` as the checkout to restore for `tree`.
    pub fn new(tree: &GitWorkingTree, head: String) -> Self {
        Self {
            root: tree.root.clone(),
            head,
        }
    }
}

impl Drop for HeadGuard {
    fn drop(&mut self) {
        // Drop cannot await, so this one checkout is a blocking call.
        let _ = std::process::Command::new("git")
            .current_dir(&self.root)
            .args(["checkout", &self.head])
            .status();
    }
}
