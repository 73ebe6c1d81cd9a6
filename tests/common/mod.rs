//! Shared test fixtures
//!
//! Used by both test binaries; each uses a subset.
#![allow(dead_code)]

use landpr::types::{Account, BranchTip, PullRequest, PullRequestRef, RepoInfo};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway git repository driven through the real `git` binary.
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Initialize a repository on branch `main` with one commit.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Self { dir };
        repo.git(&["init", "--initial-branch=main"]);
        repo.configure_user();
        repo.commit_file("README.md", "hello\n", "Initial commit");
        repo
    }

    /// Clone `source` into a fresh directory (sets up `origin` tracking).
    pub fn clone_from(source: &Path) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let status = Command::new("git")
            .current_dir(dir.path())
            .args(["clone", source.to_str().expect("utf-8 path"), "."])
            .output()
            .expect("run git clone");
        assert!(
            status.status.success(),
            "git clone failed: {}",
            String::from_utf8_lossy(&status.stderr)
        );
        let repo = Self { dir };
        repo.configure_user();
        repo
    }

    fn configure_user(&self) {
        self.git(&["config", "user.name", "Test User"]);
        self.git(&["config", "user.email", "test@example.com"]);
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run a git command, asserting success and returning trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.dir.path())
            .args(args)
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Write a file and commit it.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("write file");
        self.git(&["add", name]);
        self.git(&["commit", "-m", message]);
    }

    pub fn head_sha(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }
}

/// Bare clone of `source`, usable as a push/fetch target.
pub fn bare_clone(source: &Path) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let output = Command::new("git")
        .current_dir(dir.path())
        .args(["clone", "--bare", source.to_str().expect("utf-8 path"), "."])
        .output()
        .expect("run git clone --bare");
    assert!(
        output.status.success(),
        "git clone --bare failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    dir
}

/// Executable stub editor that appends `line` to the file it is given.
pub fn fake_editor(dir: &Path, line: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-editor.sh");
    std::fs::write(&path, format!("#!/bin/sh\nprintf '%s\\n' \"{line}\" >> \"$1\"\n"))
        .expect("write editor stub");
    let mut perms = std::fs::metadata(&path).expect("stat editor stub").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod editor stub");
    path
}

/// Reference to the PR used throughout the tests.
pub fn widgets_pr_ref() -> PullRequestRef {
    PullRequestRef {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: 42,
    }
}

fn tip(
    ref_name: &str,
    sha: &str,
    label: &str,
    clone_url: &str,
    login: Option<&str>,
) -> BranchTip {
    BranchTip {
        sha: sha.to_string(),
        ref_name: ref_name.to_string(),
        label: label.to_string(),
        repo: RepoInfo {
            clone_url: clone_url.to_string(),
        },
        user: login.map(|l| Account {
            login: l.to_string(),
        }),
    }
}

/// In-memory PR snapshot for pure-function tests.
pub fn sample_pr(mergeable: Option<bool>) -> PullRequest {
    PullRequest {
        mergeable,
        base: tip(
            "main",
            "1111111111111111111111111111111111111111",
            "acme:main",
            "https://example.com/acme/widgets.git",
            Some("acme"),
        ),
        head: tip(
            "feature-x",
            "2222222222222222222222222222222222222222",
            "alice:feature-x",
            "https://example.com/alice/widgets.git",
            Some("alice"),
        ),
    }
}

/// API-shaped JSON body for a PR snapshot.
pub fn pr_json(
    mergeable: Option<bool>,
    base: (&str, &str, &str),
    head: (&str, &str, &str),
    login: &str,
) -> String {
    let (base_clone, base_ref, base_sha) = base;
    let (head_clone, head_ref, head_sha) = head;
    serde_json::json!({
        "mergeable": mergeable,
        "base": {
            "sha": base_sha,
            "ref": base_ref,
            "label": format!("acme:{base_ref}"),
            "repo": { "clone_url": base_clone },
            "user": { "login": "acme" }
        },
        "head": {
            "sha": head_sha,
            "ref": head_ref,
            "label": format!("{login}:{head_ref}"),
            "repo": { "clone_url": head_clone },
            "user": { "login": login }
        }
    })
    .to_string()
}
