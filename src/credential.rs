//! Credential acquisition via the git credential store
//!
//! Speaks the newline-delimited key=value protocol of
//! `git credential fill` / `git credential approve`. The store itself is an
//! external collaborator; this module only drives the subprocess.

use crate::error::{Error, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Host every credential lookup and API call is scoped to
pub const GITHUB_API_HOST: &str = "api.github.com";

/// Password stand-in GitHub expects when the username slot carries an
/// OAuth token
pub const OAUTH_BASIC_PASSWORD: &str = "x-oauth-basic";

/// A username/password pair resolved from the credential store
///
/// Held only in process memory and never logged in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: String,
}

impl Credentials {
    /// Apply GitHub's token convention: a literal `token` username means
    /// the password slot carries an OAuth token, which basic-auth expects
    /// as `(token, "x-oauth-basic")`.
    pub fn into_oauth_form(self) -> Self {
        if self.username == "token" {
            Self {
                username: self.password,
                password: OAUTH_BASIC_PASSWORD.to_string(),
            }
        } else {
            self
        }
    }
}

/// Wire format of a `git credential fill` request for `host`.
pub fn fill_request(host: &str) -> String {
    format!("protocol=https\nhost={host}\n\n")
}

/// Wire format of a `git credential approve` request for `host`.
pub fn approve_request(host: &str, credentials: &Credentials) -> String {
    format!(
        "protocol=https\nhost={host}\nusername={}\npassword={}\n\n",
        credentials.username, credentials.password
    )
}

/// Extract username and password from `git credential fill` output.
pub fn parse_fill_output(output: &str) -> Result<Credentials> {
    let mut username = None;
    let mut password = None;

    for line in output.lines() {
        if let Some((key, value)) = line.split_once('=') {
            match key {
                "username" => username = Some(value.to_string()),
                "password" => password = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let username = username
        .ok_or_else(|| Error::Credential("helper returned no username".to_string()))?;
    let password = password
        .ok_or_else(|| Error::Credential("helper returned no password".to_string()))?;

    Ok(Credentials { username, password })
}

/// Resolve credentials for `host` from the credential store.
pub async fn fill(host: &str) -> Result<Credentials> {
    let output = run_helper("fill", &fill_request(host)).await?;
    let credentials = parse_fill_output(&output)?;
    debug!(username = %credentials.username, "resolved credentials");
    Ok(credentials)
}

/// Persist `credentials` back to the credential store.
///
/// A failure here is fatal, same as every other step.
pub async fn approve(host: &str, credentials: &Credentials) -> Result<()> {
    debug!(username = %credentials.username, "saving credentials");
    run_helper("approve", &approve_request(host, credentials)).await?;
    Ok(())
}

async fn run_helper(action: &str, input: &str) -> Result<String> {
    let mut child = Command::new("git")
        .args(["credential", action])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Credential(format!("failed to run git credential {action}: {e}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Credential("could not open helper stdin".to_string()))?;
    stdin.write_all(input.as_bytes()).await?;
    drop(stdin);

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(Error::Credential(format!(
            "git credential {action} exited with {}",
            output.status
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| Error::Credential("helper output is not valid UTF-8".to_string()))
}
