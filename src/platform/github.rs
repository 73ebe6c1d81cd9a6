//! GitHub REST client with two-factor retry

use crate::credential::Credentials;
use crate::error::{Error, Result};
use crate::types::{PullRequest, PullRequestRef};
use reqwest::{Client, Method, Response, header};
use tracing::debug;

/// Base URL of the hosted API
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Header carrying the two-factor challenge and its answer
pub const OTP_HEADER: &str = "x-github-otp";

/// User-Agent identifying this client to the API
const USER_AGENT: &str = concat!("landpr/", env!("CARGO_PKG_VERSION"));

/// Source of a one-time password, injectable for tests
pub type OtpSource = fn() -> String;

/// Prompt interactively for a one-time code; empty string on end-of-input.
fn prompt_otp() -> String {
    dialoguer::Input::<String>::new()
        .with_prompt("two-factor code")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default()
}

/// Authenticated GitHub API client
///
/// Every request is sent with basic auth; a 401/404 response whose
/// [`OTP_HEADER`] starts with `required` is answered by prompting for a
/// one-time code and resending exactly once. Any status outside 200/201
/// is terminal.
pub struct GitHubClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    otp_source: OtpSource,
}

impl GitHubClient {
    /// Create a client against the fixed public API host.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, GITHUB_API_URL)
    }

    /// Create a client against an explicit base URL (used by tests).
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            credentials,
            otp_source: prompt_otp,
        })
    }

    /// Replace the interactive one-time-password prompt (used by tests).
    #[must_use]
    pub fn with_otp_source(mut self, source: OtpSource) -> Self {
        self.otp_source = source;
        self
    }

    /// Fetch the pull request snapshot.
    pub async fn get_pull(&self, pr: &PullRequestRef) -> Result<PullRequest> {
        debug!(%pr, "fetching pull request");
        let path = format!("/repos/{}/{}/pulls/{}", pr.owner, pr.repo, pr.number);
        let body = self.send(Method::GET, &path, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Post `body` as a comment on the pull request's issue.
    pub async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> Result<()> {
        debug!(%pr, "posting close comment");
        let path = format!("/repos/{}/{}/issues/{}/comments", pr.owner, pr.repo, pr.number);
        let payload = serde_json::json!({ "body": body });
        self.send(Method::POST, &path, Some(&payload)).await?;
        Ok(())
    }

    /// Mark the pull request closed.
    pub async fn close_pull(&self, pr: &PullRequestRef) -> Result<()> {
        debug!(%pr, "closing pull request");
        let path = format!("/repos/{}/{}/pulls/{}", pr.owner, pr.repo, pr.number);
        let payload = serde_json::json!({ "state": "closed" });
        self.send(Method::PATCH, &path, Some(&payload)).await?;
        Ok(())
    }

    /// Send an authenticated request, retrying once on a two-factor
    /// challenge. Returns the response body on 200/201.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String> {
        let mut response = self.dispatch(method.clone(), path, body, None).await?;

        if Self::otp_required(&response) {
            debug!(path, "two-factor code required, retrying once");
            let code = (self.otp_source)();
            response = self.dispatch(method, path, body, Some(&code)).await?;
        }

        let status = response.status();
        let text = response.text().await?;
        if matches!(status.as_u16(), 200 | 201) {
            Ok(text)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                body: text,
            })
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        otp: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .http
            .request(method, &url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(payload) = body {
            request = request.json(payload);
        }
        if let Some(code) = otp {
            request = request.header(OTP_HEADER, code);
        }
        Ok(request.send().await?)
    }

    fn otp_required(response: &Response) -> bool {
        matches!(response.status().as_u16(), 401 | 404)
            && response
                .headers()
                .get(OTP_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("required"))
    }
}
