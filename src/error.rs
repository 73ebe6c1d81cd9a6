//! Error types for landpr

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while landing a pull request
#[derive(Debug, Error)]
pub enum Error {
    /// The pull request URL did not have the expected shape
    #[error("invalid pull request URL: {0}")]
    UrlParse(String),

    /// The credential helper failed or returned an incomplete response
    #[error("credential helper: {0}")]
    Credential(String),

    /// The API returned a non-success status after the allowed retry
    #[error("GitHub API request failed: {status}\n{body}")]
    Api {
        /// HTTP status code of the terminal response
        status: u16,
        /// Response body, printed verbatim for diagnosis
        body: String,
    },

    /// An API response could not be decoded
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A git subprocess exited with a non-zero status
    ///
    /// git writes its own diagnostic to the inherited stderr, so the
    /// message only names the failed invocation.
    #[error("git {0} failed")]
    Git(String),

    /// The pull request cannot be merged as-is
    #[error("pull request is not mergeable: {0}")]
    NotMergeable(String),

    /// The editor could not be launched or exited unsuccessfully
    #[error("editor: {0}")]
    Editor(String),

    /// The close message was empty after stripping comment lines
    #[error("close message is empty; aborting without pushing or closing")]
    EmptyCloseMessage,

    /// Transport-level HTTP failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Filesystem or subprocess spawn failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Internal invariant violation
    #[error("{0}")]
    Internal(String),
}
