//! Hosting platform API client
//!
//! All pull request metadata and mutations go through the GitHub REST API
//! over authenticated HTTPS.

mod github;

pub use github::{GITHUB_API_URL, GitHubClient, OTP_HEADER, OtpSource};
