//! landpr - rebase, merge, and close a single GitHub pull request
//!
//! The whole tool is one linear flow: parse the PR URL, resolve
//! credentials from the git credential store, fetch the PR snapshot,
//! transition the local repository (checkout, merge branch, rebase,
//! fast-forward merge), author a close message in an editor, push, and
//! post the comment and close action back to the API. The original
//! checkout is restored on every exit path.

pub mod credential;
pub mod error;
pub mod land;
pub mod message;
pub mod platform;
pub mod repo;
pub mod types;
