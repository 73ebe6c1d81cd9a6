//! Command-line interface

pub mod land;
pub mod style;

use clap::Parser;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "landpr",
    version,
    about = "Rebase, merge, and close a GitHub pull request"
)]
pub struct Cli {
    /// Pull request URL, e.g. <https://github.com/owner/repo/pull/42>
    pub url: String,

    /// Do not persist resolved credentials back to the credential store
    #[arg(long)]
    pub nosavepw: bool,
}
