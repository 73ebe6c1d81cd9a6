//! Land command - gather collaborators, then run the landing sequence

use crate::cli::Cli;
use crate::cli::style::{Stylize, check};
use anstream::println;
use landpr::credential::{self, GITHUB_API_HOST};
use landpr::error::Result;
use landpr::land::land;
use landpr::message;
use landpr::platform::GitHubClient;
use landpr::repo::{GitWorkingTree, HeadGuard};
use landpr::types::PullRequestRef;
use std::path::Path;

/// Run the land command for the given arguments.
pub async fn run_land(args: &Cli) -> Result<()> {
    // =========================================================================
    // Phase 1: GATHER - preconditions and collaborators, no mutation yet
    // =========================================================================

    let pr_ref = PullRequestRef::parse(&args.url)?;
    let repo = GitWorkingTree::open(Path::new(".")).await?;

    // Everything after this point runs under the restore guard: whatever
    // happens, the user is returned to their starting checkout.
    let original_head = repo.current_head().await?;
    let _restore = HeadGuard::new(&repo, original_head);

    let credentials = credential::fill(GITHUB_API_HOST).await?.into_oauth_form();
    if !args.nosavepw {
        credential::approve(GITHUB_API_HOST, &credentials).await?;
    }

    let client = GitHubClient::new(credentials)?;
    let editor = message::resolve_editor(&repo).await;

    // =========================================================================
    // Phase 2: EXECUTE - the landing sequence
    // =========================================================================

    println!(
        "{} {}",
        "Landing".emphasis(),
        pr_ref.to_string().accent()
    );

    land(&repo, &client, &pr_ref, &editor).await?;

    println!(
        "{} {} merged and closed",
        check().success(),
        pr_ref.to_string().accent()
    );

    Ok(())
}
