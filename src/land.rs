//! Landing sequence - effectful operations
//!
//! Executes the fixed landing sequence for one pull request: fetch the
//! snapshot, transition the local repository, author the close message,
//! push, and report back to the API. Every step's failure aborts the
//! remainder; the caller's [`HeadGuard`](crate::repo::HeadGuard) restores
//! the original checkout on every exit path.

use crate::error::Result;
use crate::message;
use crate::platform::GitHubClient;
use crate::repo::GitWorkingTree;
use crate::types::PullRequestRef;
use tracing::debug;

/// Land `pr_ref`: rebase and fast-forward merge its head into its base,
/// push, then comment on and close the pull request.
///
/// A rebase or merge failure leaves the transient merge branch behind for
/// manual resolution; nothing is rolled back beyond the caller's HEAD
/// restore.
pub async fn land(
    repo: &GitWorkingTree,
    client: &GitHubClient,
    pr_ref: &PullRequestRef,
    editor: &str,
) -> Result<()> {
    // The snapshot must report mergeable before any git mutation.
    let pr = client.get_pull(pr_ref).await?;
    pr.ensure_mergeable()?;
    let merge_branch = pr.merge_branch_name()?;
    debug!(%pr_ref, %merge_branch, base = %pr.base.ref_name, "landing pull request");

    // Base commit, with one fetch-and-retry when not present locally.
    if repo.checkout(&pr.base.sha).await.is_err() {
        repo.fetch(&pr.base.repo.clone_url, &pr.base.ref_name).await?;
        repo.checkout(&pr.base.sha).await?;
    }

    // Land the head through the transient merge branch. `--ff-only` on
    // both the pull and the merge keeps divergent history from slipping
    // through silently.
    repo.create_branch(&merge_branch).await?;
    repo.pull_ff(&pr.head.repo.clone_url, &pr.head.ref_name).await?;
    repo.rebase(&pr.base.ref_name).await?;
    repo.checkout(&pr.base.ref_name).await?;
    repo.merge_ff(&merge_branch).await?;
    repo.delete_branch(&merge_branch).await?;

    // Close message authored by the operator. An empty message aborts
    // here, before the push and before any API write.
    let upstream = repo.upstream_of_head().await;
    let unpushed = match upstream.as_deref() {
        Some(u) => repo.unpushed_log(u).await?,
        None => String::new(),
    };
    let template = message::close_template(pr_ref, &pr, upstream.as_deref(), &unpushed);
    let close_message = message::compose(editor, &template).await?;

    repo.push().await?;
    client.create_comment(pr_ref, &close_message).await?;
    client.close_pull(pr_ref).await?;

    Ok(())
}
