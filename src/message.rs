//! Close-message authoring
//!
//! Resolves an editor, seeds a temp file with a commented template, and
//! reads the human-authored message back with comment lines stripped. An
//! empty message is the user's cancellation mechanism.

use crate::error::{Error, Result};
use crate::repo::GitWorkingTree;
use crate::types::{PullRequest, PullRequestRef};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Editor of last resort
pub const DEFAULT_EDITOR: &str = "vi";

/// Marker beginning every template line the parser discards
pub const COMMENT_CHAR: char = '#';

/// Pick the editor command from the candidates, in priority order:
/// configured editor, `$VISUAL`, `$EDITOR`, then [`DEFAULT_EDITOR`].
///
/// Blank candidates are skipped.
pub fn editor_command(
    configured: Option<&str>,
    visual: Option<&str>,
    fallback: Option<&str>,
) -> String {
    [configured, visual, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_EDITOR)
        .to_string()
}

/// Resolve the editor for this working tree.
///
/// The configured editor is whatever `git config core.editor` prints,
/// not the lookup's exit code; the environment chain applies only when
/// that lookup is unset or fails.
pub async fn resolve_editor(repo: &GitWorkingTree) -> String {
    let configured = repo.config("core.editor").await;
    editor_command(
        configured.as_deref(),
        std::env::var("VISUAL").ok().as_deref(),
        std::env::var("EDITOR").ok().as_deref(),
    )
}

/// Build the commented template seeded into the editor buffer.
///
/// `unpushed` is the one-line-per-commit log of commits on the base ref
/// that the tracked remote branch does not have yet.
pub fn close_template(
    pr_ref: &PullRequestRef,
    pr: &PullRequest,
    upstream: Option<&str>,
    unpushed: &str,
) -> String {
    let mut template = String::new();
    template.push_str(&format!("# Closing {pr_ref} ({})\n", pr.head.label));
    template.push_str("#\n");
    template.push_str(&format!("# Merging into: {}\n", pr.base.ref_name));
    template.push_str(&format!("# Tracking:     {}\n", upstream.unwrap_or("(none)")));
    template.push_str("#\n");
    template.push_str("# Commits not yet pushed:\n");
    if unpushed.is_empty() {
        template.push_str("#   (none)\n");
    } else {
        for line in unpushed.lines() {
            template.push_str(&format!("#   {line}\n"));
        }
    }
    template.push_str("#\n");
    template.push_str("# Lines starting with '#' are dropped from the close message.\n");
    template.push_str("# Leave the message empty to abort without pushing or closing.\n");
    template
}

/// Drop every line beginning with [`COMMENT_CHAR`] and trim surrounding
/// whitespace.
pub fn strip_comments(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.starts_with(COMMENT_CHAR))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Seed a temp file with `template`, block on the editor, and return the
/// stripped message.
///
/// Returns [`Error::EmptyCloseMessage`] when nothing remains, before any
/// push or API call has happened.
pub async fn compose(editor: &str, template: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("landpr-close-")
        .suffix(".txt")
        .tempfile()?;
    std::fs::write(file.path(), template)?;

    launch_editor(editor, file.path()).await?;

    let raw = std::fs::read_to_string(file.path())?;
    let message = strip_comments(&raw);
    if message.is_empty() {
        return Err(Error::EmptyCloseMessage);
    }
    Ok(message)
}

/// Launch the editor on `path` and block until it exits.
///
/// The editor command may carry arguments (`code --wait`); the file path
/// is appended as the final argument.
async fn launch_editor(editor: &str, path: &Path) -> Result<()> {
    debug!(editor, "launching editor");
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| Error::Editor("empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await
        .map_err(|e| Error::Editor(format!("failed to launch {program}: {e}")))?;

    if !status.success() {
        return Err(Error::Editor(format!("{program} exited with {status}")));
    }
    Ok(())
}
