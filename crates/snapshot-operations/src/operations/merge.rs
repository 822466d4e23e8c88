use tracing::info;

use crate::traits::GitProvider;
use crate::{OperationError, Result};

/// Merges `commitish` into the packaging branch.
///
/// When `fetch_remote` is given it is fetched first so a remote-tracking
/// ref is current. The merge commit message records what `git describe`
/// said about the commitish.
///
/// # Errors
///
/// Returns `OperationError::UnknownCommitish` if git cannot describe the
/// commitish, `OperationError::MergeFailed` if the merge stops, or the
/// error of the fetch.
pub fn merge_commitish<G: GitProvider>(
    git: &G,
    commitish: &str,
    fetch_remote: Option<&str>,
) -> Result<String> {
    if let Some(remote) = fetch_remote {
        info!(remote, "fetching before merge");
        git.fetch(remote)?;
    }

    let description =
        git.describe(commitish)?
            .ok_or_else(|| OperationError::UnknownCommitish {
                commitish: commitish.to_string(),
            })?;

    let message = format!("merge from {commitish} at {description}");
    info!("Running: git merge {commitish} -m \"{message}\"");

    git.merge(commitish, &message).map_err(|err| match err {
        OperationError::Tool(source) => OperationError::MergeFailed {
            commitish: commitish.to_string(),
            source,
        },
        other => other,
    })?;

    Ok(message)
}
