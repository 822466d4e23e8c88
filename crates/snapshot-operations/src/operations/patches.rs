use tracing::{debug, info};

use crate::traits::{GitProvider, PatchStore, QuiltProvider};
use crate::{OperationError, Result};

/// Hash embedded in a cherry-pick patch name, `cpick-<hash>-<subject>`.
#[must_use]
pub fn cherry_pick_hash(name: &str) -> Option<&str> {
    name.split('-').nth(1).filter(|hash| !hash.is_empty())
}

/// Drops cherry-pick patches whose commit is already part of `commitish`
/// and commits the result.
///
/// Returns the names of the dropped patches.
///
/// # Errors
///
/// Returns an error if the patch directory cannot be updated or git fails.
pub fn drop_cherry_picks<G, S>(git: &G, store: &S, commitish: &str) -> Result<Vec<String>>
where
    G: GitProvider,
    S: PatchStore,
{
    info!("Dropping any cpicks that we've pulled in from main");

    let mut dropped = Vec::new();
    for name in store.cherry_picks()? {
        let Some(hash) = cherry_pick_hash(&name) else {
            debug!(patch = %name, "no commit hash in cherry-pick name");
            continue;
        };
        if !git.is_ancestor(hash, commitish)? {
            continue;
        }

        info!("Dropping file {name} as it is contained in the upstream snapshot");
        store.remove_from_series(&name)?;
        store.remove_patch(&name)?;
        dropped.push(name);
    }

    if dropped.is_empty() {
        return Ok(dropped);
    }

    git.stage(&[store.patches_dir()])?;
    let message = format!(
        "drop cherry picks included in {commitish}.\n\ndrop the following cherry picks:\n{}",
        dropped.join("\n")
    );
    git.commit(&message)?;
    Ok(dropped)
}

/// Pushes every patch in the series, refreshing each, then pops them again.
///
/// Patches whose files changed are committed and returned.
///
/// # Errors
///
/// Returns `OperationError::PatchFailed` naming the first patch that does
/// not apply, `OperationError::QuiltPop` if popping fails, or a git error.
pub fn refresh_patches<G, Q, S>(
    git: &G,
    quilt: &Q,
    store: &S,
    commitish: &str,
) -> Result<Vec<String>>
where
    G: GitProvider,
    Q: QuiltProvider,
    S: PatchStore,
{
    info!("Attempting to automatically refresh quilt patches");

    let mut pushed = false;
    while let Some(patch) = quilt.next_patch()? {
        quilt.push().map_err(|err| match err {
            OperationError::Tool(source) => OperationError::PatchFailed {
                patch: patch.clone(),
                source,
            },
            other => other,
        })?;
        pushed = true;
        quilt.refresh()?;
        debug!(patch = %patch, "refreshed");
    }

    if pushed {
        // 2 means nothing was applied
        match quilt.pop_all()? {
            Some(0 | 2) => {}
            code => {
                return Err(OperationError::QuiltPop {
                    code: code.map_or_else(|| "no exit code".to_string(), |c| c.to_string()),
                });
            }
        }
    }

    let changed = git.changed_files(&format!("{}/", store.patches_dir()))?;
    if changed.is_empty() {
        info!("No patches needed refresh");
        return Ok(changed);
    }

    let message = format!(
        "refresh patches against {commitish}\n\npatches: \n{}",
        changed.join("\n")
    );
    let paths: Vec<&str> = changed.iter().map(String::as_str).collect();
    git.commit_paths(&message, &paths)?;
    Ok(changed)
}
