use indexmap::IndexSet;
use snapshot_core::BugNumber;
use tracing::warn;

use crate::traits::GitProvider;
use crate::{OperationError, Result};

/// How many commits below HEAD are searched for the snapshot merge.
pub const MERGE_SEARCH_DEPTH: usize = 5;

const BUG_TRAILER: &str = "LP: #";

/// First parent of the most recent merge commit near HEAD, i.e. the
/// packaging branch as it was before the snapshot.
///
/// # Errors
///
/// Returns `OperationError::NoRecentMerge` if none of the last
/// [`MERGE_SEARCH_DEPTH`] commits is a merge.
pub fn original_head<G: GitProvider>(git: &G) -> Result<String> {
    for generation in 0..MERGE_SEARCH_DEPTH {
        if git.parent_count(&format!("HEAD~{generation}"))? > 1 {
            return Ok(format!("HEAD~{}", generation + 1));
        }
    }
    Err(OperationError::NoRecentMerge)
}

/// Launchpad bugs referenced by commits brought in by the snapshot merge,
/// in order of first appearance.
///
/// # Errors
///
/// Returns `OperationError::NoRecentMerge` if the merge cannot be found,
/// or the error of the log query.
pub fn bugs_fixed_since_merge<G: GitProvider>(git: &G) -> Result<Vec<BugNumber>> {
    let range = format!("{}..HEAD", original_head(git)?);
    Ok(parse_bug_trailers(&git.log(&range)?))
}

/// Collects bug numbers from `LP: #…` lines of a git log.
#[must_use]
pub fn parse_bug_trailers(log: &str) -> Vec<BugNumber> {
    let mut bugs = IndexSet::new();
    for line in log.lines() {
        let Some(rest) = line.trim().strip_prefix(BUG_TRAILER) else {
            continue;
        };
        for token in rest.split(',') {
            match token.parse::<BugNumber>() {
                Ok(bug) => {
                    bugs.insert(bug);
                }
                Err(err) => warn!(line = %line.trim(), "skipping bug reference: {err}"),
            }
        }
    }
    bugs.into_iter().collect()
}
