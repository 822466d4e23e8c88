use snapshot_changelog::{ChangelogDetails, Distribution};
use snapshot_version::VersionInfo;

use crate::{OperationError, Result};

/// How many entries are inspected when looking for the last released one.
pub const DISTRIBUTION_SCAN_DEPTH: usize = 5;

pub trait ChangelogReader: Send + Sync {
    /// The entry `offset` entries below the top.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be read or parsed.
    fn entry(&self, offset: usize) -> Result<ChangelogDetails>;

    /// Distribution of the newest released entry.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoReleasedDistribution` if none of the top
    /// [`DISTRIBUTION_SCAN_DEPTH`] entries is released.
    fn current_distribution(&self) -> Result<String> {
        for offset in 0..DISTRIBUTION_SCAN_DEPTH {
            if let Distribution::Named(series) = self.entry(offset)?.distribution {
                return Ok(series);
            }
        }
        Err(OperationError::NoReleasedDistribution {
            scanned: DISTRIBUTION_SCAN_DEPTH,
        })
    }
}

pub trait ChangelogWriter: Send + Sync {
    /// Repository-relative path of the changelog.
    fn path(&self) -> &str;

    /// Adds `message` as a bullet, opening a new entry under `new_version`
    /// when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be added or the file cannot be
    /// rewritten unambiguously.
    fn add_message(&self, message: &str, new_version: Option<&VersionInfo>) -> Result<()>;
}
