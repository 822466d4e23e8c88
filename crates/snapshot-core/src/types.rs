use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::CoreError;

/// Stage after which a previously interrupted snapshot run resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum PostStage {
    /// The merge was completed by hand; continue with the patch stages.
    Merge,
    /// The patches were refreshed by hand; continue with the changelog.
    Quilt,
}

impl fmt::Display for PostStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Merge => "merge",
            Self::Quilt => "quilt",
        };
        write!(f, "{s}")
    }
}

/// Which archive pocket the snapshot is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Devel,
    StableUpdate,
}

impl UploadTarget {
    #[must_use]
    pub fn is_devel(self) -> bool {
        matches!(self, Self::Devel)
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Devel => "devel",
            Self::StableUpdate => "SRU",
        };
        write!(f, "{s}")
    }
}

/// A Launchpad bug number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BugNumber(String);

impl BugNumber {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BugNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("LP:")
            .map_or(trimmed, str::trim_start)
            .trim_start_matches('#');

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidBugNumber(s.to_string()));
        }
        Ok(Self(digits.to_string()))
    }
}

impl fmt::Display for BugNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns true when the commitish names an upstream release tag,
/// i.e. has the form `x.y` or `x.y.z` with purely numeric parts.
#[must_use]
pub fn is_upstream_tag(commitish: &str) -> bool {
    let parts: Vec<&str> = commitish.split('.').collect();
    if !matches!(parts.len(), 2 | 3) {
        return false;
    }
    parts
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
