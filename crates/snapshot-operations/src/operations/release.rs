use std::fmt;

use snapshot_changelog::{ChangelogDetails, Distribution};
use snapshot_version::VersionInfo;

use crate::Result;
use crate::operations::upload_target::UploadDecision;
use crate::traits::{ChangelogReader, GitProvider};

/// The manual steps left after a snapshot: finalize, commit and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInstructions {
    pub series: String,
    pub source: String,
    pub version: VersionInfo,
    pub changelog: String,
    pub branch: String,
    /// `major.minor` of the version the snapshot started from.
    pub previous_major_minor: String,
}

impl ReleaseInstructions {
    /// Collects the instructions once the new changelog entry is in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog or the current branch cannot be read.
    pub fn collect<R, G>(
        reader: &R,
        git: &G,
        old: &ChangelogDetails,
        decision: &UploadDecision,
        changelog: &str,
    ) -> Result<Self>
    where
        R: ChangelogReader,
        G: GitProvider,
    {
        let series = if decision.target.is_devel() {
            decision.devel_series.clone()
        } else {
            old.distribution.to_string()
        };
        let series = if Distribution::parse(&series).is_unreleased() {
            reader.current_distribution()?
        } else {
            series
        };

        let current = reader.entry(0)?;
        Ok(Self {
            series,
            source: current.source,
            version: current.version,
            changelog: changelog.to_string(),
            branch: git.current_branch()?,
            previous_major_minor: old.version.major_minor(),
        })
    }
}

impl fmt::Display for ReleaseInstructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To release:")?;
        writeln!(f, "dch -r -D {} ''", self.series)?;
        writeln!(
            f,
            "git commit -m 'releasing {} version {}' {}",
            self.source, self.version, self.changelog
        )?;
        writeln!(f, "git tag {}", self.version.tag_name())?;
        writeln!(f)?;
        write!(
            f,
            "Don't forget to include previously released changelogs from upstream/{}-{}.x!",
            self.branch, self.previous_major_minor
        )
    }
}
