use std::path::PathBuf;
use std::sync::Arc;

use snapshot_changelog::{Changelog, ChangelogDetails};
use snapshot_tools::{CommandRunner, Dch, ParseChangelog};
use snapshot_version::VersionInfo;
use tracing::debug;

use crate::Result;
use crate::traits::{ChangelogReader, ChangelogWriter};

/// Reads entries through `dpkg-parsechangelog` rather than parsing the file
/// directly.
pub struct ParsedChangelogReader {
    parser: ParseChangelog,
}

impl ParsedChangelogReader {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, changelog: &str) -> Self {
        Self {
            parser: ParseChangelog::new(runner, changelog),
        }
    }
}

impl ChangelogReader for ParsedChangelogReader {
    fn entry(&self, offset: usize) -> Result<ChangelogDetails> {
        let output = self.parser.entry(offset)?;
        Ok(ChangelogDetails::parse(&output, offset)?)
    }
}

/// Lets `dch` open the entry and write a blank bullet, then fills the bullet
/// in place.
pub struct DchChangelogWriter {
    dch: Dch,
    root: PathBuf,
    path: String,
}

impl DchChangelogWriter {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, root: impl Into<PathBuf>, path: &str) -> Self {
        Self {
            dch: Dch::new(runner, path),
            root: root.into(),
            path: path.to_string(),
        }
    }
}

impl ChangelogWriter for DchChangelogWriter {
    fn path(&self) -> &str {
        &self.path
    }

    fn add_message(&self, message: &str, new_version: Option<&VersionInfo>) -> Result<()> {
        let version = new_version.map(ToString::to_string);
        self.dch.add_placeholder(version.as_deref())?;

        let file = self.root.join(&self.path);
        let mut changelog = Changelog::from_file(&file)?;
        changelog.fill_placeholder(message)?;
        changelog.write_to_file(&file)?;

        debug!(path = %file.display(), version = ?version, "filled changelog placeholder");
        Ok(())
    }
}
